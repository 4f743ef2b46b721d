use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One source row as loaded from the input table, read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    /// Phone cell as it appeared in the source, before normalization
    pub raw_phone: Option<String>,
    /// Name cell; may be empty, garbled, or contain digits
    pub name: String,
    /// Sales representative cell (`sp` column)
    pub sales_rep: Option<String>,
    /// Raw per-product cells, sparse: only columns present in the input
    pub product_flags: BTreeMap<String, String>,
    /// Free-text notes, absent when the input has no `description` column
    pub description: Option<String>,
    /// Zero-based position in the input; assigned at load, never changed
    pub original_order: usize,
}

/// One merged customer, produced by collapsing all input rows that share a
/// canonical phone key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Canonical 10-digit key starting with `9`; unique across the output
    pub phone_key: String,
    /// Chosen display name (may be invalid when no contributing row had a
    /// valid one)
    pub display_name: String,
    /// Sales rep of the earliest contributing row
    pub sales_rep: Option<String>,
    /// Per-product purchase flags, OR-aggregated over the group
    pub product_flags: BTreeMap<String, bool>,
    /// Non-empty contributing descriptions joined with `" | "`
    pub description: Option<String>,
    /// True iff every product flag is false, recomputed from the merged flags
    pub has_no_product: bool,
    /// Minimum `original_order` among contributing rows; drives output order
    pub first_appearance_order: usize,
}
