//! Record linking.
//!
//! Attaches the canonical phone key to each loaded row and coerces the raw
//! product cells to booleans, producing the shape the merge engine groups
//! on. Rows whose phone cannot be normalized are unlinkable and dropped
//! here; that is routine filtering on real exports, not an error.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::MergeConfig;
use crate::domain::InputRecord;
use crate::pipeline::processing::flags::normalize_flag;
use crate::pipeline::processing::phone::normalize_phone;

/// An input row that resolved to a canonical phone key.
#[derive(Debug, Clone)]
pub struct LinkedRecord {
    /// Canonical 10-digit key starting with `9`
    pub phone_key: String,
    /// The source row, unchanged
    pub record: InputRecord,
    /// Boolean purchase flags keyed by catalog code, filled by
    /// [`normalize_flags`]
    pub flags: BTreeMap<String, bool>,
}

/// Derives phone keys and filters out unlinkable rows. Returns the linked
/// rows and the count of rows dropped.
pub fn link_records(records: Vec<InputRecord>) -> (Vec<LinkedRecord>, usize) {
    let total = records.len();
    let linked: Vec<LinkedRecord> = records
        .into_iter()
        .filter_map(|record| {
            match normalize_phone(record.raw_phone.as_deref()) {
                Some(phone_key) => Some(LinkedRecord {
                    phone_key,
                    record,
                    flags: BTreeMap::new(),
                }),
                None => {
                    debug!(
                        row = record.original_order,
                        raw = record.raw_phone.as_deref().unwrap_or(""),
                        "dropping row with unlinkable phone"
                    );
                    None
                }
            }
        })
        .collect();

    let dropped = total - linked.len();
    (linked, dropped)
}

/// Coerces every catalog product cell to a boolean flag. Columns missing
/// from the input read as false, so later OR-aggregation needs no special
/// cases.
pub fn normalize_flags(records: &mut [LinkedRecord], config: &MergeConfig) {
    for linked in records {
        for code in config.product_codes() {
            let raw = linked.record.product_flags.get(code).map(|s| s.as_str());
            linked.flags.insert(code.to_string(), normalize_flag(raw));
        }
    }
}
