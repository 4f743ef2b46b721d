//! Merge engine.
//!
//! Collapses all linked rows sharing one canonical phone key into a single
//! customer record. Grouping order is unconstrained; the output is restored
//! to first-appearance order afterwards, and the earliest contributing row
//! (by original position, never by grouping order) supplies the sales rep.

use std::collections::{BTreeMap, HashMap};

use crate::config::MergeConfig;
use crate::domain::CustomerRecord;
use crate::pipeline::processing::link::LinkedRecord;

/// Groups linked rows by phone key and aggregates each group into one
/// [`CustomerRecord`]:
///
/// - sales rep from the earliest contributing row
/// - product flags OR-aggregated per catalog code
/// - non-empty descriptions joined with `" | "` in original-order
/// - `has_no_product` recomputed from the merged flags
///
/// The display name is provisionally the earliest row's name; the names
/// stage replaces it with the preferred valid name afterwards. Output rows
/// are sorted by first appearance in the input.
pub fn merge(records: &[LinkedRecord], config: &MergeConfig) -> Vec<CustomerRecord> {
    let mut groups: HashMap<&str, Vec<&LinkedRecord>> = HashMap::new();
    for linked in records {
        groups.entry(linked.phone_key.as_str()).or_default().push(linked);
    }

    let mut customers: Vec<CustomerRecord> = groups
        .into_iter()
        .map(|(phone_key, mut rows)| {
            rows.sort_by_key(|r| r.record.original_order);
            collapse_group(phone_key, &rows, config)
        })
        .collect();

    customers.sort_by_key(|c| c.first_appearance_order);
    customers
}

fn collapse_group(
    phone_key: &str,
    rows: &[&LinkedRecord],
    config: &MergeConfig,
) -> CustomerRecord {
    // Callers sort rows by original_order, so rows[0] is the earliest
    let earliest = rows[0];

    let mut product_flags = BTreeMap::new();
    for code in config.product_codes() {
        let purchased = rows
            .iter()
            .any(|r| r.flags.get(code).copied().unwrap_or(false));
        product_flags.insert(code.to_string(), purchased);
    }

    let descriptions: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.record.description.as_deref())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    let description = if descriptions.is_empty() {
        None
    } else {
        Some(descriptions.join(" | "))
    };

    let has_no_product = product_flags.values().all(|purchased| !purchased);

    CustomerRecord {
        phone_key: phone_key.to_string(),
        display_name: earliest.record.name.clone(),
        sales_rep: earliest.record.sales_rep.clone(),
        product_flags,
        description,
        has_no_product,
        first_appearance_order: earliest.record.original_order,
    }
}
