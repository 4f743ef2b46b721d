//! Display-name selection.
//!
//! Duplicate rows for one customer frequently disagree on the name: one row
//! has the real name, another a placeholder or a name with digits pasted in.
//! Validity dominates recency: a later digit-free name beats an earlier
//! digit-containing one.

use std::collections::HashMap;

use crate::config::MergeConfig;
use crate::domain::{CustomerRecord, InputRecord};
use crate::pipeline::processing::link::LinkedRecord;

/// Whether a name cell is usable as a display name. Rejects empty and
/// whitespace-only cells, cells equal to a configured null-ish token, cells
/// containing a configured placeholder phrase (both case-insensitive), and
/// anything containing a decimal digit.
pub fn is_valid_name(name: &str, config: &MergeConfig) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    // Null-ish tokens disqualify only as the whole cell; "Fernando" must not
    // fall to its embedded "nan"
    if config
        .null_tokens
        .iter()
        .any(|token| lowered == token.to_lowercase())
    {
        return false;
    }
    if config
        .placeholder_names
        .iter()
        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
    {
        return false;
    }
    !trimmed.chars().any(is_decimal_digit)
}

/// Decimal digits as the source data writes them: ASCII plus the
/// Arabic-Indic and Extended Arabic-Indic (Persian) ranges.
fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{0660}'..='\u{0669}').contains(&c) || ('\u{06F0}'..='\u{06F9}').contains(&c)
}

/// Selects the display name for one merge group: the first valid name by
/// original order, falling back to the literal first row's name when no row
/// has a valid one. The fallback is deliberate — a customer without any
/// valid name still merges, carrying the best-effort name as-is.
pub fn select_display_name<'a>(group: &[&'a InputRecord], config: &MergeConfig) -> &'a str {
    let mut first: Option<&'a InputRecord> = None;
    let mut first_valid: Option<&'a InputRecord> = None;

    for &record in group {
        if first.map_or(true, |f| record.original_order < f.original_order) {
            first = Some(record);
        }
        if is_valid_name(&record.name, config)
            && first_valid.map_or(true, |f| record.original_order < f.original_order)
        {
            first_valid = Some(record);
        }
    }

    // Groups are non-empty by construction
    first_valid.or(first).map(|r| r.name.as_str()).unwrap_or("")
}

/// Replaces each merged customer's provisional name with the preferred one
/// derived from its full contributing group.
pub fn resolve_display_names(
    customers: &mut [CustomerRecord],
    records: &[LinkedRecord],
    config: &MergeConfig,
) {
    let mut groups: HashMap<&str, Vec<&InputRecord>> = HashMap::new();
    for linked in records {
        groups
            .entry(linked.phone_key.as_str())
            .or_default()
            .push(&linked.record);
    }

    for customer in customers {
        if let Some(group) = groups.get(customer.phone_key.as_str()) {
            customer.display_name = select_display_name(group, config).to_string();
        }
    }
}
