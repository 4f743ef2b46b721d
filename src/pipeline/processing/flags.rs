//! Product flag coercion.
//!
//! Purchase columns arrive as whatever the export produced: `1`, `1.0`,
//! `2`, empty cells, or text. Everything is collapsed to a boolean before
//! grouping so the merge can aggregate with a plain OR.

/// Coerces a raw product cell to a purchase flag. Missing values and parse
/// failures count as no purchase; any value strictly greater than zero is a
/// purchase.
pub fn normalize_flag(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => value.trim().parse::<f64>().map(|n| n > 0.0).unwrap_or(false),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_numbers_are_purchases() {
        assert!(normalize_flag(Some("1")));
        assert!(normalize_flag(Some("1.0")));
        assert!(normalize_flag(Some("3")));
        assert!(normalize_flag(Some(" 2 ")));
        assert!(normalize_flag(Some("0.5")));
    }

    #[test]
    fn zero_and_negatives_are_not() {
        assert!(!normalize_flag(Some("0")));
        assert!(!normalize_flag(Some("0.0")));
        assert!(!normalize_flag(Some("-1")));
    }

    #[test]
    fn missing_and_garbage_default_to_false() {
        assert!(!normalize_flag(None));
        assert!(!normalize_flag(Some("")));
        assert!(!normalize_flag(Some("yes")));
        assert!(!normalize_flag(Some("x1")));
    }
}
