//! Canonical phone key derivation.
//!
//! Phone cells in exported customer lists arrive in every imaginable shape:
//! leading zeros, `98` country codes, stray punctuation, concatenated
//! extensions. Normalization favors recall over strict validation — it
//! extracts the most plausible Iranian mobile number (10 digits starting
//! with `9`) but never fabricates a digit.

/// Normalizes an arbitrary phone cell into a canonical 10-digit key starting
/// with `9`, or `None` when no such key can be derived. Rows that yield
/// `None` cannot be linked and are dropped upstream of the merge.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let digits = extract_digits(raw);
    if digits.len() < 10 {
        return None;
    }
    let bytes = digits.as_bytes();

    // 11 digits with a leading zero: drop the zero, keep if it exposes a 9
    if digits.len() == 11 && bytes[0] == b'0' {
        if bytes[1] == b'9' {
            return Some(digits[1..].to_string());
        }
    } else if digits.len() == 10 && bytes[0] == b'9' {
        return Some(digits);
    } else if digits.len() > 11 {
        // Country-code or otherwise over-long values: prefer the trailing
        // 11-digit `09…` run, then the trailing 10-digit `9…` run, then any
        // 10-digit `9…` substring scanning left to right
        let last_11 = &digits[digits.len() - 11..];
        if last_11.as_bytes()[0] == b'0' && last_11.as_bytes()[1] == b'9' {
            return Some(last_11[1..].to_string());
        }
        let last_10 = &digits[digits.len() - 10..];
        if last_10.as_bytes()[0] == b'9' {
            return Some(last_10.to_string());
        }
        if let Some(found) = scan_for_mobile(&digits) {
            return Some(found);
        }
    }

    // Exactly 10 digits not starting with 9: the leading 9 is genuinely
    // missing and cannot be guessed
    if digits.len() == 10 {
        return None;
    }

    // Anything else of length >= 10 that fell through the specific branches
    scan_for_mobile(&digits)
}

/// Re-renders a stored phone value for output. Already-canonical keys pass
/// through unchanged; non-conforming values get one more extraction attempt
/// before falling back to the original text. Formatting never drops a row.
pub fn format_phone(stored: &str) -> String {
    let digits = extract_digits(stored);
    let bytes = digits.as_bytes();

    if digits.len() == 11 && bytes[0] == b'0' && bytes[1] == b'9' {
        return digits[1..].to_string();
    }
    if digits.len() == 10 && bytes[0] == b'9' {
        return digits;
    }
    if digits.len() >= 10 {
        if let Some(found) = scan_for_mobile(&digits) {
            return found;
        }
    }
    stored.to_string()
}

/// Keeps only decimal digits, folding Arabic-Indic and Extended Arabic-Indic
/// (Persian) digits to their ASCII value so keys stay in one script. Folding
/// translates a digit, it never invents one.
fn extract_digits(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
            '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
            _ => None,
        })
        .collect()
}

/// First contiguous 10-digit substring starting with `9`, left to right.
fn scan_for_mobile(digits: &str) -> Option<String> {
    let bytes = digits.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    for i in 0..=bytes.len() - 10 {
        if bytes[i] == b'9' {
            return Some(digits[i..i + 10].to_string());
        }
    }
    None
}
