//! Count normalization.
//!
//! Profile pages render counts as `1,243`, `77+` or `023`. Every value that
//! reaches a snapshot is re-serialized as a plain decimal: no separators, no
//! trailing `+`, no leading zeros.

/// Normalize a raw count into a plain decimal string.
///
/// Thousands separators and whitespace are dropped, then the leading run of
/// ASCII digits is parsed. Anything after that run (such as a `+` suffix) is
/// ignored. Returns `None` when no digits lead the value or the number does
/// not fit in a `u64`.
#[must_use]
pub fn normalize_count(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let digits: String = cleaned.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok().map(|n| n.to_string())
}

/// Whether `value` already satisfies the snapshot invariant.
#[must_use]
pub fn is_plain_count(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'))
}
