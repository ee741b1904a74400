//! Field-name parsing for sync grouping.
//!
//! A field participates in grouping only when its full name is a run of
//! ASCII letters followed by a run of ASCII digits (`title1`,
//! `projectTitle2`). Partial matches never qualify.

/// Split a field name into its letter prefix and digit suffix.
///
/// Returns `None` unless the whole name is letters-then-digits with both
/// parts non-empty. Allocation-free; prefix comparison is case-sensitive
/// (`Title1` and `title1` have different prefixes).
pub fn parse_field_name(name: &str) -> Option<(&str, &str)> {
    let digits_at = name.find(|c: char| c.is_ascii_digit())?;
    if digits_at == 0 {
        return None;
    }
    let (prefix, suffix) = name.split_at(digits_at);
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !suffix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((prefix, suffix))
}
