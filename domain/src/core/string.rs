//! String utilities for the domain layer.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Delimiter the ingestion step uses to join list-valued metadata fields.
pub const LIST_DELIMITER: &str = " ||| ";

/// Split a delimiter-joined metadata field back into its items.
///
/// Empty segments are dropped, so an empty column yields an empty list.
pub fn split_list_field(value: &str) -> Vec<&str> {
    value
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
