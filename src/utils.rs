//! src/utils.rs
//! Shared utility functions used across the codebase

/// Leading `max_chars` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Length in UTF-16 code units, the unit social platforms report text lengths in.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Strip markdown code fences from a string.
pub fn strip_code_fences(s: &str) -> &str {
    let trimmed = s.trim();

    // Try ```json ... ```
    if let Some(rest) = trimmed.strip_prefix("```json") {
        if let Some(json) = rest.strip_suffix("```") {
            return json.trim();
        }
    }
    // Try ``` ... ```
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(json) = rest.strip_suffix("```") {
            return json.trim();
        }
    }

    trimmed
}
