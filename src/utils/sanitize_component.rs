// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Produce object-storage-safe key components from registrant input.

/// Fallback used when nothing printable survives sanitization.
const FALLBACK_COMPONENT: &str = "registrant";

/// Produce a storage-safe key component.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Peña" → "Pena").
/// - Allow ASCII alphanumerics plus `-` and `_`; treat other characters as `_`.
/// - Collapse runs of `_` and trim them from both ends.
/// - Fall back to `registrant` when the result is empty.
///
/// Supabase Storage rejects keys with many non-ASCII characters, so the
/// registrant's name goes through here before it becomes part of a key.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());
    let mut last: Option<char> = None;

    for ch in transliterated.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            ch
        } else {
            '_'
        };

        if mapped == '_' && last == Some('_') {
            continue;
        }
        out.push(mapped);
        last = Some(mapped);
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        return FALLBACK_COMPONENT.to_string();
    }

    trimmed.to_string()
}

/// Sanitize a file extension, returning `None` when nothing usable remains.
pub fn sanitize_extension(ext: &str) -> Option<String> {
    let cleaned: String = deunicode::deunicode(ext)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
