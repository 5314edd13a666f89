//! Identifier case conversion between struct field names and column names.
//!
//! Only ASCII `A-Z` counts as uppercase when segmenting; everything else
//! (digits, underscores, non-ASCII) is treated as "not uppercase".
//!
//! ```ignore
//! use sqlol::case::{camel_to_snake, snake_to_camel};
//!
//! assert_eq!(camel_to_snake("HTTPServer"), "http_server");
//! assert_eq!(snake_to_camel("user_id"), "UserId");
//! ```

/// Convert `CamelCase` (including acronym runs) to `snake_case`.
///
/// A new word starts after a non-uppercase character followed by an
/// uppercase one, and before the last capital of an acronym run that is
/// followed by a lowercase letter (`UserID` -> `user_id`,
/// `HTTPServer` -> `http_server`).
pub fn camel_to_snake(s: &str) -> String {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut words: Vec<&str> = Vec::new();
    let mut start = 0;

    for (i, c) in s.char_indices() {
        let end = i + c.len_utf8();
        if end >= len {
            break;
        }
        let next_upper = bytes[end].is_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            if next_upper {
                words.push(&s[start..end]);
                start = end;
            }
        } else if next_upper && end + 1 < len && !bytes[end + 1].is_ascii_uppercase() {
            words.push(&s[start..end]);
            start = end;
        }
    }
    if start < len {
        words.push(&s[start..]);
    }

    words.join("_").to_lowercase()
}

/// Convert `snake_case` to `PascalCase`.
///
/// Empty components (leading, trailing or doubled underscores) are dropped;
/// only the first character of each component is touched.
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Apply [`camel_to_snake`] to every name.
pub fn camels_to_snakes<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| camel_to_snake(n.as_ref()))
        .collect()
}
