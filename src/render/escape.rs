//! HTML escaping
//!
//! One escaping pass per text node, applied at serialization time only, so
//! already-escaped entities in the output are never escaped a second time.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` for element content and attribute values
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let first = input.find(['&', '<', '>', '"']);
    let Some(first) = first else {
        return Cow::Borrowed(input);
    };
    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
