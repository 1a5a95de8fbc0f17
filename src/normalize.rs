//! Input normalization and rule-conditional source rewrites
//!
//! Runs before block parsing. Two layers:
//!
//!     Text normalization:
//!         Line endings become `\n`, tabs expand to the next 4-column stop,
//!         and trailing whitespace is trimmed per line. The block and inline
//!         parsers can then assume space-only indentation.
//!
//!     Rule rewrites:
//!         A rewrite runs only when its owning rule is enabled. Contact-info
//!         wraps bare emails and phone numbers in `<mailto:…>` / `<tel:…>`
//!         guards so the inline rule sees an unambiguous span, and citation
//!         re-enumerates `【n】` markers densely starting at 1 in order of
//!         appearance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

pub const MAIL_PREFIX: &str = "mailto:";
pub const PHONE_PREFIX: &str = "tel:";

// Preceded by start of line or whitespace, followed by a non-word char or the
// end. A plain word boundary would match inside URLs, which include backslash
// and other word-boundary characters.
// - group 1: leading whitespace
// - group 2: the email
// - group 3: the trailing non-word char
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\s|^)([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})(\W|$)").unwrap()
});

// North American phone numbers only:
// - at the start of the text, or after whitespace or an open parenthesis
//   (avoids matching digit runs inside URLs and identifiers)
// - optional country code with +, 1 to 3 digits
// - area code parenthesized or bare, then 3-3-4 grouping
// - separators are required and may be space, hyphen, or period
// The regex crate has no lookbehind, so the leading context is a capture
// group that gets re-emitted in the replacement.
static PHONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\s|^|\()((\+?\d{1,3}[\s.-])?(?:\(\d{3}\)|\d{3})[\s.-]\d{3}[\s.-]\d{4})").unwrap()
});

static CITATION_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"【\d+】").unwrap());

/// Normalize line endings, expand tabs, trim trailing whitespace per line
pub fn normalize_text(src: &str) -> String {
    let unified = src.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = unified.split('\n').collect();
    // split leaves one empty segment after a trailing newline
    if lines.last() == Some(&"") {
        lines.pop();
    }
    let mut out = String::with_capacity(src.len());
    for line in lines {
        let mut column = 0usize;
        let mut expanded = String::with_capacity(line.len());
        for ch in line.chars() {
            if ch == '\t' {
                let next_stop = (column / 4 + 1) * 4;
                while column < next_stop {
                    expanded.push(' ');
                    column += 1;
                }
            } else {
                expanded.push(ch);
                column += 1;
            }
        }
        out.push_str(expanded.trim_end());
        out.push('\n');
    }
    out
}

fn apply_regex<'a>(src: Cow<'a, str>, regex: &Regex, replacement: &str) -> Cow<'a, str> {
    // replace_all returns a borrowed Cow when nothing matched; keep that
    // through the chain to avoid copying untouched documents.
    match src {
        Cow::Borrowed(s) => regex.replace_all(s, replacement),
        Cow::Owned(s) => {
            let result = regex.replace_all(&s, replacement);
            Cow::Owned(result.into_owned())
        }
    }
}

/// Wrap bare emails and phone numbers in autolink-style guards
pub fn guard_contact_info(src: Cow<'_, str>) -> Cow<'_, str> {
    let processed = apply_regex(src, &EMAIL_REGEX, &format!("$1<{}$2>$3", MAIL_PREFIX));
    apply_regex(processed, &PHONE_NUMBER_REGEX, &format!("$1<{}$2>", PHONE_PREFIX))
}

/// Re-enumerate citation markers densely starting at 1 in appearance order
pub fn reenumerate_citations(src: Cow<'_, str>) -> Cow<'_, str> {
    if !CITATION_MARKER_REGEX.is_match(&src) {
        return src;
    }
    let mut counter = 0usize;
    let result = CITATION_MARKER_REGEX.replace_all(&src, |_caps: &regex::Captures| {
        counter += 1;
        format!("【{}】", counter)
    });
    Cow::Owned(result.into_owned())
}

/// Full preprocessing: normalization plus the rewrites owned by enabled rules
pub fn prepare(src: &str, contact_info_enabled: bool, citation_enabled: bool) -> String {
    let normalized = normalize_text(src);
    let mut processed = Cow::Owned(normalized);
    if contact_info_enabled {
        processed = guard_contact_info(processed);
    }
    if citation_enabled {
        processed = reenumerate_citations(processed);
    }
    processed.into_owned()
}
