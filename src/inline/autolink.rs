//! Autolinks and raw inline HTML at `<`
//!
//! Both matchers are anchored regexes over the unconsumed remainder. URI
//! autolinks take a scheme of 2 to 32 characters; email autolinks get a
//! `mailto:` destination. The inline HTML matcher accepts open and close
//! tags, comments, processing instructions, declarations, and CDATA, and
//! passes the matched span through verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

static AUTOLINK_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9+.\-]{1,31}:[^<>\x00-\x20]*)>").unwrap());

static AUTOLINK_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^<([a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+)>",
    )
    .unwrap()
});

static HTML_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(?:<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^ \t\n"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>"#,
        r"|</[A-Za-z][A-Za-z0-9-]*\s*>",
        r"|<!--(?s:.)*?-->",
        r"|<\?(?s:.)*?\?>",
        r"|<![A-Z][^>]*>",
        r"|<!\[CDATA\[(?s:.)*?\]\]>)",
    ))
    .unwrap()
});

/// `<scheme:…>` or `<user@host>`; returns (destination, display text, consumed)
pub(crate) fn scan_autolink(rest: &str) -> Option<(String, String, usize)> {
    if let Some(caps) = AUTOLINK_URI.captures(rest) {
        let inner = caps.get(1)?.as_str();
        let whole = caps.get(0)?.len();
        return Some((inner.to_string(), inner.to_string(), whole));
    }
    if let Some(caps) = AUTOLINK_EMAIL.captures(rest) {
        let inner = caps.get(1)?.as_str();
        let whole = caps.get(0)?.len();
        return Some((format!("mailto:{inner}"), inner.to_string(), whole));
    }
    None
}

/// Length of a raw inline HTML construct at the start of `rest`
pub(crate) fn scan_html_inline(rest: &str) -> Option<usize> {
    HTML_INLINE.find(rest).map(|m| m.len())
}
