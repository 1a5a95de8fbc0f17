//! Link rule
//!
//!     Scans `[label](destination "title")` spans and classifies every link
//!     URL at render time. Classification decides between three renderings:
//!     a plain anchor (with tracking parameters stripped and an optional
//!     `target="_blank"`), an embedded iframe for recognized video URLs, and
//!     unwrapping (label only, no anchor) for URLs that point into the
//!     proxied storage bucket.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::ast::NodeKind;
use crate::inline::InlineScan;
use crate::rules::config::LinkOptions;
use crate::rules::InlineRule;

/// Nested link/image labels beyond this depth are left as literal text
pub(crate) const MAX_LINK_DEPTH: usize = 32;

/// URLs under these prefixes are served through the content proxy
const PROXIED_URL_PREFIXES: &[&str] = &["https://storage.googleapis.com/kagi"];

/// Query parameters dropped from anchor hrefs
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
];

static YOUTUBE_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{6,}$").unwrap());

/// How a link node should be serialized
#[derive(Debug, Clone, PartialEq)]
pub enum LinkRender {
    Anchor { href: String, target_blank: bool },
    Iframe { html: String },
    /// Children only, no surrounding markup
    Unwrap,
}

pub fn is_url_to_be_proxied(url: &str) -> bool {
    PROXIED_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

/// Decide the rendering for one link URL
pub fn classify_link(url: &str, options: &LinkOptions) -> LinkRender {
    if options.remove_links_to_be_proxied && is_url_to_be_proxied(url) {
        return LinkRender::Unwrap;
    }
    if options.embed_third_party_content {
        if let Some(id) = parse_youtube_id(url) {
            return LinkRender::Iframe {
                html: youtube_iframe(&id),
            };
        }
    }
    LinkRender::Anchor {
        href: strip_tracking_params(url),
        target_blank: options.open_links_in_new_tab,
    }
}

/// Video id from watch, share, and embed URL shapes
pub fn parse_youtube_id(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let id = match host {
        "youtube.com" | "m.youtube.com" => {
            if parsed.path() == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())?
            } else {
                parsed.path().strip_prefix("/embed/")?.to_string()
            }
        }
        "youtu.be" => parsed.path().trim_start_matches('/').to_string(),
        _ => return None,
    };

    YOUTUBE_ID_REGEX.is_match(&id).then_some(id)
}

fn youtube_iframe(id: &str) -> String {
    format!(
        "<iframe src=\"https://www.youtube.com/embed/{id}\" \
         title=\"YouTube video player\" frameborder=\"0\" \
         allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; \
         gyroscope; picture-in-picture; web-share\" allowfullscreen></iframe>"
    )
}

/// Drop known tracking parameters; unparsable URLs pass through untouched
pub fn strip_tracking_params(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };
    if parsed.query().is_none() {
        return raw.to_string();
    }
    let all: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = all
        .iter()
        .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.as_str()))
        .collect();
    if kept.len() == all.len() {
        return raw.to_string();
    }
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        drop(pairs);
    }
    parsed.to_string()
}

/// `[label]`, brackets balanced, backslash escapes honored.
/// Returns the label slice and the index just past the closing bracket.
pub(crate) fn match_link_label(rest: &str) -> Option<(&str, usize)> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let mut depth = 0usize;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => {
                depth += 1;
                i += 1;
            }
            b']' => {
                if depth == 0 {
                    return Some((&rest[1..i], i + 1));
                }
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// `(destination "title")` starting at `start`; returns the unescaped
/// destination, the title (possibly empty), and the index past `)`
pub(crate) fn match_destination(rest: &str, start: usize) -> Option<(String, String, usize)> {
    let bytes = rest.as_bytes();
    if bytes.get(start) != Some(&b'(') {
        return None;
    }
    let mut i = skip_spaces(rest, start + 1);

    let url;
    if bytes.get(i) == Some(&b'<') {
        let mut j = i + 1;
        loop {
            match bytes.get(j) {
                Some(b'\\') => j += 2,
                Some(b'>') => break,
                Some(b'\n') | Some(b'<') | None => return None,
                Some(_) => j += 1,
            }
        }
        url = unescape(rest.get(i + 1..j)?);
        i = j + 1;
    } else {
        let mut paren_depth = 0usize;
        let mut j = i;
        while j < bytes.len() {
            match bytes[j] {
                b'\\' => j += 2,
                b'(' => {
                    paren_depth += 1;
                    j += 1;
                }
                b')' => {
                    if paren_depth == 0 {
                        break;
                    }
                    paren_depth -= 1;
                    j += 1;
                }
                c if c == b' ' || c == b'\t' || c == b'\n' || c < 0x20 => break,
                _ => j += 1,
            }
        }
        let j = j.min(bytes.len());
        url = unescape(rest.get(i..j)?);
        if url.is_empty() && bytes.get(j) != Some(&b')') {
            return None;
        }
        i = j;
    }

    i = skip_spaces(rest, i);
    let title = match bytes.get(i) {
        Some(&open @ (b'"' | b'\'')) => {
            let mut j = i + 1;
            loop {
                match bytes.get(j) {
                    Some(b'\\') => j += 2,
                    Some(&c) if c == open => break,
                    None => return None,
                    Some(_) => j += 1,
                }
            }
            let title = unescape(rest.get(i + 1..j)?);
            i = skip_spaces(rest, j + 1);
            title
        }
        _ => String::new(),
    };

    if bytes.get(i) != Some(&b')') {
        return None;
    }
    Some((url, title, i + 1))
}

fn skip_spaces(rest: &str, mut i: usize) -> usize {
    let bytes = rest.as_bytes();
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'\n')) {
        i += 1;
    }
    i
}

/// Remove backslashes before ASCII punctuation
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_punctuation() {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

pub struct LinkRule;

impl InlineRule for LinkRule {
    fn name(&self) -> &'static str {
        "link"
    }

    fn marker(&self) -> char {
        '['
    }

    fn priority(&self) -> i32 {
        40
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        if scan.depth() >= MAX_LINK_DEPTH {
            return None;
        }
        let rest = scan.rest();
        let (label, after_label) = match_link_label(rest)?;
        let (url, title, consumed) = match_destination(rest, after_label)?;
        let node = scan.emit(NodeKind::Link { url, title });
        scan.parse_into(node, label);
        Some(consumed)
    }
}
