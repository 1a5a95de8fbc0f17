//! Line-level scanners for block starts
//!
//! Each scanner looks at one line (already stripped of container prefixes
//! and leading indent by the caller) and reports whether a construct starts
//! there. None of them consume anything; the parser decides what to do with
//! a match.

use crate::ast::Alignment;

/// A bullet or ordered list marker at the start of a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ListMarker {
    pub ordered: bool,
    /// Bullet char for bullet lists, delimiter (`.` or `)`) for ordered
    pub punct: u8,
    pub start: u64,
    /// Byte width of the marker itself, excluding any spacing after it
    pub width: usize,
}

pub(crate) fn scan_list_marker(rest: &str) -> Option<ListMarker> {
    let bytes = rest.as_bytes();
    match bytes.first()? {
        b'-' | b'+' | b'*' => {
            if matches!(bytes.get(1), None | Some(b' ')) {
                Some(ListMarker {
                    ordered: false,
                    punct: bytes[0],
                    start: 1,
                    width: 1,
                })
            } else {
                None
            }
        }
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 {
                return None;
            }
            let punct = *bytes.get(digits)?;
            if punct != b'.' && punct != b')' {
                return None;
            }
            if !matches!(bytes.get(digits + 1), None | Some(b' ')) {
                return None;
            }
            let start: u64 = rest[..digits].parse().ok()?;
            Some(ListMarker {
                ordered: true,
                punct,
                start,
                width: digits + 1,
            })
        }
        _ => None,
    }
}

/// Three or more `-`, `_`, or `*`, optionally space-separated, nothing else
pub(crate) fn scan_thematic_break(rest: &str) -> bool {
    let mut marker = 0u8;
    let mut count = 0usize;
    for c in rest.bytes() {
        match c {
            b' ' => {}
            b'-' | b'_' | b'*' => {
                if marker == 0 {
                    marker = c;
                } else if marker != c {
                    return false;
                }
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

/// `#` × 1..=6 followed by a space or end of line; trailing closing hashes
/// are stripped
pub(crate) fn scan_atx_heading(rest: &str) -> Option<(u8, String)> {
    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let tail = &rest[level..];
    if !tail.is_empty() && !tail.starts_with(' ') {
        return None;
    }
    let mut content = tail.trim();
    // optional closing run: `## heading ##`
    let trimmed = content.trim_end_matches('#');
    if trimmed.len() < content.len() {
        if trimmed.ends_with(' ') || trimmed.is_empty() {
            content = trimmed.trim_end();
        }
    }
    Some((level as u8, content.to_string()))
}

/// Opening code fence: the fence char, its length, and the info string
pub(crate) fn scan_fence_open(rest: &str) -> Option<(u8, usize, String)> {
    let ch = *rest.as_bytes().first()?;
    if ch != b'`' && ch != b'~' {
        return None;
    }
    let len = rest.bytes().take_while(|&b| b == ch).count();
    if len < 3 {
        return None;
    }
    let info = rest[len..].trim();
    // info strings of backtick fences cannot contain backticks
    if ch == b'`' && info.contains('`') {
        return None;
    }
    Some((ch, len, info.to_string()))
}

/// A closing fence: same char, at least the opening length, nothing after
pub(crate) fn is_fence_close(rest: &str, ch: u8, open_len: usize) -> bool {
    let len = rest.bytes().take_while(|&b| b == ch).count();
    len >= open_len && rest[len..].trim().is_empty()
}

/// Setext underline: a run of `=` (level 1) or `-` (level 2)
pub(crate) fn scan_setext(rest: &str) -> Option<u8> {
    let bytes = rest.as_bytes();
    let first = *bytes.first()?;
    if first != b'=' && first != b'-' {
        return None;
    }
    if !bytes.iter().all(|&b| b == first) {
        return None;
    }
    Some(if first == b'=' { 1 } else { 2 })
}

/// How an open HTML block ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HtmlBlockEnd {
    /// Closes on (and including) the line containing one of these markers
    Markers(&'static [&'static str]),
    /// Closes before the next blank line
    Blank,
}

const VERBATIM_TAGS: &[&str] = &["pre", "script", "style", "textarea"];
const VERBATIM_ENDS: &[&str] = &["</pre>", "</script>", "</style>", "</textarea>"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "center", "col", "colgroup",
    "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure",
    "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header",
    "hr", "html", "iframe", "legend", "li", "main", "menu", "nav", "ol", "optgroup", "option",
    "p", "param", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title",
    "tr", "ul",
];

/// Detect an HTML block opener at the start of a line
pub(crate) fn scan_html_block_start(rest: &str, in_paragraph: bool) -> Option<HtmlBlockEnd> {
    if !rest.starts_with('<') {
        return None;
    }
    let lower = rest.to_ascii_lowercase();

    for tag in VERBATIM_TAGS {
        let prefix = format!("<{tag}");
        if lower.starts_with(&prefix) {
            let after = lower.as_bytes().get(prefix.len());
            if matches!(after, None | Some(b' ' | b'>' | b'\t')) {
                return Some(HtmlBlockEnd::Markers(VERBATIM_ENDS));
            }
        }
    }
    if rest.starts_with("<!--") {
        return Some(HtmlBlockEnd::Markers(&["-->"]));
    }
    if rest.starts_with("<?") {
        return Some(HtmlBlockEnd::Markers(&["?>"]));
    }
    if rest.starts_with("<![CDATA[") {
        return Some(HtmlBlockEnd::Markers(&["]]>"]));
    }
    if rest.starts_with("<!") && rest.as_bytes().get(2).is_some_and(u8::is_ascii_alphabetic) {
        return Some(HtmlBlockEnd::Markers(&[">"]));
    }

    // block-level tag, open or close form
    let name_start = if lower.starts_with("</") { 2 } else { 1 };
    let name: String = lower[name_start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if BLOCK_TAGS.contains(&name.as_str()) {
        let after = lower.as_bytes().get(name_start + name.len());
        if matches!(after, None | Some(b' ' | b'\t' | b'>' | b'/')) {
            return Some(HtmlBlockEnd::Blank);
        }
    }

    // any other complete tag alone on its line, but never interrupting a
    // paragraph
    if !in_paragraph {
        if let Some(len) = crate::inline::autolink::scan_html_inline(rest) {
            if rest[len..].trim().is_empty() && !VERBATIM_TAGS.contains(&name.as_str()) {
                return Some(HtmlBlockEnd::Blank);
            }
        }
    }
    None
}

/// GFM table delimiter row (`| --- | :---: |`); returns per-column alignment
pub(crate) fn scan_table_delimiter(rest: &str) -> Option<Vec<Alignment>> {
    if !rest.contains('-') || !rest.contains('|') {
        return None;
    }
    let mut alignments = Vec::new();
    for cell in split_table_row(rest) {
        let cell = cell.trim();
        let colon_left = cell.starts_with(':');
        let colon_right = cell.ends_with(':');
        let dashes = cell
            .trim_start_matches(':')
            .trim_end_matches(':');
        if dashes.is_empty() || !dashes.bytes().all(|b| b == b'-') {
            return None;
        }
        alignments.push(match (colon_left, colon_right) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        });
    }
    if alignments.is_empty() {
        return None;
    }
    Some(alignments)
}

/// Split a table line into raw cell sources, honoring `\|` escapes
pub(crate) fn split_table_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => {
                cells.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}
