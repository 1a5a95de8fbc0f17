//! Citation rule
//!
//!     Matches `【n】` markers against the citation records supplied in the
//!     session options. Markers were re-enumerated during normalization, so
//!     `n` counts densely from 1 and indexes `citations[n - 1]`. A marker
//!     with no backing record is left as literal text rather than producing
//!     a dangling superscript.

use crate::ast::NodeKind;
use crate::inline::InlineScan;
use crate::rules::InlineRule;

pub(crate) const CITATION_OPEN: char = '【';
pub(crate) const CITATION_CLOSE: char = '】';

/// `【n】` at the start of `rest`; returns the index and consumed length
pub(crate) fn match_citation_marker(rest: &str) -> Option<(usize, usize)> {
    let body = rest.strip_prefix(CITATION_OPEN)?;
    let close = body.find(CITATION_CLOSE)?;
    let digits = &body[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    let consumed = CITATION_OPEN.len_utf8() + close + CITATION_CLOSE.len_utf8();
    Some((index, consumed))
}

pub struct CitationRule;

impl InlineRule for CitationRule {
    fn name(&self) -> &'static str {
        "citation"
    }

    fn marker(&self) -> char {
        CITATION_OPEN
    }

    fn priority(&self) -> i32 {
        50
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        let (index, consumed) = match_citation_marker(scan.rest())?;
        if index == 0 || scan.options().citation.citations.len() < index {
            return None;
        }
        scan.emit(NodeKind::Citation { index });
        Some(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_parsed() {
        let (index, consumed) = match_citation_marker("【3】 rest").unwrap();
        assert_eq!(index, 3);
        assert_eq!(consumed, "【3】".len());
    }

    #[test]
    fn test_marker_requires_digits() {
        assert!(match_citation_marker("【x】").is_none());
        assert!(match_citation_marker("【】").is_none());
    }

    #[test]
    fn test_marker_requires_close() {
        assert!(match_citation_marker("【3").is_none());
    }

    #[test]
    fn test_not_a_marker() {
        assert!(match_citation_marker("plain text").is_none());
    }
}
