//! Inline and display math
//!
//!     Dollar-delimited math spans: `$…$` inline, `$$…$$` display. Delimiter
//!     detection is deliberately conservative so currency amounts are never
//!     mistaken for math:
//!
//!     - an opening `$` cannot be followed by whitespace or another `$`
//!     - a closing `$` cannot be preceded by whitespace or a backslash, and
//!       cannot be followed by a word character or another `$`
//!     - the span cannot contain an unescaped `$`
//!
//!     Matched source is tokenized by a small LaTeX-subset lexer and rendered
//!     to MathML, never passed through as raw LaTeX. Content that fails to
//!     parse degrades to escaped plain text.

pub mod lexer;
pub mod mathml;

use crate::ast::NodeKind;
use crate::cache::MemoCache;
use crate::inline::InlineScan;
use crate::render::escape::escape_html;
use crate::rules::InlineRule;

// Characters that may immediately precede an opening `$` besides whitespace.
// Anything else (letters, digits, closing punctuation) reads as running text
// and the dollar is left alone.
const OPENER_CONTEXT: [char; 3] = ['*', '(', '：'];

/// Scan `$…$` starting at `pos`; returns the math source and consumed length
pub fn scan_inline_math(src: &str, pos: usize) -> Option<(String, usize)> {
    let input = &src[pos..];
    let mut chars = input.char_indices();
    let (_, first) = chars.next()?;
    if first != '$' {
        return None;
    }
    if let Some(prev) = src[..pos].chars().next_back() {
        if !prev.is_whitespace() && !OPENER_CONTEXT.contains(&prev) {
            return None;
        }
    }

    let (open_end, next) = chars.next()?;
    debug_assert_eq!(open_end, 1);
    if next == '$' || next.is_whitespace() {
        return None;
    }

    let close = find_unescaped_dollar(input, 1)?;
    let content = &input[1..close];
    if content.is_empty() {
        return None;
    }
    let last = content.chars().next_back()?;
    if last.is_whitespace() || last == '\\' {
        return None;
    }
    let after = input[close + 1..].chars().next();
    if let Some(c) = after {
        if c == '$' || c.is_alphanumeric() || c == '_' {
            return None;
        }
    }

    Some((content.to_string(), close + 1))
}

/// Scan `$$…$$` starting at `pos`
pub fn scan_display_math(src: &str, pos: usize) -> Option<(String, usize)> {
    let input = &src[pos..];
    if !input.starts_with("$$") {
        return None;
    }
    if src[..pos].ends_with('\\') {
        return None;
    }

    // first unescaped "$$" after the opener
    let mut search = 2;
    let close = loop {
        let idx = input[search..].find("$$")? + search;
        if input[..idx].ends_with('\\') {
            search = idx + 1;
            continue;
        }
        break idx;
    };

    let mut content = &input[2..close];
    content = content.strip_prefix('\n').unwrap_or(content);
    content = content.strip_suffix('\n').unwrap_or(content);

    Some((content.to_string(), close + 2))
}

pub struct MathInlineRule;

impl InlineRule for MathInlineRule {
    fn name(&self) -> &'static str {
        "math_inline"
    }

    fn marker(&self) -> char {
        '$'
    }

    fn priority(&self) -> i32 {
        20
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        let (source, consumed) = scan_inline_math(scan.src(), scan.pos())?;
        scan.emit(NodeKind::MathInline { source });
        Some(consumed)
    }
}

pub struct MathDisplayRule;

impl InlineRule for MathDisplayRule {
    fn name(&self) -> &'static str {
        "math_display"
    }

    fn marker(&self) -> char {
        '$'
    }

    // must beat the inline rule on `$$`
    fn priority(&self) -> i32 {
        10
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        let (source, consumed) = scan_display_math(scan.src(), scan.pos())?;
        scan.emit(NodeKind::MathDisplay { source });
        Some(consumed)
    }
}

fn find_unescaped_dollar(input: &str, from: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Render math source to MathML, optionally memoized
pub fn render_math(source: &str, display: bool, use_cache: bool, cache: &MemoCache) -> String {
    if use_cache {
        let tag = if display { "math-display" } else { "math-inline" };
        cache.get_or_insert_with(tag, source, || render_math_uncached(source, display))
    } else {
        render_math_uncached(source, display)
    }
}

fn render_math_uncached(source: &str, display: bool) -> String {
    let tokens = lexer::tokenize(source);
    match mathml::parse(&tokens) {
        Some(node) => mathml::emit(&node, display),
        // unbalanced braces or similar: present the source as plain text
        None => escape_html(source).into_owned(),
    }
}
