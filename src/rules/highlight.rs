//! Code highlight rule
//!
//!     A tree rule that rewrites fenced code blocks with a recognized
//!     language tag into pre-rendered highlight markup. The output follows
//!     the codehilite convention: a `<div class="codehilite">` wrapper, span
//!     classes from the Pygments short-name set (`k`, `kt`, `s`, `mi`,
//!     `c1`), and an optional filename banner when the info string carries
//!     one after the language tag. With `pygments_classes` disabled the same
//!     spans carry inline style attributes instead, for output consumed
//!     without a stylesheet.
//!
//!     Unknown languages and indented code blocks are left alone; the plain
//!     `<pre><code>` rendering remains correct for them.

pub mod langs;

use crate::ast::{NodeId, NodeKind, Tree};
use crate::cache::MemoCache;
use crate::render::escape::escape_html;
use crate::rules::config::Options;
use crate::rules::TreeRule;
use langs::Language;

pub struct HighlightRule;

impl TreeRule for HighlightRule {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn apply(&self, tree: &mut Tree, options: &Options, cache: &MemoCache) {
        let targets: Vec<NodeId> = tree
            .walk()
            .into_iter()
            .filter(|&id| {
                matches!(
                    tree.kind(id),
                    NodeKind::CodeBlock { fenced: true, lang, .. } if langs::lookup(first_word(lang)).is_some()
                )
            })
            .collect();

        for id in targets {
            let NodeKind::CodeBlock { lang, literal, .. } = tree.kind(id) else {
                continue;
            };
            let tag = first_word(lang).to_string();
            let filename = filename_of(lang).map(str::to_string);
            let Some(language) = langs::lookup(&tag) else {
                continue;
            };
            let literal = literal.clone();
            let classes = options.highlight.pygments_classes;

            let html = if options.highlight.cache {
                let key = format!("{}\u{1f}{}\u{1f}{}", lang, classes, literal);
                cache.get_or_insert_with("highlight", &key, || {
                    render_block(language, filename.as_deref(), &literal, classes)
                })
            } else {
                render_block(language, filename.as_deref(), &literal, classes)
            };

            *tree.kind_mut(id) = NodeKind::HighlightedCode { lang: tag, html };
        }
    }
}

fn first_word(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

/// The info-string word after the language, if present
fn filename_of(info: &str) -> Option<&str> {
    info.split_whitespace().nth(1)
}

fn render_block(
    language: &Language,
    filename: Option<&str>,
    code: &str,
    pygments_classes: bool,
) -> String {
    let mut out = String::new();
    if let Some(name) = filename {
        out.push_str("<div class=\"codehilite-wrapper\"><div class=\"codehilite-filename\">");
        out.push_str(&escape_html(name));
        out.push_str("</div>");
    }
    out.push_str("<div class=\"codehilite\"><pre><code>");
    highlight_into(&mut out, language, code, pygments_classes);
    out.push_str("</code></pre></div>");
    if filename.is_some() {
        out.push_str("</div>");
    }
    out
}

/// Pygments short class name to default-theme inline style
fn style_for(class: &str) -> &'static str {
    match class {
        "k" => "color:#008000;font-weight:bold",
        "kt" => "color:#b00040",
        "s" => "color:#ba2121",
        "mi" => "color:#666666",
        "c1" => "color:#408080;font-style:italic",
        _ => "",
    }
}

fn push_span(out: &mut String, class: &str, text: &str, pygments_classes: bool) {
    if pygments_classes {
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">");
    } else {
        out.push_str("<span style=\"");
        out.push_str(style_for(class));
        out.push_str("\">");
    }
    out.push_str(&escape_html(text));
    out.push_str("</span>");
}

/// Single-pass scanner: comments, strings, numbers, keywords; everything
/// else passes through escaped
fn highlight_into(out: &mut String, language: &Language, code: &str, pygments_classes: bool) {
    let bytes = code.as_bytes();
    let mut i = 0;
    let mut plain_start = 0;

    let mut flush = |out: &mut String, from: usize, to: usize| {
        if from < to {
            out.push_str(&escape_html(&code[from..to]));
        }
    };

    while i < bytes.len() {
        // line comment
        if !language.line_comment.is_empty() && code[i..].starts_with(language.line_comment) {
            flush(out, plain_start, i);
            let end = code[i..]
                .find('\n')
                .map(|n| i + n)
                .unwrap_or(bytes.len());
            push_span(out, "c1", &code[i..end], pygments_classes);
            i = end;
            plain_start = i;
            continue;
        }
        let c = bytes[i];
        // string literal
        if language.string_delims.contains(&(c as char)) {
            flush(out, plain_start, i);
            let mut j = i + 1;
            while j < bytes.len() {
                if bytes[j] == b'\\' {
                    j += 2;
                } else if bytes[j] == c || bytes[j] == b'\n' {
                    j += 1;
                    break;
                } else {
                    j += 1;
                }
            }
            let j = j.min(bytes.len());
            let end = ceil_char_boundary(code, j);
            push_span(out, "s", &code[i..end], pygments_classes);
            i = end;
            plain_start = i;
            continue;
        }
        // number
        if c.is_ascii_digit() && !prev_is_word(bytes, i) {
            flush(out, plain_start, i);
            let mut j = i + 1;
            while j < bytes.len()
                && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'.' || bytes[j] == b'_')
            {
                j += 1;
            }
            push_span(out, "mi", &code[i..j], pygments_classes);
            i = j;
            plain_start = i;
            continue;
        }
        // identifier
        if c == b'_' || c.is_ascii_alphabetic() {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            let word = &code[i..j];
            if language.keywords.contains(&word) {
                flush(out, plain_start, i);
                push_span(out, "k", word, pygments_classes);
                plain_start = j;
            } else if language.types.contains(&word) {
                flush(out, plain_start, i);
                push_span(out, "kt", word, pygments_classes);
                plain_start = j;
            }
            i = j;
            continue;
        }
        i += next_char_len(code, i);
    }
    flush(out, plain_start, bytes.len());
}

fn prev_is_word(bytes: &[u8], i: usize) -> bool {
    i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_')
}

fn next_char_len(code: &str, i: usize) -> usize {
    code[i..].chars().next().map(char::len_utf8).unwrap_or(1)
}

fn ceil_char_boundary(code: &str, mut i: usize) -> usize {
    while i < code.len() && !code.is_char_boundary(i) {
        i += 1;
    }
    i.min(code.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::config::HighlightOptions;

    fn apply(source_lang: &str, literal: &str, opts: HighlightOptions) -> NodeKind {
        let mut tree = Tree::new();
        let root = tree.root();
        let id = tree.append(
            root,
            NodeKind::CodeBlock {
                lang: source_lang.to_string(),
                literal: literal.to_string(),
                fenced: true,
            },
        );
        let mut options = Options::default();
        options.highlight = opts;
        let cache = MemoCache::default();
        HighlightRule.apply(&mut tree, &options, &cache);
        tree.kind(id).clone()
    }

    #[test]
    fn test_keyword_highlighted_with_classes() {
        let kind = apply("rust", "fn main() {}", HighlightOptions::default());
        let NodeKind::HighlightedCode { lang, html } = kind else {
            panic!("expected highlighted code, got {kind:?}");
        };
        assert_eq!(lang, "rust");
        assert!(html.contains("<div class=\"codehilite\">"), "{html}");
        assert!(html.contains("<span class=\"k\">fn</span>"), "{html}");
    }

    #[test]
    fn test_inline_styles_without_classes() {
        let opts = HighlightOptions {
            pygments_classes: false,
            ..HighlightOptions::default()
        };
        let kind = apply("rust", "fn main() {}", opts);
        let NodeKind::HighlightedCode { html, .. } = kind else {
            panic!("expected highlighted code");
        };
        assert!(html.contains("<span style=\""), "{html}");
        assert!(!html.contains("<span class="), "{html}");
    }

    #[test]
    fn test_unknown_language_untouched() {
        let kind = apply("klingon", "nuqneH", HighlightOptions::default());
        assert!(matches!(kind, NodeKind::CodeBlock { .. }));
    }

    #[test]
    fn test_indented_block_untouched() {
        let mut tree = Tree::new();
        let root = tree.root();
        let id = tree.append(
            root,
            NodeKind::CodeBlock {
                lang: String::new(),
                literal: "fn main() {}".to_string(),
                fenced: false,
            },
        );
        let options = Options::default();
        let cache = MemoCache::default();
        HighlightRule.apply(&mut tree, &options, &cache);
        assert!(matches!(tree.kind(id), NodeKind::CodeBlock { .. }));
    }

    #[test]
    fn test_filename_banner() {
        let kind = apply("rust main.rs", "fn main() {}", HighlightOptions::default());
        let NodeKind::HighlightedCode { html, .. } = kind else {
            panic!("expected highlighted code");
        };
        assert!(
            html.contains("<div class=\"codehilite-filename\">main.rs</div>"),
            "{html}"
        );
    }

    #[test]
    fn test_string_and_comment_spans() {
        let kind = apply(
            "python",
            "# note\nx = \"hi\"",
            HighlightOptions::default(),
        );
        let NodeKind::HighlightedCode { html, .. } = kind else {
            panic!("expected highlighted code");
        };
        assert!(html.contains("<span class=\"c1\"># note</span>"), "{html}");
        assert!(html.contains("<span class=\"s\">&quot;hi&quot;</span>"), "{html}");
    }

    #[test]
    fn test_content_is_escaped() {
        let kind = apply("rust", "let a = b < c;", HighlightOptions::default());
        let NodeKind::HighlightedCode { html, .. } = kind else {
            panic!("expected highlighted code");
        };
        assert!(html.contains("b &lt; c"), "{html}");
    }

    #[test]
    fn test_cached_once() {
        let cache = MemoCache::default();
        let options = Options::default();
        for _ in 0..2 {
            let mut tree = Tree::new();
            let root = tree.root();
            tree.append(
                root,
                NodeKind::CodeBlock {
                    lang: "rust".to_string(),
                    literal: "fn main() {}".to_string(),
                    fenced: true,
                },
            );
            HighlightRule.apply(&mut tree, &options, &cache);
        }
        assert_eq!(cache.len(), 1);
    }
}
