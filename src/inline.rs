//! Inline scan
//!
//!     Converts the raw inline source of one leaf block into inline nodes.
//!     The scanner walks the source left to right, accumulating plain text
//!     between interesting positions. At each position the enabled extension
//!     rules are consulted first (in priority order, first match wins), then
//!     the core handlers: backslash escapes, code spans, autolinks and raw
//!     HTML at `<`, line breaks, and emphasis delimiter runs.
//!
//!     Emphasis is resolved after the scan: delimiter runs are recorded as
//!     plain text nodes plus stack entries, and a post-pass pairs openers
//!     with closers and restructures the children in place. Unpaired
//!     delimiters stay behind as the literal text they always were.

pub mod autolink;
pub mod code_span;
pub mod delimiter;

use crate::ast::{NodeId, NodeKind, Tree};
use crate::rules::config::Options;
use crate::rules::InlineRule;
use delimiter::Delimiter;

/// Inline pass configuration, borrowed from the session for one render
pub struct InlineParser<'a> {
    pub rules: &'a [Box<dyn InlineRule>],
    pub options: &'a Options,
    pub nl2br: bool,
}

impl InlineParser<'_> {
    /// Parse `src` and append the resulting inline nodes to `parent`
    pub fn parse_into(&self, tree: &mut Tree, parent: NodeId, src: &str) {
        self.parse_at_depth(tree, parent, src, 0);
    }

    pub(crate) fn parse_at_depth(&self, tree: &mut Tree, parent: NodeId, src: &str, depth: usize) {
        let scan = InlineScan {
            parser: self,
            tree,
            parent,
            src,
            pos: 0,
            text_start: 0,
            depth,
            delimiters: Vec::new(),
        };
        scan.run();
    }
}

/// Scanner state handed to inline rules
pub struct InlineScan<'p, 't, 's> {
    parser: &'p InlineParser<'p>,
    tree: &'t mut Tree,
    parent: NodeId,
    src: &'s str,
    pos: usize,
    text_start: usize,
    depth: usize,
    delimiters: Vec<Delimiter>,
}

impl<'p, 't, 's> InlineScan<'p, 't, 's> {
    /// The full inline source of this scan
    pub fn src(&self) -> &'s str {
        self.src
    }

    /// Current byte position within [`src`](Self::src)
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder of the source
    pub fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub fn options(&self) -> &Options {
        self.parser.options
    }

    /// Nesting depth of label recursion
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Flush pending text and append a node at the current position
    pub fn emit(&mut self, kind: NodeKind) -> NodeId {
        self.flush_text();
        self.tree.append(self.parent, kind)
    }

    /// Recursively parse `src` (a link or image label) into `node`
    pub fn parse_into(&mut self, node: NodeId, src: &str) {
        self.parser
            .parse_at_depth(self.tree, node, src, self.depth + 1);
    }

    fn flush_text(&mut self) {
        if self.text_start < self.pos {
            let literal = self.src[self.text_start..self.pos].to_string();
            self.tree.append(self.parent, NodeKind::Text { literal });
        }
        self.text_start = self.pos;
    }

    fn run(mut self) {
        while self.pos < self.src.len() {
            let Some(ch) = self.rest().chars().next() else {
                break;
            };
            if let Some(consumed) = self.try_rules(ch) {
                self.pos += consumed;
                self.text_start = self.pos;
                continue;
            }
            match ch {
                '\\' => self.backslash(),
                '`' => self.backtick(),
                '<' => self.angle(),
                '\n' => self.newline(),
                '*' | '_' => self.delimiter_run(ch),
                _ => self.pos += ch.len_utf8(),
            }
        }
        self.flush_text();

        let InlineScan {
            tree,
            parent,
            mut delimiters,
            ..
        } = self;
        delimiter::process_emphasis(tree, parent, &mut delimiters);
    }

    fn try_rules(&mut self, ch: char) -> Option<usize> {
        let rules = self.parser.rules;
        for rule in rules {
            if rule.marker() != ch {
                continue;
            }
            if let Some(consumed) = rule.scan(self) {
                debug_assert!(consumed > 0);
                return Some(consumed);
            }
        }
        None
    }

    fn backslash(&mut self) {
        let mut chars = self.rest().chars();
        chars.next();
        match chars.next() {
            Some('\n') => {
                self.flush_text();
                self.tree.append(self.parent, NodeKind::HardBreak);
                self.pos += 2;
                self.text_start = self.pos;
            }
            Some(c) if c.is_ascii_punctuation() => {
                self.flush_text();
                self.tree.append(
                    self.parent,
                    NodeKind::Text {
                        literal: c.to_string(),
                    },
                );
                self.pos += 1 + c.len_utf8();
                self.text_start = self.pos;
            }
            // literal backslash, stays in the pending text run
            _ => self.pos += 1,
        }
    }

    fn backtick(&mut self) {
        match code_span::scan_code_span(self.src, self.pos) {
            Some((literal, consumed)) => {
                self.emit(NodeKind::CodeSpan { literal });
                self.pos += consumed;
                self.text_start = self.pos;
            }
            None => {
                // unmatched run, consume it whole so its ticks cannot pair later
                let run = self.rest().bytes().take_while(|&b| b == b'`').count();
                self.pos += run;
            }
        }
    }

    fn angle(&mut self) {
        if let Some((url, text, consumed)) = autolink::scan_autolink(self.rest()) {
            let node = self.emit(NodeKind::Link {
                url,
                title: String::new(),
            });
            self.tree.append(node, NodeKind::Text { literal: text });
            self.pos += consumed;
            self.text_start = self.pos;
        } else if let Some(consumed) = autolink::scan_html_inline(self.rest()) {
            let raw = self.rest()[..consumed].to_string();
            self.emit(NodeKind::HtmlInline { raw });
            self.pos += consumed;
            self.text_start = self.pos;
        } else {
            self.pos += 1;
        }
    }

    fn newline(&mut self) {
        self.flush_text();
        let kind = if self.parser.nl2br {
            NodeKind::HardBreak
        } else {
            NodeKind::SoftBreak
        };
        self.tree.append(self.parent, kind);
        self.pos += 1;
        self.text_start = self.pos;
    }

    fn delimiter_run(&mut self, marker: char) {
        let run_len = self.rest().bytes().take_while(|&b| b == marker as u8).count();
        let prev = self.src[..self.pos].chars().next_back();
        let next = self.src[self.pos + run_len..].chars().next();
        let (can_open, can_close) = delimiter::flanking(marker, prev, next);

        self.flush_text();
        let literal = self.src[self.pos..self.pos + run_len].to_string();
        let node = self.tree.append(self.parent, NodeKind::Text { literal });
        self.delimiters.push(Delimiter {
            node,
            marker,
            len: run_len,
            orig_len: run_len,
            can_open,
            can_close,
            active: true,
        });
        self.pos += run_len;
        self.text_start = self.pos;
    }
}
