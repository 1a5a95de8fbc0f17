//! Block parse
//!
//!     A line-driven state machine over a stack of open blocks. For each
//!     line the parser first re-matches the open container chain (blockquote
//!     markers, list item indentation), then lets a matched verbatim leaf
//!     (fenced code, HTML block, indented code, table) consume the line, and
//!     otherwise looks for new block starts in the remaining text. A plain
//!     text line that starts nothing continues an open paragraph, including
//!     the lazy form where container markers are omitted.
//!
//!     Input arrives pre-normalized: line endings are `\n`, tabs are
//!     expanded, trailing whitespace is trimmed. Leaf blocks that carry
//!     inline content (paragraphs, headings, table cells) end up with a
//!     single text child holding the raw inline source; the inline pass
//!     replaces it later.

pub mod scan;

use crate::ast::{Alignment, NodeId, NodeKind, Tree};
use scan::{HtmlBlockEnd, ListMarker};

/// Parse normalized source into a block-level tree
pub fn parse(src: &str) -> Tree {
    let mut parser = Parser::new();
    for line in src.split('\n') {
        parser.line(line);
    }
    parser.finish()
}

enum Data {
    Document,
    Blockquote,
    List {
        marker: ListMarker,
        blank_pending: bool,
        loose: bool,
    },
    ListItem {
        indent: usize,
    },
    Paragraph {
        lines: Vec<String>,
    },
    FencedCode {
        ch: u8,
        len: usize,
        indent: usize,
        content: String,
    },
    IndentedCode {
        lines: Vec<String>,
    },
    HtmlBlock {
        end: HtmlBlockEnd,
        lines: Vec<String>,
    },
    Table,
}

struct Open {
    node: NodeId,
    data: Data,
}

impl Open {
    fn is_container(&self) -> bool {
        matches!(
            self.data,
            Data::Document | Data::Blockquote | Data::List { .. } | Data::ListItem { .. }
        )
    }
}

struct Parser {
    tree: Tree,
    stack: Vec<Open>,
}

fn count_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

impl Parser {
    fn new() -> Self {
        let tree = Tree::new();
        let root = tree.root();
        Parser {
            tree,
            stack: vec![Open {
                node: root,
                data: Data::Document,
            }],
        }
    }

    fn line(&mut self, line: &str) {
        let (matched, pos) = self.match_containers(line);
        let all_matched =
            matched >= self.stack.len() || !self.stack[matched].is_container();

        if all_matched && matched < self.stack.len() {
            match self.stack[matched].data {
                Data::FencedCode { .. } => {
                    self.fenced_line(&line[pos..]);
                    return;
                }
                Data::HtmlBlock { .. } => {
                    self.html_line(&line[pos..]);
                    return;
                }
                Data::IndentedCode { .. } => {
                    if self.indented_line(&line[pos..]) {
                        return;
                    }
                    self.truncate(matched);
                    self.open_blocks(line, self.stack.len(), pos);
                    return;
                }
                Data::Table => {
                    if self.table_line(&line[pos..]) {
                        return;
                    }
                    self.truncate(matched);
                    self.open_blocks(line, self.stack.len(), pos);
                    return;
                }
                _ => {}
            }
        }

        self.open_blocks(line, matched, pos);
    }

    /// Re-match open containers against a new line. Returns the index of the
    /// first stack entry that did not match (or is a leaf) and the position
    /// after the consumed container prefixes.
    fn match_containers(&mut self, line: &str) -> (usize, usize) {
        enum Step {
            Consume(usize),
            ConsumeItem(usize),
            Match,
            Stop,
        }

        let mut pos = 0usize;
        let mut idx = 1;
        while idx < self.stack.len() {
            let rest = &line[pos..];
            let step = match &self.stack[idx].data {
                Data::Blockquote => {
                    let indent = count_spaces(rest);
                    if indent <= 3 && rest.as_bytes().get(indent) == Some(&b'>') {
                        let mut consumed = indent + 1;
                        if rest.as_bytes().get(consumed) == Some(&b' ') {
                            consumed += 1;
                        }
                        Step::Consume(consumed)
                    } else {
                        Step::Stop
                    }
                }
                // item continuation decides; the list itself stays open
                Data::List { .. } => Step::Match,
                Data::ListItem { indent } => {
                    if rest.trim().is_empty() {
                        Step::Match
                    } else if count_spaces(rest) >= *indent {
                        Step::ConsumeItem(*indent)
                    } else {
                        Step::Stop
                    }
                }
                _ => Step::Stop,
            };
            match step {
                Step::Consume(n) => {
                    pos += n;
                    idx += 1;
                }
                Step::ConsumeItem(n) => {
                    pos += n;
                    self.note_list_content(idx);
                    idx += 1;
                }
                Step::Match => idx += 1,
                Step::Stop => break,
            }
        }
        (idx, pos)
    }

    /// Content arrived inside the list containing the item at `item_idx`;
    /// a pending blank line now makes the list loose
    fn note_list_content(&mut self, item_idx: usize) {
        if item_idx == 0 {
            return;
        }
        if let Data::List {
            blank_pending,
            loose,
            ..
        } = &mut self.stack[item_idx - 1].data
        {
            if *blank_pending {
                *loose = true;
                *blank_pending = false;
            }
        }
    }

    fn open_blocks(&mut self, line: &str, matched: usize, start_pos: usize) {
        let mut matched = matched;
        let mut pos = start_pos;
        let mut opened_container = false;

        loop {
            let rest = &line[pos..];
            if rest.trim().is_empty() {
                self.blank_line(matched, opened_container);
                return;
            }
            let indent = count_spaces(rest);
            let content = &rest[indent..];

            // a matched paragraph right on top of the stack
            let para_on_top = matched + 1 == self.stack.len()
                && matches!(self.stack[matched].data, Data::Paragraph { .. });

            if indent <= 3 && para_on_top {
                if let Some(level) = scan::scan_setext(content) {
                    self.finish_setext(level);
                    return;
                }
                if let Some(aligns) = scan::scan_table_delimiter(content) {
                    if self.try_begin_table(aligns) {
                        return;
                    }
                }
            }

            if indent >= 4 {
                if self.trailing_paragraph() {
                    self.append_paragraph_line(content);
                } else {
                    self.truncate(matched);
                    self.pop_lists();
                    self.push_indented_code(&rest[4..]);
                }
                return;
            }

            // blockquote marker
            if content.starts_with('>') {
                self.truncate(matched);
                self.pop_lists();
                let node = self.append_under_top(NodeKind::Blockquote);
                self.stack.push(Open {
                    node,
                    data: Data::Blockquote,
                });
                pos += indent + 1;
                if line.as_bytes().get(pos) == Some(&b' ') {
                    pos += 1;
                }
                matched = self.stack.len();
                opened_container = true;
                continue;
            }

            if scan::scan_thematic_break(content) {
                self.truncate(matched);
                self.pop_lists();
                self.append_under_top(NodeKind::ThematicBreak);
                return;
            }

            if let Some(marker) = scan::scan_list_marker(content) {
                let after = &content[marker.width..];
                let spaces = count_spaces(after);
                let empty_item = after.trim().is_empty();
                let blocked = para_on_top && (empty_item || (marker.ordered && marker.start != 1));
                if !blocked {
                    self.truncate(matched);
                    let content_indent = if empty_item || spaces > 4 {
                        marker.width + 1
                    } else {
                        marker.width + spaces
                    };
                    self.begin_list_item(marker, indent + content_indent);
                    pos += indent + marker.width + spaces.min(content_indent - marker.width);
                    matched = self.stack.len();
                    opened_container = true;
                    continue;
                }
            }

            if let Some((level, text)) = scan::scan_atx_heading(content) {
                self.truncate(matched);
                self.pop_lists();
                let node = self.append_under_top(NodeKind::Heading { level });
                if !text.is_empty() {
                    self.tree.append(node, NodeKind::Text { literal: text });
                }
                return;
            }

            if let Some((ch, len, info)) = scan::scan_fence_open(content) {
                self.truncate(matched);
                self.pop_lists();
                let node = self.append_under_top(NodeKind::CodeBlock {
                    lang: info,
                    literal: String::new(),
                    fenced: true,
                });
                self.stack.push(Open {
                    node,
                    data: Data::FencedCode {
                        ch,
                        len,
                        indent,
                        content: String::new(),
                    },
                });
                return;
            }

            if let Some(end) = scan::scan_html_block_start(content, self.trailing_paragraph()) {
                self.truncate(matched);
                self.pop_lists();
                let node = self.append_under_top(NodeKind::HtmlBlock { raw: String::new() });
                self.stack.push(Open {
                    node,
                    data: Data::HtmlBlock {
                        end,
                        lines: Vec::new(),
                    },
                });
                // the opening line may already contain the end marker
                self.html_line(rest);
                return;
            }

            // paragraph text, possibly a lazy continuation of an unmatched one
            if self.trailing_paragraph() {
                self.append_paragraph_line(content);
            } else {
                self.truncate(matched);
                self.pop_lists();
                let node = self.append_under_top(NodeKind::Paragraph);
                self.stack.push(Open {
                    node,
                    data: Data::Paragraph {
                        lines: vec![content.to_string()],
                    },
                });
            }
            return;
        }
    }

    fn blank_line(&mut self, matched: usize, opened_container: bool) {
        self.truncate(matched.max(1));
        if opened_container {
            return;
        }
        for open in &mut self.stack {
            if let Data::List { blank_pending, .. } = &mut open.data {
                *blank_pending = true;
            }
        }
    }

    /// True when the deepest open block is a paragraph (matched or not)
    fn trailing_paragraph(&self) -> bool {
        matches!(
            self.stack.last().map(|o| &o.data),
            Some(Data::Paragraph { .. })
        )
    }

    fn append_paragraph_line(&mut self, content: &str) {
        if let Some(Open {
            data: Data::Paragraph { lines },
            ..
        }) = self.stack.last_mut()
        {
            lines.push(content.to_string());
        }
    }

    fn begin_list_item(&mut self, marker: ListMarker, item_indent: usize) {
        let compatible = matches!(
            self.stack.last().map(|o| &o.data),
            Some(Data::List { marker: m, .. })
                if m.ordered == marker.ordered && m.punct == marker.punct
        );
        if !compatible {
            self.pop_lists();
            let node = self.append_under_top(NodeKind::List {
                ordered: marker.ordered,
                start: marker.start,
                tight: true,
            });
            self.stack.push(Open {
                node,
                data: Data::List {
                    marker,
                    blank_pending: false,
                    loose: false,
                },
            });
        } else if let Some(Open {
            data: Data::List {
                blank_pending,
                loose,
                ..
            },
            ..
        }) = self.stack.last_mut()
        {
            // a blank line followed by another item makes the list loose
            if *blank_pending {
                *loose = true;
                *blank_pending = false;
            }
        }
        let node = self.append_under_top(NodeKind::ListItem);
        self.stack.push(Open {
            node,
            data: Data::ListItem {
                indent: item_indent,
            },
        });
    }

    fn push_indented_code(&mut self, first_line: &str) {
        let node = self.append_under_top(NodeKind::CodeBlock {
            lang: String::new(),
            literal: String::new(),
            fenced: false,
        });
        self.stack.push(Open {
            node,
            data: Data::IndentedCode {
                lines: vec![first_line.to_string()],
            },
        });
    }

    /// Returns false when the line dedents out of the code block
    fn indented_line(&mut self, rest: &str) -> bool {
        let blank = rest.trim().is_empty();
        let Some(Open {
            data: Data::IndentedCode { lines },
            ..
        }) = self.stack.last_mut()
        else {
            return false;
        };
        if blank {
            lines.push(String::new());
            true
        } else if count_spaces(rest) >= 4 {
            lines.push(rest[4..].to_string());
            true
        } else {
            false
        }
    }

    fn fenced_line(&mut self, rest: &str) {
        let top = self.stack.len() - 1;
        let (ch, len, indent) = match &self.stack[top].data {
            Data::FencedCode {
                ch, len, indent, ..
            } => (*ch, *len, *indent),
            _ => return,
        };
        let line_indent = count_spaces(rest);
        if line_indent <= 3 && scan::is_fence_close(&rest[line_indent..], ch, len) {
            self.truncate(top);
            return;
        }
        // strip at most the opening fence's indent
        let strip = line_indent.min(indent);
        if let Data::FencedCode { content, .. } = &mut self.stack[top].data {
            content.push_str(&rest[strip..]);
            content.push('\n');
        }
    }

    fn html_line(&mut self, rest: &str) {
        let top = self.stack.len() - 1;
        let end = match &self.stack[top].data {
            Data::HtmlBlock { end, .. } => *end,
            _ => return,
        };
        let close = match end {
            HtmlBlockEnd::Markers(markers) => {
                if let Data::HtmlBlock { lines, .. } = &mut self.stack[top].data {
                    lines.push(rest.to_string());
                }
                markers.iter().any(|m| rest.contains(m))
            }
            HtmlBlockEnd::Blank => {
                if rest.trim().is_empty() {
                    true
                } else {
                    if let Data::HtmlBlock { lines, .. } = &mut self.stack[top].data {
                        lines.push(rest.to_string());
                    }
                    false
                }
            }
        };
        if close {
            self.truncate(top);
        }
    }

    /// Returns false when the line no longer belongs to the table
    fn table_line(&mut self, rest: &str) -> bool {
        if rest.trim().is_empty() || !rest.contains('|') {
            return false;
        }
        let top = self.stack.len() - 1;
        let table = self.stack[top].node;
        let columns = match self.tree.kind(table) {
            NodeKind::Table { alignments } => alignments.len(),
            _ => return false,
        };
        let row = self.tree.append(table, NodeKind::TableRow { header: false });
        self.fill_row(row, scan::split_table_row(rest), columns);
        true
    }

    fn fill_row(&mut self, row: NodeId, mut cells: Vec<String>, columns: usize) {
        cells.resize(columns, String::new());
        cells.truncate(columns);
        for cell in cells {
            let cell_node = self.tree.append(row, NodeKind::TableCell);
            if !cell.is_empty() {
                self.tree.append(cell_node, NodeKind::Text { literal: cell });
            }
        }
    }

    fn try_begin_table(&mut self, alignments: Vec<Alignment>) -> bool {
        let Some(Open {
            node,
            data: Data::Paragraph { lines },
        }) = self.stack.last()
        else {
            return false;
        };
        if lines.len() != 1 {
            return false;
        }
        let header_cells = scan::split_table_row(&lines[0]);
        if header_cells.len() != alignments.len() {
            return false;
        }
        let node = *node;
        let columns = alignments.len();
        self.stack.pop();
        *self.tree.kind_mut(node) = NodeKind::Table { alignments };
        self.stack.push(Open {
            node,
            data: Data::Table,
        });
        let row = self.tree.append(node, NodeKind::TableRow { header: true });
        self.fill_row(row, header_cells, columns);
        true
    }

    fn finish_setext(&mut self, level: u8) {
        let Some(Open {
            node,
            data: Data::Paragraph { lines },
        }) = self.stack.pop()
        else {
            return;
        };
        *self.tree.kind_mut(node) = NodeKind::Heading { level };
        let text = lines.join("\n");
        if !text.is_empty() {
            self.tree.append(node, NodeKind::Text { literal: text });
        }
    }

    fn append_under_top(&mut self, kind: NodeKind) -> NodeId {
        let parent = self
            .stack
            .last()
            .map(|o| o.node)
            .unwrap_or_else(|| self.tree.root());
        self.tree.append(parent, kind)
    }

    /// Close any lists sitting on top of the stack
    fn pop_lists(&mut self) {
        while matches!(self.stack.last().map(|o| &o.data), Some(Data::List { .. })) {
            self.close_top();
        }
    }

    fn truncate(&mut self, to: usize) {
        while self.stack.len() > to {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        match open.data {
            Data::Paragraph { lines } => {
                let text = lines.join("\n");
                if !text.is_empty() {
                    self.tree
                        .append(open.node, NodeKind::Text { literal: text });
                }
            }
            Data::FencedCode { content, .. } => {
                if let NodeKind::CodeBlock { literal, .. } = self.tree.kind_mut(open.node) {
                    *literal = content;
                }
            }
            Data::IndentedCode { mut lines } => {
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                let mut literal = lines.join("\n");
                if !literal.is_empty() {
                    literal.push('\n');
                }
                if let NodeKind::CodeBlock {
                    literal: slot, ..
                } = self.tree.kind_mut(open.node)
                {
                    *slot = literal;
                }
            }
            Data::HtmlBlock { lines, .. } => {
                if let NodeKind::HtmlBlock { raw } = self.tree.kind_mut(open.node) {
                    *raw = lines.join("\n");
                }
            }
            Data::List { loose, .. } => {
                if let NodeKind::List { tight, .. } = self.tree.kind_mut(open.node) {
                    *tight = !loose;
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Tree {
        self.truncate(1);
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_under(tree: &Tree, parent: NodeId) -> Vec<NodeKind> {
        tree.children(parent)
            .iter()
            .map(|&c| tree.kind(c).clone())
            .collect()
    }

    fn leaf_text(tree: &Tree, node: NodeId) -> String {
        tree.collect_text(node)
    }

    #[test]
    fn test_single_paragraph() {
        let tree = parse("hello world");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Paragraph]);
        assert_eq!(leaf_text(&tree, tree.children(tree.root())[0]), "hello world");
    }

    #[test]
    fn test_paragraphs_split_on_blank() {
        let tree = parse("one\n\ntwo");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Paragraph, NodeKind::Paragraph]);
    }

    #[test]
    fn test_multiline_paragraph_joined() {
        let tree = parse("one\ntwo");
        let p = tree.children(tree.root())[0];
        assert_eq!(leaf_text(&tree, p), "one\ntwo");
    }

    #[test]
    fn test_atx_heading_levels() {
        let tree = parse("# One\n### Three");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::Heading { level: 1 }, NodeKind::Heading { level: 3 }]
        );
    }

    #[test]
    fn test_setext_heading() {
        let tree = parse("Title\n=====\nSub\n---");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::Heading { level: 1 }, NodeKind::Heading { level: 2 }]
        );
        assert_eq!(leaf_text(&tree, tree.children(tree.root())[0]), "Title");
    }

    #[test]
    fn test_thematic_break() {
        let tree = parse("a\n\n---\n\nb");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::Paragraph, NodeKind::ThematicBreak, NodeKind::Paragraph]
        );
    }

    #[test]
    fn test_blockquote_with_paragraphs() {
        let tree = parse("> a\n> b");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Blockquote]);
        let bq = tree.children(tree.root())[0];
        assert_eq!(kinds_under(&tree, bq), vec![NodeKind::Paragraph]);
        assert_eq!(leaf_text(&tree, bq), "a\nb");
    }

    #[test]
    fn test_blockquote_lazy_continuation() {
        let tree = parse("> a\nb");
        let bq = tree.children(tree.root())[0];
        assert_eq!(leaf_text(&tree, bq), "a\nb");
    }

    #[test]
    fn test_separate_blockquotes() {
        let tree = parse("> a\n\n> b");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Blockquote, NodeKind::Blockquote]);
    }

    #[test]
    fn test_nested_blockquote() {
        let tree = parse("> > deep");
        let outer = tree.children(tree.root())[0];
        let inner = tree.children(outer)[0];
        assert_eq!(tree.kind(inner), &NodeKind::Blockquote);
        assert_eq!(leaf_text(&tree, inner), "deep");
    }

    #[test]
    fn test_tight_bullet_list() {
        let tree = parse("- a\n- b\n- c");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::List {
                ordered: false,
                start: 1,
                tight: true
            }]
        );
        let list = tree.children(tree.root())[0];
        assert_eq!(tree.children(list).len(), 3);
    }

    #[test]
    fn test_loose_list_from_blank_between_items() {
        let tree = parse("- a\n\n- b");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::List {
                ordered: false,
                start: 1,
                tight: false
            }]
        );
    }

    #[test]
    fn test_trailing_blank_keeps_list_tight() {
        let tree = parse("- a\n- b\n\nafter");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![
                NodeKind::List {
                    ordered: false,
                    start: 1,
                    tight: true
                },
                NodeKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let tree = parse("3. a\n4. b");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::List {
                ordered: true,
                start: 3,
                tight: true
            }]
        );
    }

    #[test]
    fn test_item_continuation_indented() {
        let tree = parse("- a\n  b");
        let list = tree.children(tree.root())[0];
        let item = tree.children(list)[0];
        assert_eq!(leaf_text(&tree, item), "a\nb");
    }

    #[test]
    fn test_nested_list() {
        let tree = parse("- a\n  - b");
        let list = tree.children(tree.root())[0];
        let item = tree.children(list)[0];
        let inner_kinds = kinds_under(&tree, item);
        assert_eq!(inner_kinds[0], NodeKind::Paragraph);
        assert!(matches!(inner_kinds[1], NodeKind::List { ordered: false, .. }));
    }

    #[test]
    fn test_marker_change_starts_new_list() {
        let tree = parse("- a\n+ b");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|k| matches!(k, NodeKind::List { .. })));
    }

    #[test]
    fn test_list_interrupts_paragraph() {
        let tree = parse("text\n- a");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top[0], NodeKind::Paragraph);
        assert!(matches!(top[1], NodeKind::List { .. }));
    }

    #[test]
    fn test_nonone_ordered_cannot_interrupt_paragraph() {
        let tree = parse("text\n2. a");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Paragraph]);
        assert_eq!(leaf_text(&tree, tree.children(tree.root())[0]), "text\n2. a");
    }

    #[test]
    fn test_fenced_code_block() {
        let tree = parse("```rust\nfn main() {}\n```");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::CodeBlock {
                lang: "rust".to_string(),
                literal: "fn main() {}\n".to_string(),
                fenced: true
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let tree = parse("```\na\nb");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::CodeBlock {
                lang: String::new(),
                literal: "a\nb\n".to_string(),
                fenced: true
            }]
        );
    }

    #[test]
    fn test_fence_content_not_parsed() {
        let tree = parse("```\n# not a heading\n```");
        let top = kinds_under(&tree, tree.root());
        assert!(matches!(
            &top[0],
            NodeKind::CodeBlock { literal, .. } if literal == "# not a heading\n"
        ));
    }

    #[test]
    fn test_indented_code_block() {
        let tree = parse("    code here\n    more");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::CodeBlock {
                lang: String::new(),
                literal: "code here\nmore\n".to_string(),
                fenced: false
            }]
        );
    }

    #[test]
    fn test_indented_code_cannot_interrupt_paragraph() {
        let tree = parse("text\n    still text");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Paragraph]);
    }

    #[test]
    fn test_html_block_comment() {
        let tree = parse("<!-- a\ncomment -->\nafter");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top[0],
            NodeKind::HtmlBlock {
                raw: "<!-- a\ncomment -->".to_string()
            }
        );
        assert_eq!(top[1], NodeKind::Paragraph);
    }

    #[test]
    fn test_html_block_div_until_blank() {
        let tree = parse("<div>\ninner\n</div>\n\nafter");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top[0],
            NodeKind::HtmlBlock {
                raw: "<div>\ninner\n</div>".to_string()
            }
        );
    }

    #[test]
    fn test_table_basic() {
        let tree = parse("| a | b |\n| --- | :---: |\n| 1 | 2 |");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(
            top,
            vec![NodeKind::Table {
                alignments: vec![Alignment::None, Alignment::Center]
            }]
        );
        let table = tree.children(tree.root())[0];
        let rows = kinds_under(&tree, table);
        assert_eq!(
            rows,
            vec![
                NodeKind::TableRow { header: true },
                NodeKind::TableRow { header: false }
            ]
        );
        let header = tree.children(table)[0];
        assert_eq!(kinds_under(&tree, header).len(), 2);
    }

    #[test]
    fn test_table_ragged_rows_normalized() {
        let tree = parse("| a | b |\n| --- | --- |\n| only |\n| 1 | 2 | extra |");
        let table = tree.children(tree.root())[0];
        for &row in tree.children(table) {
            assert_eq!(tree.children(row).len(), 2);
        }
    }

    #[test]
    fn test_table_column_mismatch_stays_paragraph() {
        let tree = parse("| a | b | c |\n| --- | --- |");
        let top = kinds_under(&tree, tree.root());
        assert_eq!(top, vec![NodeKind::Paragraph]);
    }

    #[test]
    fn test_table_closed_by_plain_line() {
        let tree = parse("| a |\n| --- |\n| 1 |\nplain text");
        let top = kinds_under(&tree, tree.root());
        assert!(matches!(top[0], NodeKind::Table { .. }));
        assert_eq!(top[1], NodeKind::Paragraph);
    }

    #[test]
    fn test_blockquote_containing_list() {
        let tree = parse("> - a\n> - b");
        let bq = tree.children(tree.root())[0];
        let inner = kinds_under(&tree, bq);
        assert!(matches!(inner[0], NodeKind::List { .. }));
    }

    #[test]
    fn test_heading_closes_list() {
        let tree = parse("- a\n# h");
        let top = kinds_under(&tree, tree.root());
        assert!(matches!(top[0], NodeKind::List { .. }));
        assert_eq!(top[1], NodeKind::Heading { level: 1 });
    }

    #[test]
    fn test_empty_input() {
        let tree = parse("");
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn test_deeply_nested_blockquotes_terminate() {
        let src = "> ".repeat(64) + "x";
        let tree = parse(&src);
        assert_eq!(kinds_under(&tree, tree.root()).len(), 1);
    }
}
