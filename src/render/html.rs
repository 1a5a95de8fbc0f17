//! HTML serialization of the node tree

use crate::ast::{Alignment, ContactKind, NodeId, NodeKind, Tree};
use crate::cache::MemoCache;
use crate::normalize::{MAIL_PREFIX, PHONE_PREFIX};
use crate::render::escape::escape_html;
use crate::rules::config::{CitationRecord, Options};
use crate::rules::image;
use crate::rules::link::{self, LinkRender};
use crate::rules::math;

/// Result of one render: the HTML plus the citations that were actually
/// emitted, with `offset` pointing at the start of each anchor in `html`
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub html: String,
    pub citations: Vec<CitationRecord>,
}

/// Low-level tag writer, shared by the renderer and the highlight rule
#[derive(Debug)]
pub struct HtmlWriter {
    out: String,
    xhtml: bool,
}

impl HtmlWriter {
    pub fn new(xhtml: bool) -> Self {
        HtmlWriter {
            out: String::new(),
            xhtml,
        }
    }

    pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_html(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    pub fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    pub fn self_close(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_html(value));
            self.out.push('"');
        }
        if self.xhtml {
            self.out.push_str(" />");
        } else {
            self.out.push('>');
        }
    }

    /// Escaped text content
    pub fn text(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    /// Verbatim passthrough; caller guarantees the content is final markup
    pub fn text_raw(&mut self, raw: &str) {
        self.out.push_str(raw);
    }

    /// Ensure the output ends with a newline (no-op at the very start)
    pub fn cr(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render a citation record to the exact markup the renderer emits for it
pub fn citation_anchor_html(record: &CitationRecord, open_in_new_tab: bool) -> String {
    let mut html = String::from("<sup>");
    if record.source.starts_with("http") {
        html.push_str("<a href=\"");
        html.push_str(&escape_html(&record.source));
        html.push('"');
        if open_in_new_tab {
            html.push_str(" target=\"_blank\"");
        }
        html.push('>');
    } else {
        html.push_str("<a>");
    }
    html.push_str(&record.index.to_string());
    html.push_str("</a></sup>");
    html
}

enum Step {
    Enter(NodeId),
    Exit(NodeId),
}

struct RenderCtx<'a> {
    tree: &'a Tree,
    options: &'a Options,
    cache: &'a MemoCache,
    writer: HtmlWriter,
    citations: Vec<CitationRecord>,
}

/// Serialize a resolved tree to HTML
pub fn render_html(tree: &Tree, options: &Options, cache: &MemoCache, xhtml: bool) -> RenderOutput {
    let mut ctx = RenderCtx {
        tree,
        options,
        cache,
        writer: HtmlWriter::new(xhtml),
        citations: Vec::new(),
    };

    let mut stack: Vec<Step> = vec![Step::Enter(tree.root())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                let descend = ctx.enter(id);
                if descend {
                    stack.push(Step::Exit(id));
                    for &child in tree.children(id).iter().rev() {
                        stack.push(Step::Enter(child));
                    }
                }
            }
            Step::Exit(id) => ctx.exit(id),
        }
    }

    RenderOutput {
        html: ctx.writer.finish(),
        citations: ctx.citations,
    }
}

impl<'a> RenderCtx<'a> {
    /// True if `id` is a paragraph that should drop its `<p>` wrapper
    /// because it sits directly inside a tight list item
    fn in_tight_item(&self, id: NodeId) -> bool {
        let Some(item) = self.tree.parent(id) else {
            return false;
        };
        if !matches!(self.tree.kind(item), NodeKind::ListItem) {
            return false;
        }
        match self.tree.parent(item).map(|list| self.tree.kind(list)) {
            Some(NodeKind::List { tight, .. }) => *tight,
            _ => false,
        }
    }

    fn cell_alignment(&self, cell: NodeId) -> Alignment {
        let Some(row) = self.tree.parent(cell) else {
            return Alignment::None;
        };
        let Some(table) = self.tree.parent(row) else {
            return Alignment::None;
        };
        let NodeKind::Table { alignments } = self.tree.kind(table) else {
            return Alignment::None;
        };
        let idx = self.tree.child_position(row, cell).unwrap_or(0);
        alignments.get(idx).copied().unwrap_or(Alignment::None)
    }

    /// Emit opening markup; returns false when the subtree is fully handled
    fn enter(&mut self, id: NodeId) -> bool {
        match self.tree.kind(id) {
            NodeKind::Document => true,
            NodeKind::Paragraph => {
                if self.in_tight_item(id) {
                    return true;
                }
                self.writer.cr();
                self.writer.open("p", &[]);
                true
            }
            NodeKind::Heading { level } => {
                self.writer.cr();
                self.writer.open(heading_tag(*level), &[]);
                true
            }
            NodeKind::List { ordered, start, .. } => {
                self.writer.cr();
                if *ordered {
                    if *start != 1 {
                        self.writer.open("ol", &[("start", start.to_string())]);
                    } else {
                        self.writer.open("ol", &[]);
                    }
                } else {
                    self.writer.open("ul", &[]);
                }
                true
            }
            NodeKind::ListItem => {
                self.writer.cr();
                self.writer.open("li", &[]);
                true
            }
            NodeKind::Blockquote => {
                self.writer.cr();
                self.writer.open("blockquote", &[]);
                true
            }
            NodeKind::CodeBlock { lang, literal, .. } => {
                self.writer.cr();
                self.writer.open("pre", &[]);
                if lang.is_empty() {
                    self.writer.open("code", &[]);
                } else {
                    let class = format!("language-{}", first_word(lang));
                    self.writer.open("code", &[("class", class)]);
                }
                self.writer.text(literal);
                self.writer.close("code");
                self.writer.close("pre");
                self.writer.text_raw("\n");
                false
            }
            NodeKind::HighlightedCode { html, .. } => {
                self.writer.cr();
                self.writer.text_raw(html);
                self.writer.cr();
                false
            }
            NodeKind::HtmlBlock { raw } => {
                self.writer.cr();
                self.writer.text_raw(raw);
                self.writer.cr();
                false
            }
            NodeKind::ThematicBreak => {
                self.writer.cr();
                self.writer.self_close("hr", &[]);
                self.writer.text_raw("\n");
                false
            }
            NodeKind::Table { .. } => {
                self.writer.cr();
                self.writer.open("table", &[]);
                true
            }
            NodeKind::TableRow { header } => {
                self.writer.cr();
                if *header {
                    self.writer.open("thead", &[]);
                    self.writer.text_raw("\n");
                } else if self.is_first_body_row(id) {
                    self.writer.open("tbody", &[]);
                    self.writer.text_raw("\n");
                }
                self.writer.open("tr", &[]);
                true
            }
            NodeKind::TableCell => {
                self.writer.cr();
                let tag = self.cell_tag(id);
                match self.cell_alignment(id) {
                    Alignment::None => self.writer.open(tag, &[]),
                    Alignment::Left => self
                        .writer
                        .open(tag, &[("style", "text-align:left".to_string())]),
                    Alignment::Center => self
                        .writer
                        .open(tag, &[("style", "text-align:center".to_string())]),
                    Alignment::Right => self
                        .writer
                        .open(tag, &[("style", "text-align:right".to_string())]),
                }
                true
            }

            NodeKind::Text { literal } => {
                self.writer.text(literal);
                false
            }
            NodeKind::Emphasis { strong } => {
                self.writer.open(if *strong { "strong" } else { "em" }, &[]);
                true
            }
            NodeKind::CodeSpan { literal } => {
                self.writer.open("code", &[]);
                self.writer.text(literal);
                self.writer.close("code");
                false
            }
            NodeKind::Link { url, title } => {
                match link::classify_link(url, &self.options.link) {
                    LinkRender::Unwrap => true,
                    LinkRender::Iframe { html } => {
                        self.writer.text_raw(&html);
                        false
                    }
                    LinkRender::Anchor { href, target_blank } => {
                        let mut attrs = vec![("href", href)];
                        if !title.is_empty() {
                            attrs.push(("title", title.clone()));
                        }
                        if target_blank {
                            attrs.push(("target", "_blank".to_string()));
                        }
                        self.writer.open("a", &attrs);
                        true
                    }
                }
            }
            NodeKind::Image { url, title } => {
                if !image::should_render(url, &self.options.image) {
                    // degrade to the alt text alone
                    self.writer.text(&self.tree.collect_text(id));
                    return false;
                }
                let alt = self.tree.collect_text(id);
                let mut attrs = vec![("src", url.clone()), ("alt", alt)];
                if !title.is_empty() {
                    attrs.push(("title", title.clone()));
                }
                self.writer.self_close("img", &attrs);
                false
            }
            NodeKind::HtmlInline { raw } => {
                self.writer.text_raw(raw);
                false
            }
            NodeKind::SoftBreak => {
                self.writer.text_raw("\n");
                false
            }
            NodeKind::HardBreak => {
                self.writer.self_close("br", &[]);
                self.writer.text_raw("\n");
                false
            }
            NodeKind::MathInline { source } => {
                let html =
                    math::render_math(source, false, self.options.math_inline.cache, self.cache);
                self.writer.text_raw(&html);
                false
            }
            NodeKind::MathDisplay { source } => {
                let html =
                    math::render_math(source, true, self.options.math_display.cache, self.cache);
                self.writer.text_raw(&html);
                false
            }
            NodeKind::Citation { index } => {
                let records = &self.options.citation.citations;
                if let Some(record) = records.get(index.saturating_sub(1)) {
                    let offset = self.writer.len();
                    let anchor =
                        citation_anchor_html(record, self.options.citation.open_links_in_new_tab);
                    self.writer.text_raw(&anchor);
                    self.citations.push(CitationRecord {
                        offset,
                        ..record.clone()
                    });
                }
                false
            }
            NodeKind::ContactInfo { kind, raw } => {
                let (prefix, target) = match kind {
                    ContactKind::Email => (MAIL_PREFIX, raw.clone()),
                    ContactKind::Phone => (
                        PHONE_PREFIX,
                        raw.chars()
                            .filter(|c| c.is_ascii_digit() || *c == '+')
                            .collect(),
                    ),
                };
                self.writer
                    .open("a", &[("href", format!("{prefix}{target}"))]);
                self.writer.text(raw);
                self.writer.close("a");
                false
            }
        }
    }

    fn exit(&mut self, id: NodeId) {
        match self.tree.kind(id) {
            NodeKind::Document => {}
            NodeKind::Paragraph => {
                if !self.in_tight_item(id) {
                    self.writer.close("p");
                    self.writer.text_raw("\n");
                }
            }
            NodeKind::Heading { level } => {
                self.writer.close(heading_tag(*level));
                self.writer.text_raw("\n");
            }
            NodeKind::List { ordered, .. } => {
                self.writer.cr();
                self.writer.close(if *ordered { "ol" } else { "ul" });
                self.writer.text_raw("\n");
            }
            NodeKind::ListItem => {
                self.writer.close("li");
                self.writer.text_raw("\n");
            }
            NodeKind::Blockquote => {
                self.writer.cr();
                self.writer.close("blockquote");
                self.writer.text_raw("\n");
            }
            NodeKind::Table { .. } => {
                self.writer.cr();
                self.writer.close("table");
                self.writer.text_raw("\n");
            }
            NodeKind::TableRow { header } => {
                self.writer.cr();
                self.writer.close("tr");
                self.writer.text_raw("\n");
                if *header {
                    self.writer.close("thead");
                    self.writer.text_raw("\n");
                } else if self.is_last_body_row(id) {
                    self.writer.close("tbody");
                    self.writer.text_raw("\n");
                }
            }
            NodeKind::TableCell => {
                self.writer.close(self.cell_tag(id));
                self.writer.text_raw("\n");
            }
            NodeKind::Emphasis { strong } => {
                self.writer.close(if *strong { "strong" } else { "em" });
            }
            NodeKind::Link { url, .. } => {
                if matches!(
                    link::classify_link(url, &self.options.link),
                    LinkRender::Anchor { .. }
                ) {
                    self.writer.close("a");
                }
            }
            _ => {}
        }
    }

    fn cell_tag(&self, cell: NodeId) -> &'static str {
        match self.tree.parent(cell).map(|row| self.tree.kind(row)) {
            Some(NodeKind::TableRow { header: true }) => "th",
            _ => "td",
        }
    }

    fn is_first_body_row(&self, row: NodeId) -> bool {
        self.body_row_boundary(row).0
    }

    fn is_last_body_row(&self, row: NodeId) -> bool {
        self.body_row_boundary(row).1
    }

    fn body_row_boundary(&self, row: NodeId) -> (bool, bool) {
        let Some(table) = self.tree.parent(row) else {
            return (false, false);
        };
        let body: Vec<NodeId> = self
            .tree
            .children(table)
            .iter()
            .copied()
            .filter(|&r| matches!(self.tree.kind(r), NodeKind::TableRow { header: false }))
            .collect();
        (
            body.first() == Some(&row),
            body.last() == Some(&row),
        )
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

fn first_word(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}
