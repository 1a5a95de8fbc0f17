//! Node kind definitions
//!
//! `NodeKind` is a closed tagged variant: the rule set is fixed and audited,
//! so new node kinds are added here rather than through open-ended dynamic
//! dispatch. Kinds are serde-serializable so the CLI can dump parse trees.

use serde::{Deserialize, Serialize};

/// Column alignment for table cells, from the `:---:` separator row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// Kind of contact information matched by the contact-info rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Email,
    Phone,
}

/// The kind of a node, together with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,

    // Block-level
    Paragraph,
    Heading {
        level: u8,
    },
    List {
        ordered: bool,
        start: u64,
        tight: bool,
    },
    ListItem,
    Blockquote,
    CodeBlock {
        lang: String,
        literal: String,
        fenced: bool,
    },
    /// Raw HTML block, emitted verbatim
    HtmlBlock {
        raw: String,
    },
    Table {
        alignments: Vec<Alignment>,
    },
    TableRow {
        header: bool,
    },
    TableCell,
    ThematicBreak,

    // Inline-level
    Text {
        literal: String,
    },
    Emphasis {
        strong: bool,
    },
    Link {
        url: String,
        title: String,
    },
    Image {
        url: String,
        title: String,
    },
    CodeSpan {
        literal: String,
    },
    /// Raw inline HTML, emitted verbatim
    HtmlInline {
        raw: String,
    },
    SoftBreak,
    HardBreak,
    MathInline {
        source: String,
    },
    MathDisplay {
        source: String,
    },
    /// A resolved citation marker; `index` is 1-based into the supplied records
    Citation {
        index: usize,
    },
    ContactInfo {
        kind: ContactKind,
        raw: String,
    },
    /// A fenced code block replaced by the highlight rule; `html` is final markup
    HighlightedCode {
        lang: String,
        html: String,
    },
}

impl NodeKind {
    /// True for kinds that appear inside block containers
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Paragraph
                | NodeKind::Heading { .. }
                | NodeKind::List { .. }
                | NodeKind::ListItem
                | NodeKind::Blockquote
                | NodeKind::CodeBlock { .. }
                | NodeKind::HtmlBlock { .. }
                | NodeKind::Table { .. }
                | NodeKind::TableRow { .. }
                | NodeKind::TableCell
                | NodeKind::ThematicBreak
                | NodeKind::HighlightedCode { .. }
        )
    }

    /// True for kinds that appear inside inline containers
    pub fn is_inline(&self) -> bool {
        !self.is_block()
    }

    /// True for block leaves whose content is inline source awaiting the
    /// inline parse (stored as a single `Text` child)
    pub fn holds_inline_source(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph | NodeKind::Heading { .. } | NodeKind::TableCell
        )
    }
}
