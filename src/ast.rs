//! Node tree for parsed documents
//!
//!     The intermediate representation shared by the block parser, the inline
//!     parser, the rule pipeline, and the renderer. Nodes live in a flat arena
//!     (`Tree`) and refer to each other through `NodeId` indices; the parent
//!     link is a plain non-owning index used only for contextual lookups
//!     (e.g. "is this paragraph inside a tight list item"), never for
//!     traversal or ownership.
//!
//! Node layering
//!
//!     Block-container nodes (document, blockquote, list, list item, table,
//!     table row) hold only block-kind children. Inline-container nodes
//!     (paragraph, heading, emphasis, link, table cell) hold only inline-kind
//!     children once inline parsing has run; before that, leaf blocks carry
//!     their raw inline source as a single `Text` child.

pub mod kind;
pub mod tree;

pub use kind::{Alignment, ContactKind, NodeKind};
pub use tree::{Node, NodeId, Tree};
