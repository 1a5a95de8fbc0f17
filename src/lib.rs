//! # marq
//!
//! A streaming-friendly Markdown-to-HTML compiler with a pluggable rule
//! pipeline. Source text is normalized, parsed into a flat-arena block
//! tree, enriched by per-session inline and tree rules (links, images,
//! dollar-delimited math rendered to MathML, citation markers, contact
//! info, code highlighting), and serialized to HTML in one pass.
//!
//! ## Quick start
//!
//! ```
//! use marq::Session;
//!
//! let session = Session::with_defaults();
//! let out = session.render("# Title\n\nHello *world*");
//! assert!(out.html.starts_with("<h1>Title</h1>"));
//! ```
//!
//! Rendering never fails and never panics; malformed constructs degrade to
//! literal text. The only fallible operation is enabling a rule by name,
//! which reports [`EngineError::UnknownRule`].

pub mod ast;
pub mod block;
pub mod cache;
pub mod error;
pub mod inline;
pub mod normalize;
pub mod render;
pub mod rules;
pub mod session;

pub use ast::{Alignment, ContactKind, Node, NodeId, NodeKind, Tree};
pub use cache::MemoCache;
pub use error::EngineError;
pub use render::RenderOutput;
pub use rules::config::{
    CitationOptions, CitationRecord, HighlightOptions, ImageOptions, LinkOptions, MathOptions,
    Options,
};
pub use rules::RuleSpec;
pub use session::Session;

/// Render with the default rule set; shorthand for one-off conversions
pub fn render(src: &str) -> String {
    Session::with_defaults().render(src).html
}
