//! HTML rendering
//!
//!     Depth-first serialization of a fully resolved node tree. Literal text
//!     is escaped exactly once on the way out; raw-HTML passthrough nodes are
//!     emitted verbatim (sanitization is the caller's concern). Traversal is
//!     iterative so adversarially deep nesting cannot overflow the stack.
//!
//! Newline policy
//!
//!     Block opening tags are preceded by a newline when output is already in
//!     progress, and block closing tags append one. Tight list items unwrap
//!     their single paragraph so no blank structure appears between items.

pub mod escape;
pub mod html;

pub use html::{citation_anchor_html, render_html, HtmlWriter, RenderOutput};
