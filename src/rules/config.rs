//! Per-rule configuration
//!
//! Options are immutable once a session is built: a session is constructed
//! per render configuration, used for one document, then discarded, so rules
//! never see options change mid-render and concurrent renders never share
//! mutable option state.

use serde::{Deserialize, Serialize};

/// Options for the link rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Replace supported third-party links (YouTube) with an embedded player
    pub embed_third_party_content: bool,
    /// Drop links into the proxied storage bucket, keeping only the label
    pub remove_links_to_be_proxied: bool,
    pub open_links_in_new_tab: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            embed_third_party_content: false,
            remove_links_to_be_proxied: true,
            open_links_in_new_tab: true,
        }
    }
}

/// Options for the image rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub remove_links_to_be_proxied: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            remove_links_to_be_proxied: true,
        }
    }
}

/// Options shared by the inline and display math rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathOptions {
    /// Memoize rendered markup in the session cache
    pub cache: bool,
}

impl Default for MathOptions {
    fn default() -> Self {
        Self { cache: true }
    }
}

/// One citation supplied by the caller
///
/// `offset` on input is the character offset of the marker in the source
/// markdown; the render output carries records whose `offset` points into the
/// produced HTML at the start of the anchor that replaced the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub index: usize,
    pub title: String,
    pub source: String,
    pub passage: String,
    pub offset: usize,
}

/// Options for the citation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationOptions {
    pub citations: Vec<CitationRecord>,
    pub open_links_in_new_tab: bool,
}

impl Default for CitationOptions {
    fn default() -> Self {
        Self {
            citations: Vec::new(),
            open_links_in_new_tab: true,
        }
    }
}

/// Options for the code-highlight rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    /// Emit Pygments-compatible class names instead of generic ones
    pub pygments_classes: bool,
    pub cache: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            pygments_classes: true,
            cache: true,
        }
    }
}

/// Aggregate of every rule's options, owned by the session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Options {
    pub link: LinkOptions,
    pub image: ImageOptions,
    pub math_inline: MathOptions,
    pub math_display: MathOptions,
    pub citation: CitationOptions,
    pub highlight: HighlightOptions,
}
