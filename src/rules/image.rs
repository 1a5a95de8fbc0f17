//! Image rule
//!
//!     `![alt](src "title")` reuses the link rule's label and destination
//!     matchers. At render time images whose source points into the proxied
//!     storage bucket are suppressed entirely and only the alt text remains;
//!     a stale bucket URL would otherwise surface as a broken `<img>`.

use crate::ast::NodeKind;
use crate::inline::InlineScan;
use crate::rules::config::ImageOptions;
use crate::rules::link::{is_url_to_be_proxied, match_destination, match_link_label, MAX_LINK_DEPTH};
use crate::rules::InlineRule;

/// False when the image must degrade to its alt text
pub fn should_render(url: &str, options: &ImageOptions) -> bool {
    !(options.remove_links_to_be_proxied && is_url_to_be_proxied(url))
}

pub struct ImageRule;

impl InlineRule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn marker(&self) -> char {
        '!'
    }

    fn priority(&self) -> i32 {
        40
    }

    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize> {
        if scan.depth() >= MAX_LINK_DEPTH {
            return None;
        }
        let rest = scan.rest();
        if !rest.starts_with("![") {
            return None;
        }
        let (label, after_label) = match_link_label(&rest[1..])?;
        let (url, title, consumed) = match_destination(&rest[1..], after_label)?;
        let node = scan.emit(NodeKind::Image { url, title });
        scan.parse_into(node, label);
        Some(consumed + 1)
    }
}
