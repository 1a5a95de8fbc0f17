//! Emphasis delimiter pairing
//!
//!     Delimiter runs of `*` and `_` are recorded during the scan as plain
//!     text nodes plus stack entries carrying their flanking classification.
//!     The post-pass walks closers left to right, pairing each against the
//!     nearest compatible opener. Pairing obeys the flanking rules (with the
//!     stricter intraword restriction for `_`), the mod-3 rule for runs that
//!     can both open and close, and keeps a per-class floor (`openers_bottom`)
//!     so a failed opener search is never repeated over the same range.
//!     The pass is linear in the number of delimiters apart from the bounded
//!     backward searches, and unpaired runs keep their literal text nodes.

use crate::ast::{NodeId, NodeKind, Tree};

#[derive(Debug)]
pub(crate) struct Delimiter {
    /// The text node holding the literal run
    pub node: NodeId,
    pub marker: char,
    /// Unconsumed length; shrinks as pairs are formed
    pub len: usize,
    /// Length at scan time, used by the mod-3 rule
    pub orig_len: usize,
    pub can_open: bool,
    pub can_close: bool,
    pub active: bool,
}

/// Flanking classification for a run of `marker` between `prev` and `next`.
/// Start and end of the source count as whitespace.
pub(crate) fn flanking(marker: char, prev: Option<char>, next: Option<char>) -> (bool, bool) {
    let prev_ws = prev.map_or(true, char::is_whitespace);
    let next_ws = next.map_or(true, char::is_whitespace);
    let prev_punct = prev.map_or(false, |c| c.is_ascii_punctuation());
    let next_punct = next.map_or(false, |c| c.is_ascii_punctuation());

    let left = !next_ws && (!next_punct || prev_ws || prev_punct);
    let right = !prev_ws && (!prev_punct || next_ws || next_punct);

    if marker == '_' {
        // no intraword emphasis with underscores
        (left && (!right || prev_punct), right && (!left || next_punct))
    } else {
        (left, right)
    }
}

pub(crate) fn process_emphasis(tree: &mut Tree, parent: NodeId, delims: &mut [Delimiter]) {
    // lowest index still worth searching, per marker and closer length mod 3
    let mut openers_bottom = [[0usize; 3]; 2];

    let mut closer = 0;
    while closer < delims.len() {
        if !delims[closer].active || !delims[closer].can_close || delims[closer].len == 0 {
            closer += 1;
            continue;
        }
        let marker = delims[closer].marker;
        let mi = usize::from(marker == '_');
        let bottom = openers_bottom[mi][delims[closer].orig_len % 3];

        let mut found = None;
        let mut j = closer;
        while j > bottom {
            j -= 1;
            let opener = &delims[j];
            if !opener.active || !opener.can_open || opener.marker != marker || opener.len == 0 {
                continue;
            }
            // mod-3 rule: runs that could both open and close must not sum
            // to a multiple of 3, unless both are multiples of 3 themselves
            let odd_match = (opener.can_close || delims[closer].can_open)
                && (opener.orig_len + delims[closer].orig_len) % 3 == 0
                && !(opener.orig_len % 3 == 0 && delims[closer].orig_len % 3 == 0);
            if odd_match {
                continue;
            }
            found = Some(j);
            break;
        }

        let Some(opener) = found else {
            openers_bottom[mi][delims[closer].orig_len % 3] = closer;
            if !delims[closer].can_open {
                delims[closer].active = false;
            }
            closer += 1;
            continue;
        };

        let strong = delims[opener].len >= 2 && delims[closer].len >= 2;
        let take = if strong { 2 } else { 1 };
        wrap(
            tree,
            parent,
            delims[opener].node,
            delims[closer].node,
            strong,
        );
        for k in opener + 1..closer {
            delims[k].active = false;
        }
        shrink(tree, &mut delims[opener], take);
        shrink(tree, &mut delims[closer], take);
        if delims[closer].len == 0 {
            closer += 1;
        }
    }
}

/// Move the children strictly between the opener and closer text nodes into
/// a fresh emphasis node sitting in their place
fn wrap(tree: &mut Tree, parent: NodeId, open_node: NodeId, close_node: NodeId, strong: bool) {
    let kids = tree.children(parent).to_vec();
    let (Some(op), Some(cp)) = (
        kids.iter().position(|&c| c == open_node),
        kids.iter().position(|&c| c == close_node),
    ) else {
        return;
    };
    if cp <= op {
        return;
    }
    let em = tree.orphan(NodeKind::Emphasis { strong });
    let inner: Vec<NodeId> = kids[op + 1..cp].to_vec();
    let mut outer: Vec<NodeId> = Vec::with_capacity(kids.len() - inner.len() + 1);
    outer.extend_from_slice(&kids[..=op]);
    outer.push(em);
    outer.extend_from_slice(&kids[cp..]);
    tree.set_children(parent, outer);
    tree.set_children(em, inner);
}

fn shrink(tree: &mut Tree, delim: &mut Delimiter, take: usize) {
    delim.len = delim.len.saturating_sub(take);
    if delim.len == 0 {
        tree.detach(delim.node);
        delim.active = false;
    } else if let NodeKind::Text { literal } = tree.kind_mut(delim.node) {
        *literal = delim.marker.to_string().repeat(delim.len);
    }
}
