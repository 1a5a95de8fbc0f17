//! Flat node arena
//!
//! Nodes are stored in a single `Vec` and addressed by index. Detached nodes
//! (e.g. text runs consumed into emphasis) simply become unreachable; the
//! arena is discarded wholesale after one render, so no freeing is needed.

use super::kind::NodeKind;
use serde::Serialize;

/// Index of a node within a [`Tree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node: its kind plus structural links
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-backed document tree
#[derive(Debug, Clone, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree containing only a `Document` root
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The `Document` root, always node 0
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Append a new node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Create a node without attaching it anywhere
    pub fn orphan(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Remove all children of `id`, returning them detached
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.index()].children);
        for &c in &children {
            self.nodes[c.index()].parent = None;
        }
        children
    }

    /// Replace the child list of `id`, reparenting every entry
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        for &c in &children {
            self.nodes[c.index()].parent = Some(id);
        }
        self.nodes[id.index()].children = children;
    }

    /// Remove one child from its parent's child list (node stays in the arena)
    pub fn detach(&mut self, id: NodeId) {
        if let Some(p) = self.nodes[id.index()].parent.take() {
            self.nodes[p.index()].children.retain(|&c| c != id);
        }
    }

    /// Position of `child` within its parent's child list
    pub fn child_position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.index()].children.iter().position(|&c| c == child)
    }

    /// Concatenated text content of a subtree (text, code spans, raw source)
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            match self.kind(n) {
                NodeKind::Text { literal } | NodeKind::CodeSpan { literal } => {
                    out.push_str(literal);
                }
                NodeKind::MathInline { source } | NodeKind::MathDisplay { source } => {
                    out.push_str(source);
                }
                _ => {}
            }
            for &c in self.children(n).iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    /// All node ids in depth-first pre-order starting at the root
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(n) = stack.pop() {
            order.push(n);
            for &c in self.children(n).iter().rev() {
                stack.push(c);
            }
        }
        order
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_parent_links() {
        let mut tree = Tree::new();
        let p = tree.append(tree.root(), NodeKind::Paragraph);
        let t = tree.append(
            p,
            NodeKind::Text {
                literal: "hi".to_string(),
            },
        );
        assert_eq!(tree.parent(t), Some(p));
        assert_eq!(tree.parent(p), Some(tree.root()));
        assert_eq!(tree.children(p), &[t]);
    }

    #[test]
    fn test_detach_leaves_arena_intact() {
        let mut tree = Tree::new();
        let p = tree.append(tree.root(), NodeKind::Paragraph);
        tree.detach(p);
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.kind(p), &NodeKind::Paragraph);
        assert_eq!(tree.parent(p), None);
    }

    #[test]
    fn test_collect_text_depth_first() {
        let mut tree = Tree::new();
        let p = tree.append(tree.root(), NodeKind::Paragraph);
        tree.append(
            p,
            NodeKind::Text {
                literal: "a ".to_string(),
            },
        );
        let em = tree.append(p, NodeKind::Emphasis { strong: false });
        tree.append(
            em,
            NodeKind::Text {
                literal: "b".to_string(),
            },
        );
        assert_eq!(tree.collect_text(p), "a b");
    }

    #[test]
    fn test_walk_preorder() {
        let mut tree = Tree::new();
        let p = tree.append(tree.root(), NodeKind::Paragraph);
        let q = tree.append(tree.root(), NodeKind::ThematicBreak);
        let t = tree.append(
            p,
            NodeKind::Text {
                literal: "x".to_string(),
            },
        );
        assert_eq!(tree.walk(), vec![tree.root(), p, t, q]);
    }
}
