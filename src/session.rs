//! Render session
//!
//!     A `Session` owns the rule registry, the option aggregate, and the
//!     memo cache, and drives one source string through the full pipeline:
//!     normalize, block parse, inline parse of every leaf that carries
//!     inline source, tree rules, HTML serialization. Sessions are cheap to
//!     build and reusable; rendering takes `&self` and never fails; the
//!     only fallible operation is enabling a rule by name.

use std::sync::Arc;

use crate::ast::{NodeId, NodeKind, Tree};
use crate::block;
use crate::cache::{MemoCache, SHARED_CACHE};
use crate::error::EngineError;
use crate::inline::InlineParser;
use crate::normalize;
use crate::render::{render_html, RenderOutput};
use crate::rules::config::Options;
use crate::rules::{Registry, RuleSpec};

pub struct Session {
    registry: Registry,
    options: Options,
    cache: Arc<MemoCache>,
    xhtml: bool,
}

impl Session {
    /// Core constructs only; no extension rules
    pub fn new() -> Self {
        Session {
            registry: Registry::new(),
            options: Options::default(),
            cache: Arc::clone(&SHARED_CACHE),
            xhtml: false,
        }
    }

    /// Every extension rule enabled with default options, except `nl2br`
    pub fn with_defaults() -> Self {
        let mut session = Session::new();
        for name in RuleSpec::all_names() {
            if *name == "nl2br" {
                continue;
            }
            // names come from the fixed table above
            let spec = RuleSpec::from_name(name).unwrap_or(RuleSpec::Nl2br);
            session.enable_spec(spec);
        }
        session
    }

    /// Enable a rule by name with default options
    pub fn enable(&mut self, name: &str) -> Result<(), EngineError> {
        let spec = RuleSpec::from_name(name)?;
        self.enable_spec(spec);
        Ok(())
    }

    /// Enable a rule with explicit options; re-enabling replaces them
    pub fn enable_spec(&mut self, spec: RuleSpec) {
        self.registry.enable(spec, &mut self.options);
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.registry.is_enabled(name)
    }

    pub fn enabled_rules(&self) -> &[&'static str] {
        self.registry.enabled_names()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the shared memo cache, e.g. with a per-tenant one
    pub fn with_cache(mut self, cache: Arc<MemoCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Emit self-closing tags in XHTML form (`<br />`)
    pub fn set_xhtml(&mut self, on: bool) {
        self.xhtml = on;
    }

    /// Render one source string to HTML plus emitted citation records
    pub fn render(&self, src: &str) -> RenderOutput {
        let prepared = normalize::prepare(
            src,
            self.registry.is_enabled("contact_info"),
            self.registry.is_enabled("citation"),
        );
        let mut tree = block::parse(&prepared);
        self.run_inline(&mut tree);
        for rule in self.registry.tree_rules() {
            rule.apply(&mut tree, &self.options, &self.cache);
        }
        render_html(&tree, &self.options, &self.cache, self.xhtml)
    }

    /// Parse the block tree without the inline pass or serialization
    pub fn parse_blocks(&self, src: &str) -> Tree {
        let prepared = normalize::prepare(
            src,
            self.registry.is_enabled("contact_info"),
            self.registry.is_enabled("citation"),
        );
        block::parse(&prepared)
    }

    /// Full tree as the renderer sees it, inline pass included
    pub fn parse(&self, src: &str) -> Tree {
        let mut tree = self.parse_blocks(src);
        self.run_inline(&mut tree);
        for rule in self.registry.tree_rules() {
            rule.apply(&mut tree, &self.options, &self.cache);
        }
        tree
    }

    fn run_inline(&self, tree: &mut Tree) {
        let parser = InlineParser {
            rules: self.registry.inline_rules(),
            options: &self.options,
            nl2br: self.registry.is_enabled("nl2br"),
        };
        let leaves: Vec<NodeId> = tree
            .walk()
            .into_iter()
            .filter(|&id| tree.kind(id).holds_inline_source())
            .collect();
        for leaf in leaves {
            let children = tree.take_children(leaf);
            let mut source = String::new();
            for child in children {
                if let NodeKind::Text { literal } = tree.kind(child) {
                    source.push_str(literal);
                }
            }
            parser.parse_into(tree, leaf, &source);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
