//! Rule registry and pipeline
//!
//!     Extension rules hook into two phases: inline rules run during the
//!     inline scan of each leaf block, tree rules run over the finished tree
//!     before rendering. Each rule is named, carries a priority, and is
//!     enabled per session; the rule set is closed (a fixed tagged variant,
//!     `RuleSpec`), so enabling by name is a total table lookup and an
//!     unknown name is a configuration error, the engine's only fatal error.
//!
//! Conflict policy
//!
//!     When two rules could match the same position, priority order decides
//!     (lower runs first, ties by registration order); the first match wins
//!     and no backtracking happens across rules. Disabling a rule never
//!     corrupts parsing of unrelated constructs: every rule either consumes
//!     a span or leaves the scanner exactly where it was.

pub mod citation;
pub mod config;
pub mod contact;
pub mod highlight;
pub mod image;
pub mod link;
pub mod math;

use crate::ast::Tree;
use crate::cache::MemoCache;
use crate::error::EngineError;
use crate::inline::InlineScan;
use config::{
    CitationOptions, HighlightOptions, ImageOptions, LinkOptions, MathOptions, Options,
};

/// A rule consulted during the inline scan
pub trait InlineRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Trigger character; the rule is only consulted when the scanner sits
    /// on this character
    fn marker(&self) -> char;

    /// Lower runs earlier at the same position
    fn priority(&self) -> i32;

    /// Either emit node(s) and return the consumed byte count, or return
    /// `None` and leave the scanner untouched
    fn scan(&self, scan: &mut InlineScan<'_, '_, '_>) -> Option<usize>;
}

/// A rule applied to the finished tree before rendering
pub trait TreeRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, tree: &mut Tree, options: &Options, cache: &MemoCache);
}

/// The closed set of extension rules, each with its configuration
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    Link(LinkOptions),
    Image(ImageOptions),
    MathInline(MathOptions),
    MathDisplay(MathOptions),
    Citation(CitationOptions),
    ContactInfo,
    Highlight(HighlightOptions),
    /// Render soft newlines as `<br>`
    Nl2br,
}

impl RuleSpec {
    pub fn name(&self) -> &'static str {
        match self {
            RuleSpec::Link(_) => "link",
            RuleSpec::Image(_) => "image",
            RuleSpec::MathInline(_) => "math_inline",
            RuleSpec::MathDisplay(_) => "math_display",
            RuleSpec::Citation(_) => "citation",
            RuleSpec::ContactInfo => "contact_info",
            RuleSpec::Highlight(_) => "highlight",
            RuleSpec::Nl2br => "nl2br",
        }
    }

    /// Spec with default options for a rule name
    pub fn from_name(name: &str) -> Result<RuleSpec, EngineError> {
        match name {
            "link" => Ok(RuleSpec::Link(LinkOptions::default())),
            "image" => Ok(RuleSpec::Image(ImageOptions::default())),
            "math_inline" => Ok(RuleSpec::MathInline(MathOptions::default())),
            "math_display" => Ok(RuleSpec::MathDisplay(MathOptions::default())),
            "citation" => Ok(RuleSpec::Citation(CitationOptions::default())),
            "contact_info" => Ok(RuleSpec::ContactInfo),
            "highlight" => Ok(RuleSpec::Highlight(HighlightOptions::default())),
            "nl2br" => Ok(RuleSpec::Nl2br),
            other => Err(EngineError::UnknownRule(other.to_string())),
        }
    }

    /// Every known rule name, in default registration order
    pub fn all_names() -> &'static [&'static str] {
        &[
            "link",
            "image",
            "math_inline",
            "math_display",
            "citation",
            "contact_info",
            "highlight",
            "nl2br",
        ]
    }
}

/// Phase-specific ordered rule lists for one session
#[derive(Default)]
pub struct Registry {
    inline: Vec<Box<dyn InlineRule>>,
    tree: Vec<Box<dyn TreeRule>>,
    enabled: Vec<&'static str>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Install a rule and copy its options into the session aggregate.
    /// Enabling the same rule twice replaces its configuration.
    pub fn enable(&mut self, spec: RuleSpec, options: &mut Options) {
        let name = spec.name();
        if !self.enabled.contains(&name) {
            self.enabled.push(name);
        }
        match spec {
            RuleSpec::Link(opts) => {
                options.link = opts;
                self.add_inline(Box::new(link::LinkRule));
            }
            RuleSpec::Image(opts) => {
                options.image = opts;
                self.add_inline(Box::new(image::ImageRule));
            }
            RuleSpec::MathInline(opts) => {
                options.math_inline = opts;
                self.add_inline(Box::new(math::MathInlineRule));
            }
            RuleSpec::MathDisplay(opts) => {
                options.math_display = opts;
                self.add_inline(Box::new(math::MathDisplayRule));
            }
            RuleSpec::Citation(opts) => {
                options.citation = opts;
                self.add_inline(Box::new(citation::CitationRule));
            }
            RuleSpec::ContactInfo => {
                self.add_inline(Box::new(contact::ContactInfoRule));
            }
            RuleSpec::Highlight(opts) => {
                options.highlight = opts;
                self.add_tree(Box::new(highlight::HighlightRule));
            }
            RuleSpec::Nl2br => {}
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(&name)
    }

    pub fn enabled_names(&self) -> &[&'static str] {
        &self.enabled
    }

    pub fn inline_rules(&self) -> &[Box<dyn InlineRule>] {
        &self.inline
    }

    pub fn tree_rules(&self) -> &[Box<dyn TreeRule>] {
        &self.tree
    }

    fn add_inline(&mut self, rule: Box<dyn InlineRule>) {
        self.inline.retain(|r| r.name() != rule.name());
        self.inline.push(rule);
        // stable sort keeps registration order within a priority slot
        self.inline.sort_by_key(|r| r.priority());
    }

    fn add_tree(&mut self, rule: Box<dyn TreeRule>) {
        self.tree.retain(|r| r.name() != rule.name());
        self.tree.push(rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_name_is_error() {
        let err = RuleSpec::from_name("sparkle").unwrap_err();
        assert_eq!(err, EngineError::UnknownRule("sparkle".to_string()));
    }

    #[test]
    fn test_every_listed_name_resolves() {
        for name in RuleSpec::all_names() {
            assert!(RuleSpec::from_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_enable_orders_by_priority() {
        let mut registry = Registry::new();
        let mut options = Options::default();
        registry.enable(RuleSpec::from_name("math_inline").unwrap(), &mut options);
        registry.enable(RuleSpec::from_name("math_display").unwrap(), &mut options);
        let names: Vec<_> = registry.inline_rules().iter().map(|r| r.name()).collect();
        // display math must be consulted before inline math on `$$`
        assert_eq!(names, vec!["math_display", "math_inline"]);
    }

    #[test]
    fn test_reenable_replaces_options() {
        let mut registry = Registry::new();
        let mut options = Options::default();
        registry.enable(RuleSpec::Link(LinkOptions::default()), &mut options);
        let custom = LinkOptions {
            open_links_in_new_tab: false,
            ..LinkOptions::default()
        };
        registry.enable(RuleSpec::Link(custom), &mut options);
        assert!(!options.link.open_links_in_new_tab);
        assert_eq!(
            registry
                .inline_rules()
                .iter()
                .filter(|r| r.name() == "link")
                .count(),
            1
        );
    }
}
