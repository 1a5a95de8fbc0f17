//! Error types for the rendering engine
//!
//! The engine has exactly one failure surface: configuration errors raised
//! before any parsing begins. Parse-phase anomalies never error; malformed
//! constructs degrade to the next-lower construct (an unclosed fence runs to
//! the end of the document, a malformed table becomes a paragraph, and so on).

use std::fmt;

/// Error raised while configuring a render session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A rule name passed to `enable` is not registered
    UnknownRule(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownRule(name) => write!(f, "Unknown rule: '{name}'"),
        }
    }
}

impl std::error::Error for EngineError {}
