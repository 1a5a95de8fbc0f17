//! LaTeX-subset tokenizer for math spans
//!
//! This is the raw tokenization layer: math source in, token stream out.
//! The grammar is a small LaTeX subset: grouping braces, superscript and
//! subscript markers, backslash commands, primes, numbers, letters, and
//! single-character operators. Anything unrecognized still tokenizes (the
//! catch-all `Symbol` arm), so tokenization never fails.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n]+")]
pub enum MathToken {
    #[token("^")]
    Caret,

    #[token("_")]
    Underscore,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    /// `\frac`, `\alpha`, `\sqrt`, …
    #[regex(r"\\[a-zA-Z]+", |lex| lex.slice()[1..].to_string())]
    Command(String),

    /// `\$`, `\{`, `\\` and other escaped literal characters
    #[regex(r"\\[^a-zA-Z]", |lex| lex.slice()[1..].to_string())]
    Escaped(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r"[a-zA-Z]", |lex| lex.slice().to_string())]
    Letter(String),

    /// A run of primes; rendered as a bounded superscript
    #[regex(r"'+", |lex| lex.slice().len())]
    Primes(usize),

    /// Any other single character becomes an operator/symbol token
    #[regex(r".", |lex| lex.slice().to_string(), priority = 1)]
    Symbol(String),
}

/// Tokenize math source; unrecognizable bytes are skipped
pub fn tokenize(source: &str) -> Vec<MathToken> {
    MathToken::lexer(source).flatten().collect()
}
