//! Parsing the math token stream into a presentation tree, and emitting MathML
//!
//! The tree mirrors MathML presentation structure: rows, identifiers,
//! numbers, operators, scripts, fractions, roots. Prime runs merge into a
//! single bounded superscript so a base never ends up with two superscripts.

use super::lexer::MathToken;
use crate::render::escape::escape_html;

/// Nesting bound for groups; deeper input degrades to plain text
const MAX_DEPTH: usize = 32;

/// Longest prime run rendered; longer runs are clamped
const MAX_PRIMES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum MathNode {
    Row(Vec<MathNode>),
    Ident(String),
    Number(String),
    Operator(String),
    Text(String),
    Sup(Box<MathNode>, Box<MathNode>),
    Sub(Box<MathNode>, Box<MathNode>),
    SubSup(Box<MathNode>, Box<MathNode>, Box<MathNode>),
    Frac(Box<MathNode>, Box<MathNode>),
    Sqrt(Box<MathNode>),
}

struct Cursor<'a> {
    tokens: &'a [MathToken],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a MathToken> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a MathToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }
}

/// Parse a full token stream; `None` on unbalanced groups or over-deep nesting
pub fn parse(tokens: &[MathToken]) -> Option<MathNode> {
    let mut cursor = Cursor { tokens, pos: 0 };
    let items = parse_sequence(&mut cursor, 0)?;
    if cursor.peek().is_some() {
        // stray closing brace
        return None;
    }
    Some(MathNode::Row(items))
}

fn parse_sequence(cursor: &mut Cursor, depth: usize) -> Option<Vec<MathNode>> {
    let mut items = Vec::new();
    while let Some(token) = cursor.peek() {
        if matches!(token, MathToken::CloseBrace) {
            break;
        }
        items.push(parse_scripted(cursor, depth)?);
    }
    Some(items)
}

/// One atom plus any `^`, `_`, and prime suffixes attached to it
fn parse_scripted(cursor: &mut Cursor, depth: usize) -> Option<MathNode> {
    let base = parse_atom(cursor, depth)?;

    let mut sup: Option<MathNode> = None;
    let mut sub: Option<MathNode> = None;

    loop {
        match cursor.peek() {
            Some(MathToken::Primes(count)) => {
                let count = (*count).min(MAX_PRIMES);
                cursor.bump();
                let primes = MathNode::Operator("′".repeat(count));
                sup = Some(match sup {
                    None => primes,
                    Some(existing) => MathNode::Row(vec![existing, primes]),
                });
            }
            Some(MathToken::Caret) => {
                cursor.bump();
                let exp = parse_atom(cursor, depth)?;
                sup = Some(match sup {
                    None => exp,
                    Some(existing) => MathNode::Row(vec![existing, exp]),
                });
            }
            Some(MathToken::Underscore) => {
                cursor.bump();
                let s = parse_atom(cursor, depth)?;
                sub = Some(match sub {
                    None => s,
                    Some(existing) => MathNode::Row(vec![existing, s]),
                });
            }
            _ => break,
        }
    }

    Some(match (sub, sup) {
        (None, None) => base,
        (None, Some(sup)) => MathNode::Sup(Box::new(base), Box::new(sup)),
        (Some(sub), None) => MathNode::Sub(Box::new(base), Box::new(sub)),
        (Some(sub), Some(sup)) => {
            MathNode::SubSup(Box::new(base), Box::new(sub), Box::new(sup))
        }
    })
}

fn parse_atom(cursor: &mut Cursor, depth: usize) -> Option<MathNode> {
    if depth > MAX_DEPTH {
        return None;
    }
    match cursor.bump()? {
        MathToken::OpenBrace => {
            let items = parse_sequence(cursor, depth + 1)?;
            match cursor.bump() {
                Some(MathToken::CloseBrace) => Some(unwrap_row(items)),
                _ => None,
            }
        }
        MathToken::CloseBrace => None,
        MathToken::Command(name) => parse_command(name, cursor, depth),
        MathToken::Escaped(ch) => Some(MathNode::Operator(ch.clone())),
        MathToken::Number(n) => Some(MathNode::Number(n.clone())),
        MathToken::Letter(l) => Some(MathNode::Ident(l.clone())),
        MathToken::Symbol(s) => Some(MathNode::Operator(s.clone())),
        // a script marker or prime with no base: treat as a literal operator
        MathToken::Caret => Some(MathNode::Operator("^".to_string())),
        MathToken::Underscore => Some(MathNode::Operator("_".to_string())),
        MathToken::Primes(count) => {
            Some(MathNode::Operator("′".repeat((*count).min(MAX_PRIMES))))
        }
    }
}

fn parse_command(name: &str, cursor: &mut Cursor, depth: usize) -> Option<MathNode> {
    match name {
        "frac" => {
            let num = parse_atom(cursor, depth + 1)?;
            let den = parse_atom(cursor, depth + 1)?;
            Some(MathNode::Frac(Box::new(num), Box::new(den)))
        }
        "sqrt" => {
            let body = parse_atom(cursor, depth + 1)?;
            Some(MathNode::Sqrt(Box::new(body)))
        }
        _ => Some(symbol_macro(name)),
    }
}

fn unwrap_row(mut items: Vec<MathNode>) -> MathNode {
    if items.len() == 1 {
        items.pop().unwrap()
    } else {
        MathNode::Row(items)
    }
}

/// Resolve a symbol macro to its node; unknown names become plain text
fn symbol_macro(name: &str) -> MathNode {
    let ident = |s: &str| MathNode::Ident(s.to_string());
    let op = |s: &str| MathNode::Operator(s.to_string());
    match name {
        "alpha" => ident("α"),
        "beta" => ident("β"),
        "gamma" => ident("γ"),
        "delta" => ident("δ"),
        "epsilon" => ident("ε"),
        "zeta" => ident("ζ"),
        "eta" => ident("η"),
        "theta" => ident("θ"),
        "iota" => ident("ι"),
        "kappa" => ident("κ"),
        "lambda" => ident("λ"),
        "mu" => ident("μ"),
        "nu" => ident("ν"),
        "xi" => ident("ξ"),
        "pi" => ident("π"),
        "rho" => ident("ρ"),
        "sigma" => ident("σ"),
        "tau" => ident("τ"),
        "upsilon" => ident("υ"),
        "phi" => ident("φ"),
        "chi" => ident("χ"),
        "psi" => ident("ψ"),
        "omega" => ident("ω"),
        "Gamma" => ident("Γ"),
        "Delta" => ident("Δ"),
        "Theta" => ident("Θ"),
        "Lambda" => ident("Λ"),
        "Xi" => ident("Ξ"),
        "Pi" => ident("Π"),
        "Sigma" => ident("Σ"),
        "Phi" => ident("Φ"),
        "Psi" => ident("Ψ"),
        "Omega" => ident("Ω"),
        "infty" => ident("∞"),
        "times" => op("×"),
        "div" => op("÷"),
        "cdot" => op("⋅"),
        "pm" => op("±"),
        "mp" => op("∓"),
        "leq" | "le" => op("≤"),
        "geq" | "ge" => op("≥"),
        "neq" | "ne" => op("≠"),
        "approx" => op("≈"),
        "equiv" => op("≡"),
        "sum" => op("∑"),
        "prod" => op("∏"),
        "int" => op("∫"),
        "partial" => op("∂"),
        "nabla" => op("∇"),
        "rightarrow" | "to" => op("→"),
        "leftarrow" => op("←"),
        "Rightarrow" => op("⇒"),
        "Leftarrow" => op("⇐"),
        "leftrightarrow" => op("↔"),
        "in" => op("∈"),
        "notin" => op("∉"),
        "subset" => op("⊂"),
        "supset" => op("⊃"),
        "subseteq" => op("⊆"),
        "supseteq" => op("⊇"),
        "cup" => op("∪"),
        "cap" => op("∩"),
        "emptyset" => ident("∅"),
        "forall" => op("∀"),
        "exists" => op("∃"),
        "neg" => op("¬"),
        "land" | "wedge" => op("∧"),
        "lor" | "vee" => op("∨"),
        "circ" => op("∘"),
        "prime" => op("′"),
        "ldots" | "dots" => op("…"),
        "cdots" => op("⋯"),
        "mid" => op("∣"),
        "sin" | "cos" | "tan" | "cot" | "sec" | "csc" | "log" | "ln" | "exp" | "lim" | "max"
        | "min" | "det" | "mod" => ident(name),
        other => MathNode::Text(other.to_string()),
    }
}

/// Emit a parsed tree as MathML
pub fn emit(node: &MathNode, display: bool) -> String {
    let mode = if display { "block" } else { "inline" };
    format!("<math display=\"{}\">{}</math>", mode, emit_node(node))
}

fn emit_node(node: &MathNode) -> String {
    match node {
        MathNode::Row(items) => {
            let inner: String = items.iter().map(emit_node).collect();
            format!("<mrow>{inner}</mrow>")
        }
        MathNode::Ident(s) => format!("<mi>{}</mi>", escape_html(s)),
        MathNode::Number(s) => format!("<mn>{}</mn>", escape_html(s)),
        MathNode::Operator(s) => format!("<mo>{}</mo>", escape_html(s)),
        MathNode::Text(s) => format!("<mtext>{}</mtext>", escape_html(s)),
        MathNode::Sup(base, sup) => {
            format!("<msup>{}{}</msup>", emit_node(base), emit_node(sup))
        }
        MathNode::Sub(base, sub) => {
            format!("<msub>{}{}</msub>", emit_node(base), emit_node(sub))
        }
        MathNode::SubSup(base, sub, sup) => format!(
            "<msubsup>{}{}{}</msubsup>",
            emit_node(base),
            emit_node(sub),
            emit_node(sup)
        ),
        MathNode::Frac(num, den) => {
            format!("<mfrac>{}{}</mfrac>", emit_node(num), emit_node(den))
        }
        MathNode::Sqrt(body) => format!("<msqrt>{}</msqrt>", emit_node(body)),
    }
}
