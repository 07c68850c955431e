//! Tokens produced by the lexer and consumed by the parser.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display};

/// The kind of a [`Token`]. See spec.md §2/§3.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::Character => "character",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
        };
        f.write_str(value)
    }
}

/// An immutable `(kind, literal, index)` record (spec.md §3.1).
///
/// `index` is the 0-based byte offset of the token's first character in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub index: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, index: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            index,
        }
    }

    /// Keywords are lexed as plain identifiers; this tests the literal text.
    pub fn is_literal(&self, literal: &str) -> bool {
        self.literal == literal
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind, self.literal)
    }
}

pub const KEYWORDS: &[&str] = &[
    "LET", "DEF", "DO", "END", "IF", "ELSE", "FOR", "IN", "WHILE", "RETURN", "NIL", "TRUE",
    "FALSE", "AND", "OR",
];

/// `KEYWORDS` as a set, built once, for the parser's name-vs-keyword check.
pub static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());

/// Whether `literal` is reserved and therefore not a valid identifier.
pub fn is_keyword(literal: &str) -> bool {
    KEYWORD_SET.contains(literal)
}
