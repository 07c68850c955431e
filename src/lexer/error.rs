use std::{error::Error, fmt::Display};

/// A lex failure: invalid character, unterminated literal, or bad escape
/// (spec.md §7.1). Carries the 0-based byte index of the offending position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub index: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            index,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.message, self.index)
    }
}

impl Error for LexError {}
