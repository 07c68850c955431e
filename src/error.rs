//! Unifies the per-phase error types into a single kind the CLI driver can
//! report, mirroring the teacher's practice of giving every phase its own
//! error type with a shared `Display`/`Error` shape.

use std::fmt::Display;

use crate::{
    interpreter::RuntimeError, lexer::LexError, parser::ParseError, typechecker::AnalyzeError,
};

/// A single error kind wrapping whichever phase produced it, plus the
/// driver-level failure modes (`Io`, `Json`) spec.md's core doesn't need but
/// a runnable binary does.
#[derive(Debug)]
pub enum GlintError {
    Lex(LexError),
    Parse(ParseError),
    Analyze(AnalyzeError),
    Runtime(RuntimeError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for GlintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlintError::Lex(e) => write!(f, "lex error: {e}"),
            GlintError::Parse(e) => write!(f, "parse error: {e}"),
            GlintError::Analyze(e) => write!(f, "analyze error: {e}"),
            GlintError::Runtime(e) => write!(f, "runtime error: {e}"),
            GlintError::Io(e) => write!(f, "io error: {e}"),
            GlintError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for GlintError {}

impl From<LexError> for GlintError {
    fn from(e: LexError) -> Self {
        GlintError::Lex(e)
    }
}

impl From<ParseError> for GlintError {
    fn from(e: ParseError) -> Self {
        GlintError::Parse(e)
    }
}

impl From<AnalyzeError> for GlintError {
    fn from(e: AnalyzeError) -> Self {
        GlintError::Analyze(e)
    }
}

impl From<RuntimeError> for GlintError {
    fn from(e: RuntimeError) -> Self {
        GlintError::Runtime(e)
    }
}

impl From<std::io::Error> for GlintError {
    fn from(e: std::io::Error) -> Self {
        GlintError::Io(e)
    }
}

impl From<serde_json::Error> for GlintError {
    fn from(e: serde_json::Error) -> Self {
        GlintError::Json(e)
    }
}
