use std::{error::Error, fmt::Display};

/// Type-dispatch failure, division by zero, missing field/method, or a
/// return-type mismatch surfacing at call site (spec.md §7.4). No position is
/// carried; the analyzer having already run rules most of these out for
/// well-typed programs, so a `RuntimeError` in practice only ever reports a
/// genuinely dynamic failure (division by zero, an exhausted iterable, a
/// missing field/method on an object value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for RuntimeError {}
