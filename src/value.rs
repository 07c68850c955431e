//! Runtime values (spec.md §3.5): a pair of a defining scope and a host
//! value, manipulated only by the interpreter.

use std::{cell::RefCell, fmt::Display, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::scope::Scope;

/// A finite, non-restartable lazy sequence of runtime integers, as required
/// for `FOR` loop drivers (spec.md §9 "Iterables for FOR"). Elements are
/// materialized one at a time and the sequence cannot be replayed once
/// consumed.
pub type IntegerIterable = Rc<RefCell<dyn Iterator<Item = BigInt>>>;

/// The host-level payload of a runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    Iterable(IntegerIterable),
    /// An object with a local scope carrying its fields and callable
    /// methods. No builtin type currently constructs this variant, since
    /// the language has no user-defined types, but it remains part of the
    /// value model for receiver-based access (spec.md §3.5).
    Object(Scope),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Character(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Iterable(_) => f.write_str("<iterable>"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality on the underlying host values (spec.md §3.5).
    /// Iterables and objects have no meaningful structural equality and are
    /// never compared, since neither is `Comparable`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Value::Integer(BigInt::from(1)), Value::Integer(BigInt::from(1)));
        assert_ne!(Value::Integer(BigInt::from(1)), Value::Integer(BigInt::from(2)));
        assert_eq!(Value::String("hi".into()), Value::String("hi".into()));
    }
}
