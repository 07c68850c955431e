//! The type registry (spec.md §3.3): a small, process-wide, fixed set of
//! predefined types plus the assignability rule. Not extended by user code,
//! since the language has no user-defined types.

use std::fmt::Display;

/// A predefined type. Each variant carries its own surface name, host-language
/// name, and (currently empty, since no user-defined types exist) declared
/// fields/methods via the methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Any,
    Nil,
    Comparable,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    IntegerIterable,
}

impl Type {
    pub const ALL: &'static [Type] = &[
        Type::Any,
        Type::Nil,
        Type::Comparable,
        Type::Boolean,
        Type::Integer,
        Type::Decimal,
        Type::Character,
        Type::String,
        Type::IntegerIterable,
    ];

    /// The surface-language spelling, as it appears in a type annotation.
    pub fn surface_name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::Nil => "Nil",
            Type::Comparable => "Comparable",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::IntegerIterable => "IntegerIterable",
        }
    }

    /// The name the translator emits for this type in host-language source.
    pub fn host_name(&self) -> &'static str {
        match self {
            Type::Any => "Object",
            Type::Nil => "void",
            Type::Comparable => "Comparable",
            Type::Boolean => "boolean",
            Type::Integer => "int",
            Type::Decimal => "double",
            Type::Character => "char",
            Type::String => "String",
            Type::IntegerIterable => "Iterable<Integer>",
        }
    }

    /// Look a type up by its surface name (the type registry lookup used by
    /// the analyzer when resolving `: IDENT` annotations).
    pub fn from_surface_name(name: &str) -> Option<Type> {
        Type::ALL.iter().copied().find(|t| t.surface_name() == name)
    }

    /// The fields this type declares (none; no user-defined types exist).
    pub fn fields(&self) -> &'static [(&'static str, Type)] {
        &[]
    }

    /// The methods this type declares, keyed by name and arity (none; no
    /// user-defined types exist, and the builtins `print`/`range` are free
    /// functions rather than receiver methods).
    pub fn methods(&self) -> &'static [(&'static str, usize, Type)] {
        &[]
    }

    /// `requireAssignable(target, source)` with `self` as the source
    /// (spec.md §3.3): succeeds iff `target == source`, or `target == Any`,
    /// or `target == Comparable` and `source` is one of the comparable
    /// primitives.
    pub fn is_assignable_to(&self, target: Type) -> bool {
        if target == *self || target == Type::Any {
            return true;
        }
        if target == Type::Comparable {
            return matches!(
                self,
                Type::Integer | Type::Decimal | Type::Character | Type::String
            );
        }
        false
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.surface_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignability_rule() {
        assert!(Type::Integer.is_assignable_to(Type::Integer));
        assert!(Type::Integer.is_assignable_to(Type::Any));
        assert!(Type::Integer.is_assignable_to(Type::Comparable));
        assert!(!Type::IntegerIterable.is_assignable_to(Type::Comparable));
        assert!(!Type::Integer.is_assignable_to(Type::Decimal));
    }

    #[test]
    fn round_trips_surface_names() {
        for ty in Type::ALL {
            assert_eq!(Type::from_surface_name(ty.surface_name()), Some(*ty));
        }
    }
}
