//! Scope / Environment (spec.md §3.4, §4.3): a lexical scope chain binding
//! names to variables and (name, arity) pairs to functions.
//!
//! Modeled as a parent-chain of scope frames rather than a flat stack, since
//! invoking a user-defined method must push a child of the *defining*
//! scope (a true lexical closure) rather than of whatever scope happens to
//! be active at the call site.

mod builtins;

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use crate::{ast::Stmt, types::Type, value::Value};

/// A variable binding: `VarSymbol { surfaceName, hostName, type, mutable
/// value }` (spec.md §3.4). The value cell is shared (`Rc<RefCell<_>>`) so
/// that every resolved reference to this symbol observes the same mutable
/// slot.
#[derive(Clone)]
pub struct VarSymbol {
    pub surface_name: String,
    pub host_name: String,
    pub ty: Type,
    value: Rc<RefCell<Value>>,
}

impl VarSymbol {
    pub fn new(surface_name: impl Into<String>, ty: Type, value: Value) -> Self {
        let surface_name = surface_name.into();
        Self {
            host_name: surface_name.clone(),
            surface_name,
            ty,
            value: Rc::new(RefCell::new(value)),
        }
    }

    pub fn uninitialized(surface_name: impl Into<String>, ty: Type) -> Self {
        Self::new(surface_name, ty, Value::Nil)
    }

    pub fn get(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: Value) {
        *self.value.borrow_mut() = value;
    }
}

/// What running a [`FnSymbol`] actually does: either a builtin implemented
/// in Rust, or a user-defined method with a body to interpret.
#[derive(Clone)]
pub enum FnBody {
    Builtin(fn(&[Value]) -> Value),
    UserDefined {
        parameters: Vec<String>,
        body: Rc<RefCell<Vec<Stmt<Type>>>>,
        defining_scope: Scope,
    },
}

/// A function binding: `FnSymbol { surfaceName, hostName, parameterTypes,
/// returnType, bodyInvoker }` (spec.md §3.4).
#[derive(Clone)]
pub struct FnSymbol {
    pub surface_name: String,
    pub host_name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub body: FnBody,
}

#[derive(Default)]
struct ScopeData {
    parent: Option<Scope>,
    variables: HashMap<String, VarSymbol>,
    functions: HashMap<(String, usize), FnSymbol>,
}

/// A scope frame together with its ancestors. Cheap to clone: clones share
/// the same underlying frame.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<ScopeData>>);

impl Scope {
    fn new(parent: Option<Scope>) -> Self {
        Scope(Rc::new(RefCell::new(ScopeData {
            parent,
            ..Default::default()
        })))
    }

    /// The environment pre-defined by spec.md §4.3: the built-in variable
    /// `nil` and the built-in functions `print`/`range`.
    pub fn global() -> Self {
        let scope = Scope::new(None);
        builtins::install(&scope);
        scope
    }

    /// Push a child of this scope.
    pub fn child(&self) -> Self {
        Scope::new(Some(self.clone()))
    }

    /// `lookup*` walks the chain root-ward (spec.md §3.4): innermost scope
    /// first, then its parent, and so on.
    pub fn lookup_variable(&self, name: &str) -> Option<VarSymbol> {
        if let Some(found) = self.0.borrow().variables.get(name) {
            return Some(found.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.lookup_variable(name))
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<FnSymbol> {
        let key = (name.to_owned(), arity);
        if let Some(found) = self.0.borrow().functions.get(&key) {
            return Some(found.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.lookup_function(name, arity))
    }

    pub fn contains_variable_locally(&self, name: &str) -> bool {
        self.0.borrow().variables.contains_key(name)
    }

    pub fn contains_function_locally(&self, name: &str, arity: usize) -> bool {
        self.0
            .borrow()
            .functions
            .contains_key(&(name.to_owned(), arity))
    }

    /// `define*` installs only in the local scope (spec.md §3.4). Returns
    /// `false` if a binding with the same name already exists locally
    /// (redefinition is a static error the caller must report).
    pub fn define_variable(&self, symbol: VarSymbol) -> bool {
        if self.contains_variable_locally(&symbol.surface_name) {
            return false;
        }
        self.0
            .borrow_mut()
            .variables
            .insert(symbol.surface_name.clone(), symbol);
        true
    }

    pub fn define_function(&self, symbol: FnSymbol) -> bool {
        let arity = symbol.parameter_types.len();
        if self.contains_function_locally(&symbol.surface_name, arity) {
            return false;
        }
        self.0
            .borrow_mut()
            .functions
            .insert((symbol.surface_name.clone(), arity), symbol);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_root_ward() {
        let root = Scope::global();
        root.define_variable(VarSymbol::new("x", Type::Integer, Value::Integer(1.into())));
        let child = root.child();
        assert!(child.lookup_variable("x").is_some());
        assert!(child.lookup_variable("nil").is_some());
    }

    #[test]
    fn define_only_installs_locally() {
        let root = Scope::global();
        let child = root.child();
        child.define_variable(VarSymbol::new("y", Type::Integer, Value::Integer(2.into())));
        assert!(child.lookup_variable("y").is_some());
        assert!(!root.contains_variable_locally("y"));
    }

    #[test]
    fn redefinition_in_same_scope_is_rejected() {
        let root = Scope::global();
        assert!(root.define_variable(VarSymbol::new("z", Type::Integer, Value::Nil)));
        assert!(!root.define_variable(VarSymbol::new("z", Type::Integer, Value::Nil)));
    }
}
