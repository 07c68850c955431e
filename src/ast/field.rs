use crate::scope::VarSymbol;

use super::Expr;

/// `Field { name, typeName, value: Option<Expr>, variable: Option<VarSymbol>
/// }` (spec.md §3.2). `type_name` is `Option` at the parser level since the
/// grammar's `(':' IDENT)?` is syntactically optional (spec.md §4.2); the
/// analyzer requires it to be present (spec.md §4.4).
#[derive(Clone)]
pub struct Field<T> {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr<T>>,
    pub position: usize,
    pub variable: Option<VarSymbol>,
}
