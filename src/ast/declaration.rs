use crate::scope::VarSymbol;

use super::Expr;

/// `Declaration { name, typeName: Option, value: Option<Expr>, variable:
/// Option<VarSymbol> }` (spec.md §3.2).
#[derive(Clone)]
pub struct Declaration<T> {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr<T>>,
    pub position: usize,
    pub variable: Option<VarSymbol>,
}
