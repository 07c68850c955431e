use crate::scope::VarSymbol;

use super::Expr;

/// `Access { receiver: Option<Expr>, name, variable: Option<VarSymbol> }`
/// (spec.md §3.2). `variable` is filled in by the analyzer; it stays `None`
/// on the untyped AST.
#[derive(Clone)]
pub struct Access<T> {
    pub receiver: Option<Box<Expr<T>>>,
    pub name: String,
    pub position: usize,
    pub info: T,
    pub variable: Option<VarSymbol>,
}
