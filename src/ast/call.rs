use crate::scope::FnSymbol;

use super::Expr;

/// `Function { receiver: Option<Expr>, name, arguments: [Expr], function:
/// Option<FnSymbol> }` (spec.md §3.2). Named `FunctionCall` here to avoid
/// clashing with [`crate::ast::Method`], which is the declaration-side node.
#[derive(Clone)]
pub struct FunctionCall<T> {
    pub receiver: Option<Box<Expr<T>>>,
    pub name: String,
    pub arguments: Vec<Expr<T>>,
    pub position: usize,
    pub info: T,
    pub function: Option<FnSymbol>,
}
