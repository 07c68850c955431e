use super::{Expr, Stmt};

/// `While { condition: Expr, body: [Stmt] }` (spec.md §3.2).
#[derive(Clone)]
pub struct WhileLoop<T> {
    pub condition: Expr<T>,
    pub body: Vec<Stmt<T>>,
    pub position: usize,
}
