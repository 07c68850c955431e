use super::{Expr, Stmt};

/// `If { condition: Expr, then: [Stmt], else: [Stmt] }` (spec.md §3.2).
#[derive(Clone)]
pub struct IfStatement<T> {
    pub condition: Expr<T>,
    pub then_branch: Vec<Stmt<T>>,
    pub else_branch: Vec<Stmt<T>>,
    pub position: usize,
}
