use super::{Expr, Stmt};

/// `For { name, iterable: Expr, body: [Stmt] }` (spec.md §3.2).
#[derive(Clone)]
pub struct ForLoop<T> {
    pub name: String,
    pub iterable: Expr<T>,
    pub body: Vec<Stmt<T>>,
    pub position: usize,
}
