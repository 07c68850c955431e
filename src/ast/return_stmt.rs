use super::Expr;

/// `Return { value: Expr }` (spec.md §3.2).
#[derive(Clone)]
pub struct ReturnStmt<T> {
    pub value: Expr<T>,
    pub position: usize,
}
