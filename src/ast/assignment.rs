use super::Expr;

/// `Assignment { receiver: Expr, value: Expr }` (spec.md §3.2). `receiver`
/// must be an `Access`; enforced by the analyzer, not by this type.
#[derive(Clone)]
pub struct Assignment<T> {
    pub receiver: Expr<T>,
    pub value: Expr<T>,
    pub position: usize,
}
