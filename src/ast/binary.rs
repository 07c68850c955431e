use super::Expr;

/// `Binary { op: string, left: Expr, right: Expr }` (spec.md §3.2). `op` is
/// the literal operator text (`"+"`, `"AND"`, ...); all binary operators are
/// left-associative (spec.md §4.2).
#[derive(Clone)]
pub struct Binary<T> {
    pub op: String,
    pub left: Box<Expr<T>>,
    pub right: Box<Expr<T>>,
    pub position: usize,
    pub info: T,
}
