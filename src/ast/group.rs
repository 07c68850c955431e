use super::Expr;

/// A parenthesized binary expression (spec.md §3.2: "`Group(inner: Expr)` —
/// must wrap a `Binary`").
#[derive(Clone)]
pub struct Group<T> {
    pub inner: Box<Expr<T>>,
    pub position: usize,
    pub info: T,
}
