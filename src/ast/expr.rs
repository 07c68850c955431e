use super::{Access, Binary, FunctionCall, Group, Literal};

/// Expression nodes (spec.md §3.2). Each variant carries a resolved `type`
/// after analysis via the `T` parameter: `T = ()` on the untyped AST
/// produced by the parser, `T = Type` on the typed AST produced by the
/// analyzer (mirrors the teacher's `Expression<T>`/`info: T` pattern).
#[derive(Clone)]
pub enum Expr<T> {
    Literal {
        value: Literal,
        position: usize,
        info: T,
    },
    Group(Group<T>),
    Binary(Binary<T>),
    Access(Access<T>),
    Function(FunctionCall<T>),
}

impl<T> Expr<T>
where
    T: Clone,
{
    pub fn info(&self) -> T {
        match self {
            Expr::Literal { info, .. } => info.clone(),
            Expr::Group(Group { info, .. }) => info.clone(),
            Expr::Binary(Binary { info, .. }) => info.clone(),
            Expr::Access(Access { info, .. }) => info.clone(),
            Expr::Function(FunctionCall { info, .. }) => info.clone(),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Expr::Literal { position, .. } => *position,
            Expr::Group(Group { position, .. }) => *position,
            Expr::Binary(Binary { position, .. }) => *position,
            Expr::Access(Access { position, .. }) => *position,
            Expr::Function(FunctionCall { position, .. }) => *position,
        }
    }
}
