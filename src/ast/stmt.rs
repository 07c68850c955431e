use super::{Assignment, Declaration, Expr, ForLoop, IfStatement, ReturnStmt, WhileLoop};

/// Statement nodes (spec.md §3.2), tagged by variant.
#[derive(Clone)]
pub enum Stmt<T> {
    Expression(Expr<T>),
    Declaration(Declaration<T>),
    Assignment(Assignment<T>),
    If(IfStatement<T>),
    For(ForLoop<T>),
    While(WhileLoop<T>),
    Return(ReturnStmt<T>),
}

impl<T> Stmt<T> {
    pub fn position(&self) -> usize {
        match self {
            Stmt::Expression(expr) => match expr {
                Expr::Literal { position, .. } => *position,
                Expr::Group(g) => g.position,
                Expr::Binary(b) => b.position,
                Expr::Access(a) => a.position,
                Expr::Function(c) => c.position,
            },
            Stmt::Declaration(d) => d.position,
            Stmt::Assignment(a) => a.position,
            Stmt::If(i) => i.position,
            Stmt::For(f) => f.position,
            Stmt::While(w) => w.position,
            Stmt::Return(r) => r.position,
        }
    }
}
