//! The abstract syntax tree (spec.md §3.2): tagged variants for top-level,
//! statements, and expressions, threaded through a generic `T` that is `()`
//! on the untyped AST the parser produces and `Type` on the typed AST the
//! analyzer produces (mirrors the teacher's `Ast<T>`/`info: T` pattern).

mod access;
mod assignment;
mod binary;
mod call;
mod declaration;
mod expr;
mod field;
mod for_loop;
mod group;
mod if_statement;
mod literal;
mod method;
mod return_stmt;
mod source;
mod stmt;
mod while_loop;

pub use self::access::*;
pub use self::assignment::*;
pub use self::binary::*;
pub use self::call::*;
pub use self::declaration::*;
pub use self::expr::*;
pub use self::field::*;
pub use self::for_loop::*;
pub use self::group::*;
pub use self::if_statement::*;
pub use self::literal::*;
pub use self::method::*;
pub use self::return_stmt::*;
pub use self::source::*;
pub use self::stmt::*;
pub use self::while_loop::*;
