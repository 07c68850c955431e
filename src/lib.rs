//! Lexer, parser, analyzer, interpreter, and host-language translator for
//! the Glint language (spec.md §1-2).

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;
pub mod translator;
pub mod typechecker;
pub mod types;
pub mod value;

pub use error::GlintError;

use ast::Source;
use types::Type;

pub type GlintResult<T> = Result<T, GlintError>;

/// Run the whole front end (lex, parse, analyze) over a source string,
/// returning the typed AST and the global scope it was resolved against.
pub fn check(src: &str) -> GlintResult<(Source<Type>, scope::Scope)> {
    let tokens = lexer::Lexer::new(src).lex()?;
    let ast = parser::Parser::parse(tokens)?;
    let (typed, scope) = typechecker::analyze(ast)?;
    Ok((typed, scope))
}

/// Lex, parse, analyze, and interpret a source string, returning `main`'s
/// result.
pub fn run(src: &str) -> GlintResult<value::Value> {
    let (typed, scope) = check(src)?;
    Ok(interpreter::interpret(&typed, &scope)?)
}

/// Lex, parse, analyze, and translate a source string into host-language
/// source text.
pub fn translate(src: &str) -> GlintResult<String> {
    let (typed, _) = check(src)?;
    Ok(translator::translate(&typed))
}