//! Translator (spec.md §4.6): emits host-language (Java-like) source text for
//! a typed AST. A pure string-building pass; unlike the teacher's `compiler`
//! module it has no scope/constant bookkeeping of its own, since every name
//! and type it needs was already resolved by the analyzer onto the typed
//! AST's `variable`/`function` fields.

use std::fmt::Write as _;

use crate::{
    ast::{Access, Assignment, Expr, ForLoop, FunctionCall, IfStatement, Literal, Method, ReturnStmt, Source,
        Stmt, WhileLoop},
    types::Type,
};

const INDENT: &str = "    ";

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Emit a full compilation unit as a single `Main` class (spec.md §4.6).
pub fn translate(source: &Source<Type>) -> String {
    let mut out = String::new();

    writeln!(out, "class Main {{").unwrap();
    for field in &source.fields {
        let ty = field
            .variable
            .as_ref()
            .expect("analyzer resolves every field's variable")
            .ty;
        let mut line = format!("{}{} {}", indent(1), ty.host_name(), field.name);
        if let Some(value) = &field.value {
            write!(line, " = {}", emit_expr(value)).unwrap();
        }
        line.push(';');
        writeln!(out, "{line}").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "{}public static void main(String[] args) {{", indent(1)).unwrap();
    writeln!(out, "{}System.exit(new Main().main());", indent(2)).unwrap();
    writeln!(out, "{}}}", indent(1)).unwrap();

    for method in &source.methods {
        writeln!(out).unwrap();
        write_method(&mut out, method);
    }

    writeln!(out, "}}").unwrap();
    out
}

fn write_method(out: &mut String, method: &Method<Type>) {
    let function = method
        .function
        .as_ref()
        .expect("analyzer resolves every method's function symbol");

    let params = method
        .parameters
        .iter()
        .zip(function.parameter_types.iter())
        .map(|(name, ty)| format!("{} {name}", ty.host_name()))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(
        out,
        "{}{} {}({params}) {{",
        indent(1),
        function.return_type.host_name(),
        method.name
    )
    .unwrap();

    for stmt in &method.body {
        write_stmt(out, stmt, 2);
    }

    writeln!(out, "{}}}", indent(1)).unwrap();
}

fn write_stmts(out: &mut String, stmts: &[Stmt<Type>], level: usize) {
    for stmt in stmts {
        write_stmt(out, stmt, level);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt<Type>, level: usize) {
    match stmt {
        Stmt::Expression(expr) => {
            writeln!(out, "{}{};", indent(level), emit_expr(expr)).unwrap();
        }
        Stmt::Declaration(decl) => {
            let ty = decl
                .variable
                .as_ref()
                .expect("analyzer resolves every declaration's variable")
                .ty;
            let mut line = format!("{}{} {}", indent(level), ty.host_name(), decl.name);
            if let Some(value) = &decl.value {
                write!(line, " = {}", emit_expr(value)).unwrap();
            }
            line.push(';');
            writeln!(out, "{line}").unwrap();
        }
        Stmt::Assignment(Assignment { receiver, value, .. }) => {
            writeln!(
                out,
                "{}{} = {};",
                indent(level),
                emit_expr(receiver),
                emit_expr(value)
            )
            .unwrap();
        }
        Stmt::If(IfStatement {
            condition,
            then_branch,
            else_branch,
            ..
        }) => {
            writeln!(out, "{}if ({}) {{", indent(level), emit_expr(condition)).unwrap();
            write_stmts(out, then_branch, level + 1);
            if else_branch.is_empty() {
                writeln!(out, "{}}}", indent(level)).unwrap();
            } else {
                writeln!(out, "{}}} else {{", indent(level)).unwrap();
                write_stmts(out, else_branch, level + 1);
                writeln!(out, "{}}}", indent(level)).unwrap();
            }
        }
        Stmt::For(ForLoop { name, iterable, body, .. }) => {
            writeln!(
                out,
                "{}for (int {name} : {}) {{",
                indent(level),
                emit_expr(iterable)
            )
            .unwrap();
            write_stmts(out, body, level + 1);
            writeln!(out, "{}}}", indent(level)).unwrap();
        }
        Stmt::While(WhileLoop { condition, body, .. }) => {
            writeln!(out, "{}while ({}) {{", indent(level), emit_expr(condition)).unwrap();
            write_stmts(out, body, level + 1);
            writeln!(out, "{}}}", indent(level)).unwrap();
        }
        Stmt::Return(ReturnStmt { value, .. }) => {
            writeln!(out, "{}return {};", indent(level), emit_expr(value)).unwrap();
        }
    }
}

fn emit_expr(expr: &Expr<Type>) -> String {
    match expr {
        Expr::Literal { value, .. } => emit_literal(value),
        Expr::Group(group) => format!("({})", emit_expr(&group.inner)),
        Expr::Binary(binary) => {
            let op = match binary.op.as_str() {
                "AND" => "&&",
                "OR" => "||",
                other => other,
            };
            format!("{} {op} {}", emit_expr(&binary.left), emit_expr(&binary.right))
        }
        Expr::Access(access) => emit_access(access),
        Expr::Function(call) => emit_call(call),
    }
}

fn emit_access(access: &Access<Type>) -> String {
    let host_name = access
        .variable
        .as_ref()
        .map(|v| v.host_name.clone())
        .unwrap_or_else(|| access.name.clone());
    match &access.receiver {
        None => host_name,
        Some(receiver) => format!("{}.{host_name}", emit_expr(receiver)),
    }
}

fn emit_call(call: &FunctionCall<Type>) -> String {
    let host_name = call
        .function
        .as_ref()
        .map(|f| f.host_name.clone())
        .unwrap_or_else(|| call.name.clone());
    let args = call
        .arguments
        .iter()
        .map(emit_expr)
        .collect::<Vec<_>>()
        .join(", ");
    match &call.receiver {
        None => format!("{host_name}({args})"),
        Some(receiver) => format!("{}.{host_name}({args})", emit_expr(receiver)),
    }
}

fn emit_literal(literal: &Literal) -> String {
    match literal {
        Literal::Nil => "null".to_owned(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Integer(i) => i.to_string(),
        Literal::Decimal(d) => d.to_string(),
        Literal::Character(c) => format!("'{}'", escape_char(*c)),
        Literal::String(s) => format!("\"{}\"", escape_str(s)),
    }
}

/// Inverse of `lexer::unescape_literal`'s escape mapping (spec.md §4.2).
fn escape_char(c: char) -> String {
    match c {
        '\u{8}' => "\\b".to_owned(),
        '\n' => "\\n".to_owned(),
        '\r' => "\\r".to_owned(),
        '\t' => "\\t".to_owned(),
        '\'' => "\\'".to_owned(),
        '\\' => "\\\\".to_owned(),
        other => other.to_string(),
    }
}

fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::{lexer::Lexer, parser::Parser, typechecker};

    use super::*;

    #[test]
    fn emits_field_and_main() {
        let tokens = Lexer::new("LET x: Integer = 1; DEF main(): Integer DO RETURN x + 2; END")
            .lex()
            .unwrap();
        let ast = Parser::parse(tokens).unwrap();
        let (typed, _) = typechecker::analyze(ast).unwrap();
        let out = translate(&typed);
        assert!(out.contains("int x = 1;"));
        assert!(out.contains("int main() {"));
        assert!(out.contains("return x + 2;"));
        assert!(out.contains("System.exit(new Main().main());"));
    }

    #[test]
    fn escapes_string_literals() {
        let tokens = Lexer::new("DEF main(): Integer DO print(\"a\\nb\"); RETURN 0; END")
            .lex()
            .unwrap();
        let ast = Parser::parse(tokens).unwrap();
        let (typed, _) = typechecker::analyze(ast).unwrap();
        let out = translate(&typed);
        assert!(out.contains("\"a\\nb\""));
    }
}
