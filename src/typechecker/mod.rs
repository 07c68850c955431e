//! Analyzer (spec.md §4.4): walks the untyped AST the parser produced and
//! produces a typed AST, resolving every name against a [`Scope`] and
//! checking every assignability rule from the type registry (spec.md §3.3)
//! along the way.
//!
//! Mirrors the teacher's typechecker in shape (a `check_*` method per node
//! kind, building a fresh typed tree rather than mutating in place) but
//! walks a hand-rolled AST instead of a parser-generated one.

mod error;

pub use self::error::AnalyzeError;

use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{
    ast::{
        Access, Assignment, Binary, Declaration, Expr, Field, ForLoop, FunctionCall, Group,
        IfStatement, Literal, Method, ReturnStmt, Source, Stmt, WhileLoop,
    },
    scope::{FnBody, FnSymbol, Scope, VarSymbol},
    types::Type,
};

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

fn require_assignable(source: Type, target: Type, what: &str) -> AnalyzeResult<()> {
    if source.is_assignable_to(target) {
        Ok(())
    } else {
        Err(AnalyzeError::new(format!(
            "{what}: cannot assign a value of type {source} to type {target}"
        )))
    }
}

fn resolve_type_name(name: &str) -> AnalyzeResult<Type> {
    Type::from_surface_name(name).ok_or_else(|| AnalyzeError::new(format!("unknown type '{name}'")))
}

/// Analyze a whole compilation unit. The returned scope is the global scope
/// the typed `Source` was checked against; callers that go on to interpret
/// the program reuse it as the outermost environment.
pub fn analyze(source: Source<()>) -> AnalyzeResult<(Source<Type>, Scope)> {
    let global = Scope::global();

    let fields = source
        .fields
        .into_iter()
        .map(|field| check_field(field, &global))
        .collect::<AnalyzeResult<Vec<_>>>()?;

    let methods = source
        .methods
        .into_iter()
        .map(|method| check_method(method, &global))
        .collect::<AnalyzeResult<Vec<_>>>()?;

    let has_main = methods.iter().any(|m| {
        m.parameters.is_empty()
            && m.name == "main"
            && m.function
                .as_ref()
                .is_some_and(|f| f.return_type == Type::Integer)
    });
    if !has_main {
        return Err(AnalyzeError::new(
            "program must declare a 'main' method taking no parameters and returning Integer",
        ));
    }

    Ok((Source { fields, methods }, global))
}

fn check_field(field: Field<()>, scope: &Scope) -> AnalyzeResult<Field<Type>> {
    let Field {
        name,
        type_name,
        value,
        position,
        ..
    } = field;

    let Some(type_name) = type_name else {
        return Err(AnalyzeError::new(format!(
            "field '{name}' is missing a type annotation"
        )));
    };
    let ty = resolve_type_name(&type_name)?;

    let value = value.map(|v| check_expr(v, scope)).transpose()?;
    if let Some(value) = &value {
        require_assignable(value.info(), ty, &format!("field '{name}'"))?;
    }

    let variable = VarSymbol::uninitialized(name.clone(), ty);
    if !scope.define_variable(variable.clone()) {
        return Err(AnalyzeError::new(format!("field '{name}' is already defined")));
    }

    Ok(Field {
        name,
        type_name: Some(type_name),
        value,
        position,
        variable: Some(variable),
    })
}

fn check_method(method: Method<()>, scope: &Scope) -> AnalyzeResult<Method<Type>> {
    let Method {
        name,
        parameters,
        parameter_type_names,
        return_type_name,
        body,
        position,
        ..
    } = method;

    let parameter_types = parameter_type_names
        .iter()
        .map(|n| resolve_type_name(n))
        .collect::<AnalyzeResult<Vec<_>>>()?;

    let return_type = match &return_type_name {
        Some(n) => resolve_type_name(n)?,
        None => Type::Nil,
    };

    let function = FnSymbol {
        surface_name: name.clone(),
        host_name: name.clone(),
        parameter_types: parameter_types.clone(),
        return_type,
        body: FnBody::UserDefined {
            parameters: parameters.clone(),
            body: Default::default(),
            defining_scope: scope.clone(),
        },
    };
    if !scope.define_function(function.clone()) {
        return Err(AnalyzeError::new(format!(
            "method '{name}/{}' is already defined",
            parameters.len()
        )));
    }

    let method_scope = scope.child();
    for (param_name, param_ty) in parameters.iter().zip(parameter_types.iter()) {
        method_scope.define_variable(VarSymbol::uninitialized(param_name.clone(), *param_ty));
    }

    let typed_body = body
        .into_iter()
        .map(|stmt| check_stmt(stmt, &method_scope, return_type))
        .collect::<AnalyzeResult<Vec<_>>>()?;

    if let FnBody::UserDefined { body, .. } = &function.body {
        *body.borrow_mut() = typed_body.clone();
    }

    Ok(Method {
        name,
        parameters,
        parameter_type_names,
        return_type_name,
        body: typed_body,
        position,
        function: Some(function),
    })
}

fn check_stmts(
    stmts: Vec<Stmt<()>>,
    scope: &Scope,
    return_type: Type,
) -> AnalyzeResult<Vec<Stmt<Type>>> {
    stmts
        .into_iter()
        .map(|stmt| check_stmt(stmt, scope, return_type))
        .collect()
}

fn check_stmt(stmt: Stmt<()>, scope: &Scope, return_type: Type) -> AnalyzeResult<Stmt<Type>> {
    match stmt {
        Stmt::Expression(expr) => {
            let expr = check_expr(expr, scope)?;
            if !matches!(expr, Expr::Function(_)) {
                return Err(AnalyzeError::new(
                    "an expression statement must be a function call",
                ));
            }
            Ok(Stmt::Expression(expr))
        }
        Stmt::Declaration(Declaration {
            name,
            type_name,
            value,
            position,
            ..
        }) => {
            let declared = type_name.as_deref().map(resolve_type_name).transpose()?;
            let value = value.map(|v| check_expr(v, scope)).transpose()?;

            let ty = match (declared, &value) {
                (Some(declared), Some(value)) => {
                    require_assignable(value.info(), declared, &format!("declaration '{name}'"))?;
                    declared
                }
                (Some(declared), None) => declared,
                (None, Some(value)) => value.info(),
                (None, None) => {
                    return Err(AnalyzeError::new(format!(
                        "declaration '{name}' needs a type annotation, an initializer, or both"
                    )));
                }
            };

            let variable = VarSymbol::uninitialized(name.clone(), ty);
            if !scope.define_variable(variable.clone()) {
                return Err(AnalyzeError::new(format!(
                    "variable '{name}' is already defined in this scope"
                )));
            }

            Ok(Stmt::Declaration(Declaration {
                name,
                type_name: Some(ty.surface_name().to_owned()),
                value,
                position,
                variable: Some(variable),
            }))
        }
        Stmt::Assignment(Assignment {
            receiver,
            value,
            position,
        }) => {
            let receiver = check_expr(receiver, scope)?;
            if !matches!(receiver, Expr::Access(_)) {
                return Err(AnalyzeError::new(
                    "an assignment target must be a variable or field access",
                ));
            }
            let value = check_expr(value, scope)?;
            require_assignable(value.info(), receiver.info(), "assignment")?;
            Ok(Stmt::Assignment(Assignment {
                receiver,
                value,
                position,
            }))
        }
        Stmt::If(IfStatement {
            condition,
            then_branch,
            else_branch,
            position,
        }) => {
            let condition = check_expr(condition, scope)?;
            require_assignable(condition.info(), Type::Boolean, "if condition")?;
            if then_branch.is_empty() {
                return Err(AnalyzeError::new("an if's then-branch must not be empty"));
            }

            let then_scope = scope.child();
            let then_branch = check_stmts(then_branch, &then_scope, return_type)?;

            let else_scope = scope.child();
            let else_branch = check_stmts(else_branch, &else_scope, return_type)?;

            Ok(Stmt::If(IfStatement {
                condition,
                then_branch,
                else_branch,
                position,
            }))
        }
        Stmt::For(ForLoop {
            name,
            iterable,
            body,
            position,
        }) => {
            let iterable = check_expr(iterable, scope)?;
            require_assignable(iterable.info(), Type::IntegerIterable, "for loop iterable")?;
            if body.is_empty() {
                return Err(AnalyzeError::new("a for loop's body must not be empty"));
            }

            let body_scope = scope.child();
            body_scope.define_variable(VarSymbol::uninitialized(name.clone(), Type::Integer));
            let body = check_stmts(body, &body_scope, return_type)?;

            Ok(Stmt::For(ForLoop {
                name,
                iterable,
                body,
                position,
            }))
        }
        Stmt::While(WhileLoop {
            condition,
            body,
            position,
        }) => {
            let condition = check_expr(condition, scope)?;
            require_assignable(condition.info(), Type::Boolean, "while condition")?;

            let body_scope = scope.child();
            let body = check_stmts(body, &body_scope, return_type)?;

            Ok(Stmt::While(WhileLoop {
                condition,
                body,
                position,
            }))
        }
        Stmt::Return(ReturnStmt { value, position }) => {
            let value = check_expr(value, scope)?;
            require_assignable(value.info(), return_type, "return")?;
            Ok(Stmt::Return(ReturnStmt { value, position }))
        }
    }
}

fn check_expr(expr: Expr<()>, scope: &Scope) -> AnalyzeResult<Expr<Type>> {
    match expr {
        Expr::Literal {
            value, position, ..
        } => {
            let info = match &value {
                Literal::Nil => Type::Nil,
                Literal::Boolean(_) => Type::Boolean,
                Literal::Character(_) => Type::Character,
                Literal::String(_) => Type::String,
                Literal::Integer(i) => {
                    if i.to_i32().is_none() {
                        return Err(AnalyzeError::new(format!(
                            "integer literal '{i}' does not fit in 32 bits"
                        )));
                    }
                    Type::Integer
                }
                Literal::Decimal(d) => {
                    let Some(as_f64) = d.to_f64() else {
                        return Err(AnalyzeError::new(format!(
                            "decimal literal '{d}' cannot be represented"
                        )));
                    };
                    if !as_f64.is_finite() || BigDecimal::from_f64(as_f64).as_ref() != Some(d) {
                        return Err(AnalyzeError::new(format!(
                            "decimal literal '{d}' does not round-trip through a 64-bit float"
                        )));
                    }
                    Type::Decimal
                }
            };
            Ok(Expr::Literal {
                value,
                position,
                info,
            })
        }
        Expr::Group(Group {
            inner, position, ..
        }) => {
            let inner = check_expr(*inner, scope)?;
            if !matches!(inner, Expr::Binary(_)) {
                return Err(AnalyzeError::new("a parenthesized group must wrap a binary expression"));
            }
            let info = inner.info();
            Ok(Expr::Group(Group {
                inner: Box::new(inner),
                position,
                info,
            }))
        }
        Expr::Binary(Binary {
            op,
            left,
            right,
            position,
            ..
        }) => {
            let left = check_expr(*left, scope)?;
            let right = check_expr(*right, scope)?;
            let lt = left.info();
            let rt = right.info();

            let info = match op.as_str() {
                "AND" | "OR" => {
                    require_assignable(lt, Type::Boolean, "logical operand")?;
                    require_assignable(rt, Type::Boolean, "logical operand")?;
                    Type::Boolean
                }
                "<" | "<=" | ">" | ">=" | "==" | "!=" => {
                    require_assignable(lt, Type::Comparable, "comparison operand")?;
                    if lt != rt {
                        return Err(AnalyzeError::new(format!(
                            "cannot compare {lt} with {rt}"
                        )));
                    }
                    Type::Boolean
                }
                "+" => {
                    if lt == Type::String || rt == Type::String {
                        Type::String
                    } else if lt == rt && matches!(lt, Type::Integer | Type::Decimal) {
                        lt
                    } else {
                        return Err(AnalyzeError::new(format!(
                            "cannot add {lt} and {rt}"
                        )));
                    }
                }
                "-" | "*" | "/" => {
                    if lt == rt && matches!(lt, Type::Integer | Type::Decimal) {
                        lt
                    } else {
                        return Err(AnalyzeError::new(format!(
                            "operator '{op}' requires two operands of the same numeric type, found {lt} and {rt}"
                        )));
                    }
                }
                other => return Err(AnalyzeError::new(format!("unknown operator '{other}'"))),
            };

            Ok(Expr::Binary(Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
                info,
            }))
        }
        Expr::Access(Access {
            receiver,
            name,
            position,
            ..
        }) => match receiver {
            None => {
                let variable = scope
                    .lookup_variable(&name)
                    .ok_or_else(|| AnalyzeError::new(format!("unknown variable '{name}'")))?;
                let info = variable.ty;
                Ok(Expr::Access(Access {
                    receiver: None,
                    name,
                    position,
                    info,
                    variable: Some(variable),
                }))
            }
            Some(receiver) => {
                let receiver = check_expr(*receiver, scope)?;
                let receiver_ty = receiver.info();
                let field = receiver_ty
                    .fields()
                    .iter()
                    .find(|(field_name, _)| *field_name == name)
                    .ok_or_else(|| {
                        AnalyzeError::new(format!("type {receiver_ty} has no field '{name}'"))
                    })?;
                Ok(Expr::Access(Access {
                    receiver: Some(Box::new(receiver)),
                    name,
                    position,
                    info: field.1,
                    variable: None,
                }))
            }
        },
        Expr::Function(FunctionCall {
            receiver,
            name,
            arguments,
            position,
            ..
        }) => match receiver {
            None => {
                let arguments = arguments
                    .into_iter()
                    .map(|arg| check_expr(arg, scope))
                    .collect::<AnalyzeResult<Vec<_>>>()?;
                let function = scope
                    .lookup_function(&name, arguments.len())
                    .ok_or_else(|| {
                        AnalyzeError::new(format!(
                            "unknown function '{name}/{}'",
                            arguments.len()
                        ))
                    })?;
                for (index, (arg, expected)) in arguments
                    .iter()
                    .zip(function.parameter_types.iter())
                    .enumerate()
                {
                    require_assignable(
                        arg.info(),
                        *expected,
                        &format!("argument {index} of '{name}'"),
                    )?;
                }
                let info = function.return_type;
                Ok(Expr::Function(FunctionCall {
                    receiver: None,
                    name,
                    arguments,
                    position,
                    info,
                    function: Some(function),
                }))
            }
            Some(receiver) => {
                let receiver = check_expr(*receiver, scope)?;
                let receiver_ty = receiver.info();
                let arguments = arguments
                    .into_iter()
                    .map(|arg| check_expr(arg, scope))
                    .collect::<AnalyzeResult<Vec<_>>>()?;
                let method = receiver_ty
                    .methods()
                    .iter()
                    .find(|(method_name, arity, _)| {
                        *method_name == name && *arity == arguments.len()
                    })
                    .ok_or_else(|| {
                        AnalyzeError::new(format!(
                            "type {receiver_ty} has no method '{name}/{}'",
                            arguments.len()
                        ))
                    })?;
                let info = method.2;
                Ok(Expr::Function(FunctionCall {
                    receiver: Some(Box::new(receiver)),
                    name,
                    arguments,
                    position,
                    info,
                    function: None,
                }))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::Lexer, parser::Parser};

    fn analyze_src(src: &str) -> AnalyzeResult<Source<Type>> {
        let tokens = Lexer::new(src).lex().unwrap();
        let ast = Parser::parse(tokens).unwrap();
        analyze(ast).map(|(source, _)| source)
    }

    #[test]
    fn requires_a_main_method() {
        let err = analyze_src("LET x: Integer = 1;").unwrap_err();
        assert!(err.message.contains("main"));
    }

    #[test]
    fn well_typed_program_analyzes() {
        let result = analyze_src("DEF main(): Integer DO RETURN 1; END");
        assert!(result.is_ok());
    }

    #[test]
    fn mismatched_return_type_is_rejected() {
        let err = analyze_src("DEF main(): Integer DO RETURN \"oops\"; END").unwrap_err();
        assert!(err.message.contains("assign"));
    }

    #[test]
    fn comparing_different_types_is_rejected() {
        let err = analyze_src(
            "DEF main(): Integer DO IF 1 == \"x\" DO RETURN 1; ELSE RETURN 0; END END",
        )
        .unwrap_err();
        assert!(err.message.contains("compare"));
    }

    #[test]
    fn field_requires_an_explicit_type_annotation() {
        let err = analyze_src("LET x = 1; DEF main(): Integer DO RETURN 1; END").unwrap_err();
        assert!(err.message.contains("type annotation"));
    }

    #[test]
    fn empty_then_branch_is_rejected() {
        let err =
            analyze_src("DEF main(): Integer DO IF TRUE DO ELSE RETURN 0; END RETURN 1; END")
                .unwrap_err();
        assert!(err.message.contains("then-branch"));
    }

    #[test]
    fn decimal_literal_that_does_not_round_trip_is_rejected() {
        let err = analyze_src("DEF main(): Decimal DO RETURN 0.1; END").unwrap_err();
        assert!(err.message.contains("round-trip"));
    }
}
