//! Interpreter (spec.md §4.5): a tree-walking evaluator over the typed AST.
//! Early return is modeled as a non-local [`Transfer`] rather than a
//! host-language exception, propagated up the statement-execution loop by
//! hand (mirrors the teacher's `check_*` return-value threading, adapted
//! from type-checking results to runtime control flow).

mod error;

pub use self::error::RuntimeError;

use std::cmp::Ordering;

use num_traits::Zero;

use crate::{
    ast::{
        Access, Assignment, Binary, Expr, ForLoop, FunctionCall, IfStatement, Literal,
        ReturnStmt, Source, Stmt, WhileLoop,
    },
    scope::{FnBody, FnSymbol, Scope, VarSymbol},
    types::Type,
    value::Value,
};

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// The result of running a statement: either control falls through
/// (`Normal`), or a `Return` unwound the enclosing method frame
/// (`Returned`), in which case the value is the invocation's result.
pub enum Transfer {
    Normal(Value),
    Returned(Value),
}

/// Run a fully analyzed program: define fields in order, then invoke
/// `main/0`. `scope` is the same global scope the analyzer resolved names
/// against, so every [`Method`]'s [`FnSymbol`] is already registered.
pub fn interpret(source: &Source<Type>, scope: &Scope) -> RuntimeResult<Value> {
    for field in &source.fields {
        let value = match &field.value {
            Some(expr) => eval_expr(expr, scope)?,
            None => Value::Nil,
        };
        field
            .variable
            .as_ref()
            .expect("analyzer resolves every field's variable")
            .set(value);
    }

    // Methods are already registered in `scope` by the analyzer; nothing to
    // do here but locate the entry point.
    let main = scope
        .lookup_function("main", 0)
        .ok_or_else(|| RuntimeError::new("no 'main/0' function in scope"))?;
    call_function(&main, vec![])
}

fn call_function(function: &FnSymbol, args: Vec<Value>) -> RuntimeResult<Value> {
    match &function.body {
        FnBody::Builtin(builtin) => Ok(builtin(&args)),
        FnBody::UserDefined {
            parameters,
            body,
            defining_scope,
        } => {
            let call_scope = defining_scope.child();
            for ((name, ty), value) in parameters
                .iter()
                .zip(function.parameter_types.iter())
                .zip(args)
            {
                call_scope.define_variable(VarSymbol::new(name.clone(), *ty, value));
            }

            match exec_stmts(&body.borrow(), &call_scope)? {
                Transfer::Returned(value) => Ok(value),
                Transfer::Normal(_) => Ok(Value::Nil),
            }
        }
    }
}

fn exec_stmts(stmts: &[Stmt<Type>], scope: &Scope) -> RuntimeResult<Transfer> {
    for stmt in stmts {
        if let Transfer::Returned(value) = exec_stmt(stmt, scope)? {
            return Ok(Transfer::Returned(value));
        }
    }
    Ok(Transfer::Normal(Value::Nil))
}

fn exec_stmt(stmt: &Stmt<Type>, scope: &Scope) -> RuntimeResult<Transfer> {
    match stmt {
        Stmt::Expression(expr) => {
            let value = eval_expr(expr, scope)?;
            Ok(Transfer::Normal(value))
        }
        Stmt::Declaration(decl) => {
            let value = match &decl.value {
                Some(expr) => eval_expr(expr, scope)?,
                None => Value::Nil,
            };
            let ty = decl
                .variable
                .as_ref()
                .expect("analyzer resolves every declaration's variable")
                .ty;
            scope.define_variable(VarSymbol::new(decl.name.clone(), ty, value.clone()));
            Ok(Transfer::Normal(value))
        }
        Stmt::Assignment(Assignment { receiver, value, .. }) => {
            let Expr::Access(access) = receiver else {
                unreachable!("analyzer guarantees an assignment receiver is an Access")
            };
            let new_value = eval_expr(value, scope)?;
            assign(access, new_value.clone(), scope)?;
            Ok(Transfer::Normal(new_value))
        }
        Stmt::If(IfStatement {
            condition,
            then_branch,
            else_branch,
            ..
        }) => {
            let condition = require_boolean(eval_expr(condition, scope)?)?;
            let branch_scope = scope.child();
            if condition {
                exec_stmts(then_branch, &branch_scope)
            } else {
                exec_stmts(else_branch, &branch_scope)
            }
        }
        Stmt::For(ForLoop {
            name,
            iterable,
            body,
            ..
        }) => {
            let Value::Iterable(iter) = eval_expr(iterable, scope)? else {
                return Err(RuntimeError::new("for loop iterable did not evaluate to an iterable"));
            };
            loop {
                let next = iter.borrow_mut().next();
                let Some(element) = next else { break };
                let iteration_scope = scope.child();
                iteration_scope.define_variable(VarSymbol::new(
                    name.clone(),
                    Type::Integer,
                    Value::Integer(element),
                ));
                if let Transfer::Returned(value) = exec_stmts(body, &iteration_scope)? {
                    return Ok(Transfer::Returned(value));
                }
            }
            Ok(Transfer::Normal(Value::Nil))
        }
        Stmt::While(WhileLoop { condition, body, .. }) => {
            loop {
                if !require_boolean(eval_expr(condition, scope)?)? {
                    break;
                }
                let iteration_scope = scope.child();
                if let Transfer::Returned(value) = exec_stmts(body, &iteration_scope)? {
                    return Ok(Transfer::Returned(value));
                }
            }
            Ok(Transfer::Normal(Value::Nil))
        }
        Stmt::Return(ReturnStmt { value, .. }) => {
            let value = eval_expr(value, scope)?;
            Ok(Transfer::Returned(value))
        }
    }
}

fn assign(access: &Access<Type>, value: Value, scope: &Scope) -> RuntimeResult<()> {
    match &access.receiver {
        None => {
            let variable = access
                .variable
                .as_ref()
                .expect("analyzer resolves every receiver-less access");
            variable.set(value);
            Ok(())
        }
        Some(receiver) => {
            let Value::Object(object) = eval_expr(receiver, scope)? else {
                return Err(RuntimeError::new(format!(
                    "cannot assign to field '{}' of a non-object value",
                    access.name
                )));
            };
            let variable = object.lookup_variable(&access.name).ok_or_else(|| {
                RuntimeError::new(format!("object has no field '{}'", access.name))
            })?;
            variable.set(value);
            Ok(())
        }
    }
}

fn require_boolean(value: Value) -> RuntimeResult<bool> {
    match value {
        Value::Boolean(b) => Ok(b),
        other => Err(RuntimeError::new(format!(
            "expected a boolean, found {other}"
        ))),
    }
}

fn eval_expr(expr: &Expr<Type>, scope: &Scope) -> RuntimeResult<Value> {
    match expr {
        Expr::Literal { value, .. } => Ok(lift_literal(value)),
        Expr::Group(group) => eval_expr(&group.inner, scope),
        Expr::Binary(binary) => eval_binary(binary, scope),
        Expr::Access(access) => match &access.receiver {
            None => Ok(access
                .variable
                .as_ref()
                .expect("analyzer resolves every receiver-less access")
                .get()),
            Some(receiver) => {
                let Value::Object(object) = eval_expr(receiver, scope)? else {
                    return Err(RuntimeError::new(format!(
                        "cannot read field '{}' of a non-object value",
                        access.name
                    )));
                };
                let variable = object.lookup_variable(&access.name).ok_or_else(|| {
                    RuntimeError::new(format!("object has no field '{}'", access.name))
                })?;
                Ok(variable.get())
            }
        },
        Expr::Function(call) => eval_call(call, scope),
    }
}

fn eval_call(call: &FunctionCall<Type>, scope: &Scope) -> RuntimeResult<Value> {
    match &call.receiver {
        None => {
            let function = call
                .function
                .clone()
                .expect("analyzer resolves every receiver-less call");
            let args = call
                .arguments
                .iter()
                .map(|arg| eval_expr(arg, scope))
                .collect::<RuntimeResult<Vec<_>>>()?;
            call_function(&function, args)
        }
        Some(receiver) => {
            let Value::Object(object) = eval_expr(receiver, scope)? else {
                return Err(RuntimeError::new(format!(
                    "cannot call method '{}' on a non-object value",
                    call.name
                )));
            };
            let args = call
                .arguments
                .iter()
                .map(|arg| eval_expr(arg, scope))
                .collect::<RuntimeResult<Vec<_>>>()?;
            let function = object
                .lookup_function(&call.name, args.len())
                .ok_or_else(|| {
                    RuntimeError::new(format!(
                        "object has no method '{}/{}'",
                        call.name,
                        args.len()
                    ))
                })?;
            call_function(&function, args)
        }
    }
}

fn lift_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Character(c) => Value::Character(*c),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::Integer(i.clone()),
        Literal::Decimal(d) => Value::Decimal(d.clone()),
    }
}

fn eval_binary(binary: &Binary<Type>, scope: &Scope) -> RuntimeResult<Value> {
    let left = eval_expr(&binary.left, scope)?;

    match binary.op.as_str() {
        "OR" => {
            if require_boolean(left)? {
                return Ok(Value::Boolean(true));
            }
            let right = eval_expr(&binary.right, scope)?;
            Ok(Value::Boolean(require_boolean(right)?))
        }
        "AND" => {
            if !require_boolean(left)? {
                return Ok(Value::Boolean(false));
            }
            let right = eval_expr(&binary.right, scope)?;
            Ok(Value::Boolean(require_boolean(right)?))
        }
        op => {
            let right = eval_expr(&binary.right, scope)?;
            match op {
                "==" => Ok(Value::Boolean(left == right)),
                "!=" => Ok(Value::Boolean(left != right)),
                "<" | "<=" | ">" | ">=" => {
                    let ordering = compare(&left, &right)?;
                    let result = match op {
                        "<" => ordering == Ordering::Less,
                        "<=" => ordering != Ordering::Greater,
                        ">" => ordering == Ordering::Greater,
                        ">=" => ordering != Ordering::Less,
                        _ => unreachable!(),
                    };
                    Ok(Value::Boolean(result))
                }
                "+" => {
                    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                        Ok(Value::String(format!("{left}{right}")))
                    } else {
                        numeric(left, right, "+", |a, b| a + b, |a, b| a + b)
                    }
                }
                "-" => numeric(left, right, "-", |a, b| a - b, |a, b| a - b),
                "*" => numeric(left, right, "*", |a, b| a * b, |a, b| a * b),
                "/" => divide(left, right),
                other => Err(RuntimeError::new(format!("unknown operator '{other}'"))),
            }
        }
    }
}

fn compare(left: &Value, right: &Value) -> RuntimeResult<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (a, b) => Err(RuntimeError::new(format!(
            "cannot compare {a} with {b}"
        ))),
    }
}

fn numeric(
    left: Value,
    right: Value,
    op: &str,
    int_op: impl Fn(num_bigint::BigInt, num_bigint::BigInt) -> num_bigint::BigInt,
    dec_op: impl Fn(bigdecimal::BigDecimal, bigdecimal::BigDecimal) -> bigdecimal::BigDecimal,
) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(int_op(a, b))),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(dec_op(a, b))),
        (a, b) => Err(RuntimeError::new(format!(
            "operator '{op}' requires two Integer or two Decimal operands, found {a} and {b}"
        ))),
    }
}

fn divide(left: Value, right: Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if b.is_zero() {
                return Err(RuntimeError::new("division by zero"));
            }
            Ok(Value::Integer(a / b))
        }
        (Value::Decimal(a), Value::Decimal(b)) => {
            if b.is_zero() {
                return Err(RuntimeError::new("division by zero"));
            }
            // bigdecimal's `Div` rounds half-to-even at the type's default
            // precision, matching the banker's-rounding requirement.
            Ok(Value::Decimal(a / b))
        }
        (a, b) => Err(RuntimeError::new(format!(
            "operator '/' requires two Integer or two Decimal operands, found {a} and {b}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::Lexer, parser::Parser, typechecker};

    fn run(src: &str) -> RuntimeResult<Value> {
        let tokens = Lexer::new(src).lex().unwrap();
        let ast = Parser::parse(tokens).unwrap();
        let (typed, scope) = typechecker::analyze(ast).unwrap();
        interpret(&typed, &scope)
    }

    #[test]
    fn field_plus_return() {
        let result = run("LET x: Integer = 1; DEF main(): Integer DO RETURN x + 2; END");
        assert_eq!(result.unwrap(), Value::Integer(3.into()));
    }

    #[test]
    fn if_else_takes_then_branch() {
        let result = run("DEF main(): Integer DO IF TRUE DO RETURN 1; ELSE RETURN 0; END END");
        assert_eq!(result.unwrap(), Value::Integer(1.into()));
    }

    #[test]
    fn for_loop_over_range_accumulates() {
        let result = run(
            "DEF main(): Integer DO LET s = 0; FOR i IN range(1, 4) DO s = s + i; END RETURN s; END",
        );
        assert_eq!(result.unwrap(), Value::Integer(6.into()));
    }

    #[test]
    fn decimal_division_is_half_even() {
        let result = run("DEF main(): Decimal DO RETURN 1.0 / 2.0; END");
        assert_eq!(result.unwrap(), Value::Decimal("0.5".parse().unwrap()));
    }

    #[test]
    fn integer_division_by_zero_fails_at_runtime() {
        let result = run("DEF main(): Integer DO RETURN 1 / 0; END");
        assert!(result.is_err());
    }
}
