//! Installation of the pre-defined environment (spec.md §4.3): the built-in
//! variable `nil` and the built-in functions `print`/`range`.

use std::{cell::RefCell, rc::Rc};

use num_bigint::BigInt;

use crate::{types::Type, value::Value};

use super::{FnBody, FnSymbol, Scope, VarSymbol};

pub(super) fn install(scope: &Scope) {
    scope.define_variable(VarSymbol::new("nil", Type::Nil, Value::Nil));

    scope.define_function(FnSymbol {
        surface_name: "print".into(),
        host_name: "System.out.println".into(),
        parameter_types: vec![Type::Any],
        return_type: Type::Nil,
        body: FnBody::Builtin(print),
    });

    scope.define_function(FnSymbol {
        surface_name: "range".into(),
        host_name: "range".into(),
        parameter_types: vec![Type::Integer, Type::Integer],
        return_type: Type::IntegerIterable,
        body: FnBody::Builtin(range),
    });
}

fn print(args: &[Value]) -> Value {
    println!("{}", args[0]);
    Value::Nil
}

fn range(args: &[Value]) -> Value {
    let (Value::Integer(start), Value::Integer(end)) = (&args[0], &args[1]) else {
        unreachable!("analyzer guarantees range(Integer, Integer)");
    };
    Value::Iterable(Rc::new(RefCell::new(RangeIter {
        current: start.clone(),
        end: end.clone(),
    })))
}

struct RangeIter {
    current: BigInt,
    end: BigInt,
}

impl Iterator for RangeIter {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.current < self.end {
            let value = self.current.clone();
            self.current += 1;
            Some(value)
        } else {
            None
        }
    }
}
