//! In-process equivalent of the teacher's subprocess-based `tests/*.rs`
//! fixtures: calls straight into `glint_lang` on literal source strings
//! instead of spawning a built binary, since this crate is never built in
//! this exercise. Covers spec.md §8's end-to-end scenarios.

use glint_lang::value::Value;

#[test]
fn field_initializer_plus_return() {
    let value = glint_lang::run("LET x: Integer = 1; DEF main(): Integer DO RETURN x + 2; END")
        .unwrap();
    assert_eq!(value, Value::Integer(3.into()));
}

#[test]
fn if_else_branch_selection() {
    let value = glint_lang::run(
        "DEF main(): Integer DO IF TRUE DO RETURN 1; ELSE RETURN 0; END END",
    )
    .unwrap();
    assert_eq!(value, Value::Integer(1.into()));
}

#[test]
fn for_loop_over_range_builtin() {
    let value = glint_lang::run(
        "DEF main(): Integer DO LET s = 0; FOR i IN range(1, 4) DO s = s + i; END RETURN s; END",
    )
    .unwrap();
    assert_eq!(value, Value::Integer(6.into()));
}

#[test]
fn print_emits_and_translates_to_println() {
    let value = glint_lang::run("DEF main(): Integer DO print(\"hi\"); RETURN 0; END").unwrap();
    assert_eq!(value, Value::Integer(0.into()));

    let out = glint_lang::translate("DEF main(): Integer DO print(\"hi\"); RETURN 0; END").unwrap();
    assert!(out.contains("System.out.println(\"hi\");"));
}

#[test]
fn decimal_division_rounds_half_even() {
    let value = glint_lang::run("DEF main(): Decimal DO RETURN 1.0 / 2.0; END").unwrap();
    assert_eq!(value, Value::Decimal("0.5".parse().unwrap()));
}

#[test]
fn adding_string_to_integer_return_fails_analysis() {
    let result = glint_lang::run("DEF main(): Integer DO RETURN 1 + \"x\"; END");
    assert!(result.is_err());
}

#[test]
fn integer_literal_boundaries() {
    assert!(glint_lang::check(&format!(
        "DEF main(): Integer DO RETURN {}; END",
        i32::MAX
    ))
    .is_ok());
    assert!(glint_lang::check(&format!(
        "DEF main(): Integer DO RETURN {}; END",
        i64::from(i32::MAX) + 1
    ))
    .is_err());
}

#[test]
fn missing_main_fails_analysis() {
    assert!(glint_lang::check("LET x: Integer = 1;").is_err());
}

#[test]
fn translator_emits_class_shape() {
    let out =
        glint_lang::translate("LET x: Integer = 1; DEF main(): Integer DO RETURN x + 2; END")
            .unwrap();
    assert!(out.starts_with("class Main {"));
    assert!(out.trim_end().ends_with('}'));
    assert!(out.contains("int x = 1;"));
    assert!(out.contains("int main() {"));
    assert!(out.contains("return x + 2;"));
}
