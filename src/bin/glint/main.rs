//! # Glint
//!
//! This binary drives the lexer, parser, analyzer, interpreter, and
//! translator over a single source file, mirroring the teacher's `why`
//! binary's phase-driving shape.

mod cli;

use cli::*;

use std::{error::Error, fs, process::ExitCode};

use log::{error, info};

use glint_lang::{
    ast::{Field, Method, Source},
    lexer::Lexer,
    parser::Parser,
    typechecker,
    types::Type,
    value::Value,
};

fn main() -> ExitCode {
    let args = Cli::init();
    let level: log::Level = (&args.verbosity).into();
    simple_logger::init_with_level(level).unwrap();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<ExitCode, Box<dyn Error>> {
    match args.command {
        Commands::Run(run_args) => {
            let src = fs::read_to_string(&run_args.file)?;
            info!("running {}", run_args.file.display());
            let value = glint_lang::run(&src)?;
            Ok(exit_code_for(&value))
        }
        Commands::Translate(translate_args) => {
            let src = fs::read_to_string(&translate_args.file)?;
            info!("translating {}", translate_args.file.display());
            let out = glint_lang::translate(&src)?;
            match translate_args.output {
                Some(path) => fs::write(path, out)?,
                None => print!("{out}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(check_args) => {
            let src = fs::read_to_string(&check_args.file)?;
            info!("checking {}", check_args.file.display());

            let tokens = Lexer::new(&src).lex()?;
            let parsed = Parser::parse(tokens)?;
            if check_args.dump_ast {
                info!("parsed AST:\n{}", describe_untyped(&parsed)?);
            }

            let (typed, _) = typechecker::analyze(parsed)?;
            if check_args.dump_typed {
                info!("typed AST:\n{}", describe_typed(&typed)?);
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Process exit code mandated by spec.md §6: `main`'s returned `Integer`
/// passed through to the host exit. Values outside the host's exit-code
/// range are taken modulo 256, same as a real process exit status.
fn exit_code_for(value: &Value) -> ExitCode {
    use num_bigint::BigInt;
    use num_traits::ToPrimitive;

    match value {
        Value::Integer(i) => {
            let modulus = BigInt::from(256);
            let mut remainder = i % &modulus;
            if remainder < BigInt::from(0) {
                remainder += &modulus;
            }
            ExitCode::from(remainder.to_u8().unwrap_or(0))
        }
        _ => ExitCode::SUCCESS,
    }
}

/// A field or method's shape, independent of whether it has been
/// type-checked yet. We derive `Serialize` on this small summary rather
/// than on the AST nodes themselves (whose `variable`/`function` fields
/// hold scope handles that don't serialize), and hand it to `serde_json`
/// for `--dump-ast`/`--dump-typed`.
#[derive(serde::Serialize)]
struct SourceSummary {
    fields: Vec<FieldSummary>,
    methods: Vec<MethodSummary>,
}

#[derive(serde::Serialize)]
struct FieldSummary {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(serde::Serialize)]
struct MethodSummary {
    name: String,
    arity: usize,
    #[serde(rename = "returnType", skip_serializing_if = "Option::is_none")]
    return_type: Option<String>,
}

fn describe_untyped(source: &Source<()>) -> Result<String, serde_json::Error> {
    let summary = SourceSummary {
        fields: source
            .fields
            .iter()
            .map(|field| {
                let Field { name, type_name, .. } = field;
                FieldSummary {
                    name: name.clone(),
                    ty: type_name.clone().unwrap_or_else(|| "<none>".to_string()),
                }
            })
            .collect(),
        methods: source
            .methods
            .iter()
            .map(|method| {
                let Method { name, parameters, .. } = method;
                MethodSummary {
                    name: name.clone(),
                    arity: parameters.len(),
                    return_type: None,
                }
            })
            .collect(),
    };
    serde_json::to_string_pretty(&summary)
}

fn describe_typed(source: &Source<Type>) -> Result<String, serde_json::Error> {
    let summary = SourceSummary {
        fields: source
            .fields
            .iter()
            .map(|field| FieldSummary {
                name: field.name.clone(),
                ty: field
                    .variable
                    .as_ref()
                    .map(|v| v.ty.to_string())
                    .unwrap_or_else(|| Type::Nil.to_string()),
            })
            .collect(),
        methods: source
            .methods
            .iter()
            .map(|method| MethodSummary {
                name: method.name.clone(),
                arity: method.parameters.len(),
                return_type: Some(
                    method
                        .function
                        .as_ref()
                        .map(|f| f.return_type.to_string())
                        .unwrap_or_else(|| Type::Nil.to_string()),
                ),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&summary)
}
