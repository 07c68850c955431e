//! This module contains everything needed for parsing the CLI arguments for
//! Glint, mirroring the teacher's `why` binary's `cli.rs`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Struct containing the CLI configuration for Glint.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Specify the log level of the driver.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of Glint.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log warnings.
    #[value(alias("1"))]
    Warn,

    /// Also log which phase is currently running.
    #[value(alias("2"))]
    Info,

    /// Log scope pushes/pops and symbol definitions.
    #[value(alias("3"))]
    Debug,

    /// Log everything, including per-expression evaluation.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lex, parse, analyze, and interpret a source file.
    Run(RunArgs),

    /// Lex, parse, analyze, and translate a source file into host-language
    /// source text.
    Translate(TranslateArgs),

    /// Lex, parse, and analyze a source file without running it.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// The path to the Glint source file.
    #[arg(index = 1)]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TranslateArgs {
    /// The path to the Glint source file.
    #[arg(index = 1)]
    pub file: PathBuf,

    /// The path to write the translated source to (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// The path to the Glint source file.
    #[arg(index = 1)]
    pub file: PathBuf,

    /// Whether to dump the parsed (untyped) AST shape.
    #[arg(long)]
    pub dump_ast: bool,

    /// Whether to dump the type-checked AST shape.
    #[arg(long)]
    pub dump_typed: bool,
}
