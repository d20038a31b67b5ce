use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use madlang::ast::Program;
use madlang::context::DEFAULT_MAX_CALL_DEPTH;
use madlang::{EvalContext, Evaluator, StdConsole};

/// Exit status when the program raised a language error
const EXIT_LANGUAGE_ERROR: u8 = 1;

/// Exit status when the program could not be loaded
const EXIT_LOAD_FAILURE: u8 = 2;

/// Exit status for an internal defect (EX_SOFTWARE)
const EXIT_DEFECT: u8 = 70;

#[derive(Parser)]
#[command(
    name = "madlang",
    version,
    about = "Run a Madlang program",
    long_about = "Evaluates a Madlang program given as a JSON-encoded syntax tree, \
                  then calls its `main` function."
)]
struct Cli {
    /// JSON file holding the program's syntax tree
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// Maximum number of nested function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let program = match load_program(&cli.program) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::from(EXIT_LOAD_FAILURE);
        }
    };

    let ctx = EvalContext::with_max_call_depth(cli.max_call_depth);
    let mut evaluator = Evaluator::with_context(StdConsole::new(), ctx);

    match evaluator.run_program(&program) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if err.is_defect() {
                ExitCode::from(EXIT_DEFECT)
            } else {
                ExitCode::from(EXIT_LANGUAGE_ERROR)
            }
        }
    }
}

/// Logs go to stderr so they never mix with program output.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn load_program(path: &Path) -> Result<Program> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Program::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse program tree in {}", path.display()))
}
