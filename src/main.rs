//! polstep - stepwise Polish notation calculator
//!
//! Usage:
//!   polstep                  Start interactive REPL
//!   polstep -c "3 4 +"       Calculate a single expression
//!   polstep calc.txt         Calculate every line of a file

mod cli;
mod repl;
mod terminal;

use polstep::{Calculator, Config};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_args, print_help, print_version};
use crate::terminal::{execute_line, execute_script, OutputOptions};

/// Install the stderr log subscriber
///
/// `POLSTEP_LOG` takes an `EnvFilter` directive; `--trace` forces debug.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("POLSTEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging(cli.trace);

    let config = Config::load();
    let notation = cli.notation.unwrap_or(config.notation);
    let opts = OutputOptions::from_config(&config, cli.json, cli.play);

    // Calculate a single expression
    if let Some(cmd) = cli.command {
        let mut calc = Calculator::new(notation);
        return match execute_line(&mut calc, &cmd, &opts) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    // Calculate a script
    if let Some(script) = cli.script {
        let mut calc = Calculator::new(notation);
        return execute_script(&script, &mut calc, &opts);
    }

    // Start REPL
    match repl::run_repl(notation, config, opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
