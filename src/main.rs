use bench_compare::cli::Cli;
use bench_compare::cli::commands::{compare, completions};
use bench_compare::config::CliOverrides;
use bench_compare::error::OptionExt;
use bench_compare::logging::init_logging;
use bench_compare::output::OutputContext;
use bench_compare::{CompareError, StructuredError};
use clap::Parser;
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(&cli) {
        handle_error(&e, cli.json);
    }
}

fn run(cli: &Cli) -> bench_compare::Result<()> {
    if let Some(shell) = cli.completions {
        return completions::execute(shell);
    }

    let old = cli
        .old
        .as_deref()
        .ok_or_compare_err(|| CompareError::Config("missing OLD run-set".to_string()))?;
    let new = cli
        .new
        .as_deref()
        .ok_or_compare_err(|| CompareError::Config("missing NEW run-set".to_string()))?;

    let args = compare::CompareArgs {
        old,
        new,
        overrides: build_cli_overrides(cli),
    };
    let ctx = OutputContext::from_args(cli);
    compare::execute(&args, &ctx)
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color. Either way the
/// error is a single line.
fn handle_error(err: &CompareError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        eprintln!("{}", structured.to_json());
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        config_file: cli.config.clone(),
        ignore_context_keys: cli.ignore_context_keys.clone(),
        p_value_threshold: cli.p_threshold,
    }
}
