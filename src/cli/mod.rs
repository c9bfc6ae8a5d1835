//! CLI definitions and entry point.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Compare two benchmark result sets and report performance deltas
#[derive(Parser, Debug)]
#[command(name = "bench-compare", author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Baseline run-set (JSON, `-` for stdin)
    #[arg(value_name = "OLD", required_unless_present = "completions")]
    pub old: Option<PathBuf>,

    /// Candidate run-set (JSON, `-` for stdin)
    #[arg(value_name = "NEW", required_unless_present = "completions")]
    pub new: Option<PathBuf>,

    /// Format the report as a fenced diff block for review comments
    #[arg(long)]
    pub github: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "github")]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Append log output to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Config file (replaces ./.bench-compare.yaml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Context key whose differences are expected (repeatable)
    #[arg(long = "ignore-context-key", value_name = "KEY")]
    pub ignore_context_keys: Vec<String>,

    /// p-value below which a change is significant
    #[arg(long = "p-threshold", value_name = "P")]
    pub p_threshold: Option<f64>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<ShellType>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positional_run_sets() {
        let cli = Cli::try_parse_from(["bench-compare", "old.json", "new.json", "--github"])
            .expect("parse");
        assert_eq!(cli.old, Some(PathBuf::from("old.json")));
        assert_eq!(cli.new, Some(PathBuf::from("new.json")));
        assert!(cli.github);
    }

    #[test]
    fn run_sets_are_required() {
        assert!(Cli::try_parse_from(["bench-compare", "old.json"]).is_err());
    }

    #[test]
    fn completions_stand_alone() {
        let cli = Cli::try_parse_from(["bench-compare", "--completions", "bash"]).expect("parse");
        assert_eq!(cli.completions, Some(ShellType::Bash));
        assert!(
            Cli::try_parse_from(["bench-compare", "a", "b", "--completions", "zsh"]).is_err()
        );
    }

    #[test]
    fn json_conflicts_with_github() {
        assert!(Cli::try_parse_from(["bench-compare", "a", "b", "--json", "--github"]).is_err());
    }

    #[test]
    fn repeatable_options() {
        let cli = Cli::try_parse_from([
            "bench-compare",
            "a",
            "b",
            "--ignore-context-key",
            "host",
            "--ignore-context-key",
            "kernel",
            "--p-threshold",
            "0.01",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.ignore_context_keys, vec!["host", "kernel"]);
        assert_eq!(cli.p_threshold, Some(0.01));
        assert_eq!(cli.verbose, 2);
    }
}
