//! Shell completions generation.
//!
//! # Usage
//!
//! ```bash
//! bench-compare --completions bash > ~/.local/share/bash-completion/completions/bench-compare
//! bench-compare --completions fish > ~/.config/fish/completions/bench-compare.fish
//! ```

use crate::cli::{Cli, ShellType};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

/// Binary name completions are generated for.
pub const BIN_NAME: &str = "bench-compare";

/// Write the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn execute(shell: ShellType) -> Result<()> {
    info!(shell = ?shell, "Generating shell completions");
    let mut stdout = io::stdout();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Generate the completion script into any writer.
pub fn write_completions(shell: ShellType, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(convert_shell_type(shell), &mut cmd, BIN_NAME, out);
}

/// Convert our `ShellType` enum to `clap_complete`'s Shell enum.
const fn convert_shell_type(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
        ShellType::PowerShell => Shell::PowerShell,
        ShellType::Elvish => Shell::Elvish,
    }
}
