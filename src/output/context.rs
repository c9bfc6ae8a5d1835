use super::Theme;
use crate::cli::Cli;
use rich_rust::prelude::*;
use rich_rust::renderables::Renderable;
use std::io::IsTerminal;

/// Central output coordinator that respects diff/json/quiet modes.
pub struct OutputContext {
    /// Rich console for human-readable output
    console: Console,
    /// Theme for consistent styling
    theme: Theme,
    /// Output mode
    mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full rich formatting (tables, colors)
    Rich,
    /// Plain ASCII grids, no ANSI codes (for piping)
    Plain,
    /// Plain grids wrapped in a fenced `diff` block
    Diff,
    /// JSON output only
    Json,
    /// No report output (errors still go to stderr)
    Quiet,
}

impl OutputContext {
    /// Create from CLI args
    #[must_use]
    pub fn from_args(args: &Cli) -> Self {
        Self::from_flags(args.json, args.github, args.quiet, args.no_color)
    }

    /// Create from CLI-style flags.
    #[must_use]
    pub fn from_flags(json: bool, github: bool, quiet: bool, no_color: bool) -> Self {
        let mode = Self::detect_mode(
            json,
            github,
            quiet,
            no_color || std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        );
        Self::with_mode(mode)
    }

    /// Create with an explicit mode.
    #[must_use]
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            console: Self::create_console(mode),
            theme: Theme::default(),
            mode,
        }
    }

    /// Pick the output mode; earlier flags win.
    #[must_use]
    pub const fn detect_mode(
        json: bool,
        github: bool,
        quiet: bool,
        no_color: bool,
        is_terminal: bool,
    ) -> OutputMode {
        if json {
            OutputMode::Json
        } else if github {
            OutputMode::Diff
        } else if quiet {
            OutputMode::Quiet
        } else if no_color || !is_terminal {
            OutputMode::Plain
        } else {
            OutputMode::Rich
        }
    }

    fn create_console(mode: OutputMode) -> Console {
        match mode {
            OutputMode::Rich => Console::new(),
            OutputMode::Plain | OutputMode::Diff | OutputMode::Json | OutputMode::Quiet => {
                Console::builder().no_color().force_terminal(false).build()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Mode Checks
    // ─────────────────────────────────────────────────────────────

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }
    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.mode == OutputMode::Rich
    }
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.mode == OutputMode::Quiet
    }
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    // ─────────────────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────────────────

    /// Print markup through the console (rich) or verbatim (plain/diff).
    pub fn print(&self, content: &str) {
        match self.mode {
            OutputMode::Rich => self.console.print(content),
            OutputMode::Plain | OutputMode::Diff => println!("{content}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn render<R: Renderable>(&self, renderable: &R) {
        if self.is_rich() {
            self.console.print_renderable(renderable);
        }
    }

    /// Print a value as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_pretty<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    pub fn newline(&self) {
        if !self.is_quiet() && !self.is_json() {
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wins_over_everything() {
        assert_eq!(
            OutputContext::detect_mode(true, true, true, true, true),
            OutputMode::Json
        );
    }

    #[test]
    fn github_selects_diff_even_on_terminal() {
        assert_eq!(
            OutputContext::detect_mode(false, true, false, false, true),
            OutputMode::Diff
        );
    }

    #[test]
    fn pipes_and_no_color_fall_back_to_plain() {
        assert_eq!(
            OutputContext::detect_mode(false, false, false, false, false),
            OutputMode::Plain
        );
        assert_eq!(
            OutputContext::detect_mode(false, false, false, true, true),
            OutputMode::Plain
        );
        assert_eq!(
            OutputContext::detect_mode(false, false, false, false, true),
            OutputMode::Rich
        );
    }

    #[test]
    fn quiet_suppresses_tables() {
        assert_eq!(
            OutputContext::detect_mode(false, false, true, false, true),
            OutputMode::Quiet
        );
    }
}
