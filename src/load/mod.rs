//! Loading run-sets from benchmark result documents.
//!
//! A run-set is read from a JSON file, or from standard input when the path
//! is `-`. Parsing failures carry the source path and a line/column hint.

use crate::error::{CompareError, Result, ResultExt};
use crate::model::RunSet;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path argument meaning "read from standard input".
pub const STDIN_PATH: &str = "-";

/// Where a run-set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == STDIN_PATH {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// The path used in error messages.
    #[must_use]
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Stdin => PathBuf::from("<stdin>"),
            Self::File(path) => path.clone(),
        }
    }

    fn read_to_string(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut contents = String::new();
                io::stdin()
                    .read_to_string(&mut contents)
                    .with_context(|| "Failed to read run-set from stdin")?;
                Ok(contents)
            }
            Self::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_path().display())
    }
}

/// Parse a run-set document.
///
/// # Errors
///
/// Returns `CompareError::InputParse` if the text is not a valid run-set.
pub fn parse_run_set(contents: &str, path: &Path) -> Result<RunSet> {
    serde_json::from_str(contents).map_err(|err| CompareError::InputParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Load a run-set.
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed.
pub fn load_run_set(source: &InputSource) -> Result<RunSet> {
    let contents = source.read_to_string()?;
    debug!(source = %source, bytes = contents.len(), "Read run-set");

    let run_set = parse_run_set(&contents, &source.display_path())?;
    info!(
        source = %source,
        benchmarks = run_set.benchmarks.len(),
        context_keys = run_set.context.len(),
        "Loaded run-set"
    );
    Ok(run_set)
}

/// Load the old and new run-sets.
///
/// # Errors
///
/// Returns an error if both sides name standard input, or either side cannot
/// be loaded.
pub fn load_pair(old: &InputSource, new: &InputSource) -> Result<(RunSet, RunSet)> {
    if *old == InputSource::Stdin && *new == InputSource::Stdin {
        return Err(CompareError::InputParse {
            path: PathBuf::from(STDIN_PATH),
            reason: "only one run-set can be read from stdin".to_string(),
        });
    }
    Ok((load_run_set(old)?, load_run_set(new)?))
}
