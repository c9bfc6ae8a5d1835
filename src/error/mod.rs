//! Error types and handling for `bench_compare`.
//!
//! This module provides structured errors for the comparison pipeline.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Provides recovery hints for user-facing errors
//! - Groups exit codes by error category
//! - Provides structured JSON output for machine consumers

mod context;
mod structured;

pub use context::{OptionExt, ResultExt};
pub use structured::{ErrorCode, StructuredError};

use crate::model::BenchmarkMode;
use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `bench_compare` operations.
#[derive(Error, Debug)]
pub enum CompareError {
    // === Compatibility Errors ===
    /// The two run-sets were produced with different execution disciplines.
    #[error(
        "Benchmark runs with different modes ({old}/{new}) are not comparable"
    )]
    IncompatibleModes {
        old: BenchmarkMode,
        new: BenchmarkMode,
    },

    /// The two run-sets do not contain the same number of benchmarks.
    #[error("Benchmark count mismatch: old run has {old}, new run has {new}")]
    BenchmarkCountMismatch { old: usize, new: usize },

    // === Input Errors ===
    /// A required context key is missing from a run-set.
    #[error("Missing context key: {key}")]
    MissingContextKey { key: String },

    /// The context declares a benchmark mode that is not recognized.
    #[error("Invalid benchmark mode: {mode}")]
    InvalidBenchmarkMode { mode: String },

    /// A benchmark result document could not be parsed.
    #[error("Failed to parse '{}': {reason}", path.display())]
    InputParse { path: PathBuf, reason: String },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration value could not be parsed for its key.
    #[error("Invalid value for config key '{key}': {value}")]
    InvalidConfigValue { key: String, value: String },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file is not valid YAML.
    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // === Wrapped errors ===
    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CompareError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleModes { .. }
                | Self::BenchmarkCountMismatch { .. }
                | Self::MissingContextKey { .. }
                | Self::InvalidBenchmarkMode { .. }
                | Self::InputParse { .. }
                | Self::InvalidConfigValue { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::IncompatibleModes { .. } => {
                Some("Re-run one side with the same benchmark mode as the other")
            }
            Self::BenchmarkCountMismatch { .. } => {
                Some("Both runs must contain the same benchmarks in the same order")
            }
            Self::InvalidBenchmarkMode { .. } => Some("Valid modes: Ordered, Shuffled"),
            Self::MissingContextKey { .. } => {
                Some("The result file must contain a 'context' object with this key")
            }
            _ => None,
        }
    }

    /// Create a config value error for a specific key.
    #[must_use]
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result type using `CompareError`.
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompareError::IncompatibleModes {
            old: BenchmarkMode::Ordered,
            new: BenchmarkMode::Shuffled,
        };
        assert_eq!(
            err.to_string(),
            "Benchmark runs with different modes (Ordered/Shuffled) are not comparable"
        );
    }

    #[test]
    fn test_count_mismatch_display() {
        let err = CompareError::BenchmarkCountMismatch { old: 22, new: 21 };
        assert_eq!(
            err.to_string(),
            "Benchmark count mismatch: old run has 22, new run has 21"
        );
    }

    #[test]
    fn test_user_recoverable() {
        assert!(CompareError::InvalidBenchmarkMode { mode: "x".into() }.is_user_recoverable());
        assert!(!CompareError::Config("broken".into()).is_user_recoverable());
    }

    #[test]
    fn test_suggestion() {
        let err = CompareError::InvalidBenchmarkMode {
            mode: "random".to_string(),
        };
        assert_eq!(err.suggestion(), Some("Valid modes: Ordered, Shuffled"));
        assert_eq!(CompareError::Config("x".into()).suggestion(), None);
    }
}
