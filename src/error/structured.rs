//! Structured error output for machine consumers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging
//!
//! Intent detection recognizes common spellings of the benchmark modes so
//! that a mistyped `benchmark_mode` gets a concrete suggestion.

#![allow(clippy::option_if_let_else)]

use crate::error::CompareError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Input Errors (exit code 2) ===
    /// The two run-sets used different benchmark modes
    IncompatibleModes,
    /// Benchmark sequences differ in length
    BenchmarkCountMismatch,
    /// Required context key missing
    MissingContextKey,
    /// Unknown benchmark mode
    InvalidBenchmarkMode,
    /// Result document could not be parsed
    InputParseError,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Config value could not be parsed
    ConfigParseError,
    /// Config file is not valid YAML
    YamlError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IncompatibleModes => "INCOMPATIBLE_MODES",
            Self::BenchmarkCountMismatch => "BENCHMARK_COUNT_MISMATCH",
            Self::MissingContextKey => "MISSING_CONTEXT_KEY",
            Self::InvalidBenchmarkMode => "INVALID_BENCHMARK_MODE",
            Self::InputParseError => "INPUT_PARSE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ConfigParseError => "CONFIG_PARSE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether fixing the input and re-running might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidBenchmarkMode | Self::MissingContextKey | Self::ConfigParseError
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Input and compatibility errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::IncompatibleModes
            | Self::BenchmarkCountMismatch
            | Self::MissingContextKey
            | Self::InvalidBenchmarkMode
            | Self::InputParseError => 2,
            Self::ConfigError | Self::ConfigParseError | Self::YamlError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `CompareError`.
    #[must_use]
    pub fn from_error(err: &CompareError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output, on one line.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            if color {
                output.push_str(&format!(" \x1b[33m(hint: {hint})\x1b[0m"));
            } else {
                output.push_str(&format!(" (hint: {hint})"));
            }
        }

        output
    }

    fn extract_code_and_context(err: &CompareError) -> (ErrorCode, Option<Value>) {
        match err {
            CompareError::IncompatibleModes { old, new } => (
                ErrorCode::IncompatibleModes,
                Some(json!({"old_mode": old.as_str(), "new_mode": new.as_str()})),
            ),
            CompareError::BenchmarkCountMismatch { old, new } => (
                ErrorCode::BenchmarkCountMismatch,
                Some(json!({"old_count": old, "new_count": new})),
            ),
            CompareError::MissingContextKey { key } => {
                (ErrorCode::MissingContextKey, Some(json!({"key": key})))
            }
            CompareError::InvalidBenchmarkMode { mode } => (
                ErrorCode::InvalidBenchmarkMode,
                Some(json!({"provided": mode, "valid": ["Ordered", "Shuffled"]})),
            ),
            CompareError::InputParse { path, reason } => (
                ErrorCode::InputParseError,
                Some(json!({"path": path.display().to_string(), "reason": reason})),
            ),
            CompareError::Config(_) => (ErrorCode::ConfigError, None),
            CompareError::InvalidConfigValue { key, value } => (
                ErrorCode::ConfigParseError,
                Some(json!({"key": key, "value": value})),
            ),
            CompareError::Io(_) => (ErrorCode::IoError, None),
            CompareError::Json(_) => (ErrorCode::JsonError, None),
            CompareError::Yaml { path, .. } => (
                ErrorCode::YamlError,
                Some(json!({"path": path.display().to_string()})),
            ),
            CompareError::WithContext { context, source } => {
                let code = if source.is::<std::io::Error>() {
                    ErrorCode::IoError
                } else {
                    ErrorCode::InternalError
                };
                (code, Some(json!({"context": context})))
            }
        }
    }

    fn generate_hint(err: &CompareError) -> Option<String> {
        match err {
            CompareError::InvalidBenchmarkMode { mode } => {
                if let Some(detected) = detect_mode_intent(mode) {
                    Some(format!("Did you mean benchmark_mode \"{detected}\"?"))
                } else {
                    err.suggestion().map(str::to_string)
                }
            }
            CompareError::InvalidConfigValue { key, .. } => Some(format!(
                "Check '{key}' in .bench-compare.yaml or BENCH_COMPARE_* variables."
            )),
            _ => err.suggestion().map(str::to_string),
        }
    }
}

/// Benchmark mode synonyms for intent detection.
static MODE_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("ordered", "Ordered"),
        ("order", "Ordered"),
        ("sequential", "Ordered"),
        ("serial", "Ordered"),
        ("shuffled", "Shuffled"),
        ("shuffle", "Shuffled"),
        ("random", "Shuffled"),
        ("randomized", "Shuffled"),
    ]
    .into_iter()
    .collect()
});

/// Map a mistyped benchmark mode to a recognized one.
#[must_use]
pub fn detect_mode_intent(input: &str) -> Option<&'static str> {
    let normalized = input.trim().trim_matches('"').to_lowercase();
    MODE_SYNONYMS.get(normalized.as_str()).copied()
}
