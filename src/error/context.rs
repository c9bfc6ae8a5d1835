//! Context helpers for attaching human-readable context to errors.

use super::{CompareError, Result};

/// Extension trait adding context to fallible results.
pub trait ResultExt<T> {
    /// Wrap the error with a lazily built context message.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::WithContext` if `self` is an error.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| CompareError::WithContext {
            context: f().into(),
            source: Box::new(err),
        })
    }
}

/// Extension trait turning missing values into errors.
pub trait OptionExt<T> {
    /// Convert `None` into the error built by `f`.
    ///
    /// # Errors
    ///
    /// Returns the produced error if `self` is `None`.
    fn ok_or_compare_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> CompareError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_compare_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> CompareError,
    {
        self.ok_or_else(f)
    }
}
