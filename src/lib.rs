//! Compare two benchmark run-sets and report latency, throughput and
//! significance deltas.
//!
//! The pipeline is split into stages:
//! - [`load`] reads run-sets from files or stdin into [`model`] types
//! - [`compare`] reduces paired benchmarks into a [`compare::Comparison`]
//! - [`format`] assembles the report and renders it as plain, diff or JSON text
//! - [`output`] handles rich terminal rendering and mode selection

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod load;
pub mod logging;
pub mod model;
pub mod output;

pub use error::{CompareError, ErrorCode, Result, StructuredError};
