//! errors.rs - Custom error types for the applause-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::sources::Format;

/// Boxed error returned by pluggable format parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// This enum represents all possible error types in the `applause-core` library.
///
/// Every variant is fatal to the engine construction that raised it: a single
/// malformed pattern declaration aborts resolution of the whole set.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApplauseError {
    #[error("Pattern #{index}: invalid match type '{found}', expected a string or a regular expression")]
    InvalidMatchType { index: usize, found: String },

    #[error("Pattern #{index}: match attribute is missing or null")]
    MissingMatch { index: usize },

    #[error("Pattern #{index}: replacement attribute is missing or null (match '{label}')")]
    MissingReplacement { index: usize, label: String },

    /// Errors from the JSON/YAML/CSON collaborators pass through unmodified.
    #[error(transparent)]
    Parse(BoxError),

    #[error("Deferred {format} source for pattern #{index} failed: {source}")]
    Loader {
        index: usize,
        format: Format,
        #[source]
        source: anyhow::Error,
    },

    #[error("Deferred {format} source for pattern #{index} was dropped before completing")]
    LoaderDropped { index: usize, format: Format },

    #[error("Deferred {format} source for pattern #{index} panicked")]
    LoaderPanicked { index: usize, format: Format },

    #[error("Failed to compile pattern '{0}': {1}")]
    RegexCompilation(String, regex::Error),

    #[error("Failed to serialize replacement value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to start the runtime for deferred sources: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Blocking creation cannot run inside an async runtime; use `create_async` instead")]
    BlockingInAsyncContext,
}

pub type Result<T, E = ApplauseError> = std::result::Result<T, E>;
