// applause-core/src/lib.rs
//! # Applause Core Library
//!
//! `applause-core` replaces placeholders such as `@@key` in text with values
//! taken from user-declared patterns. Patterns can be literal keys, regular
//! expressions, or key/value documents (JSON, YAML, CSON) that are flattened
//! into dotted keys. Documents may be given inline or loaded later by a
//! deferred loader.
//!
//! The library does no I/O of its own: documents arrive as values or text, and
//! parsing text is delegated to pluggable [`FormatParser`]s.
//!
//! ## Modules
//!
//! * `config`: Defines [`ApplauseConfig`] and [`EngineOptions`] (prefix, delimiter).
//! * `patterns`: Declarations, flattening, normalization and ordering of patterns.
//! * `sources`: Inline and deferred key/value sources and their parsers.
//! * `engine`: Defines the [`SubstitutionEngine`] trait.
//! * `engines`: Contains the concrete [`RegexEngine`].
//! * `report`: Per-pattern substitution counts.
//! * `headless`: One-shot convenience functions.
//! * `errors`: The [`ApplauseError`] type.
//!
//! ## Usage Example
//!
//! ```rust
//! use applause_core::{ApplauseConfig, PatternDeclaration, RegexEngine, SubstitutionEngine};
//! use serde_json::json;
//!
//! fn main() -> Result<(), applause_core::ApplauseError> {
//!     let config = ApplauseConfig::new()
//!         .with_pattern(PatternDeclaration::new("version", "1.2.0"))
//!         .with_pattern(PatternDeclaration::json(json!({"app": {"name": "demo"}})));
//!
//!     let engine = RegexEngine::create(config)?;
//!     let output = engine.replace("@@app.name v@@version");
//!     assert_eq!(output.as_deref(), Some("demo v1.2.0"));
//!
//!     // `None` means nothing was replaced.
//!     assert_eq!(engine.replace("no placeholders"), None);
//!     Ok(())
//! }
//! ```
//!
//! ## Ordering
//!
//! Patterns are applied one after another, each pass over the output of the
//! previous one. Longer literal keys run first so that `@@smaller` is never
//! cut short by a `small` pattern; raw regexes run last in declaration order.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod patterns;
pub mod report;
pub mod sources;

/// Re-exports the configuration types.
pub use config::{ApplauseConfig, EngineOptions, DEFAULT_DELIMITER, DEFAULT_PREFIX};

/// Re-exports the custom error type for clear error reporting.
pub use errors::{ApplauseError, BoxError};

/// Re-exports the engine trait and its regex implementation.
pub use engine::SubstitutionEngine;
pub use engines::regex_engine::RegexEngine;

/// Re-exports the pattern declaration and compilation types.
pub use patterns::declaration::{MatchSource, PatternDeclaration, ReplaceFn, Replacement, ReplacementArgs};
pub use patterns::flatten::flatten;
pub use patterns::normalizer::{CompiledPattern, PatternSource};
pub use patterns::resolver::{resolve_patterns, resolve_patterns_blocking, CompiledPatterns};

/// Re-exports source types for inline and deferred key/value documents.
pub use sources::{
    Completion, CsonParser, Deferred, Format, FormatParser, FormatParsers, JsonParser, Payload, SourceData,
    SourceLoader, YamlParser,
};

pub use report::{MatchDetail, ReplaceReport};

/// Re-exports one-shot helpers.
pub use headless::{create, headless_replace_string};
