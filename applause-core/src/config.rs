//! Configuration management for `applause-core`.
//!
//! This module defines the engine settings (prefix handling and key delimiter)
//! and the top-level configuration that carries the pattern declarations.
//! Configurations can be built programmatically or read from YAML/JSON text;
//! reading files is left to the caller.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ApplauseError, Result};
use crate::patterns::declaration::PatternDeclaration;
use crate::sources::{Format, FormatParser, FormatParsers};

pub const DEFAULT_PREFIX: &str = "@@";
pub const DEFAULT_DELIMITER: &str = ".";

/// Settings that shape how literal keys are matched and replaced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Marker in front of every placeholder (default `@@`).
    pub prefix: String,
    /// When false, literal keys are matched bare, without the prefix.
    #[serde(alias = "usePrefix")]
    pub use_prefix: bool,
    /// When true, the prefix is re-emitted in front of literal replacements.
    #[serde(alias = "preservePrefix")]
    pub preserve_prefix: bool,
    /// Joins nested keys of flattened sources (default `.`).
    pub delimiter: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            use_prefix: true,
            preserve_prefix: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// Represents the top-level configuration of an engine.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplauseConfig {
    #[serde(flatten)]
    pub options: EngineOptions,
    /// Ordered pattern declarations.
    pub patterns: Vec<PatternDeclaration>,
    /// Shorthand key/value pairs, flattened like a `json` source and applied
    /// after `patterns`.
    pub variables: Option<Map<String, Value>>,
    #[serde(skip)]
    pub parsers: FormatParsers,
}

impl ApplauseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: ApplauseConfig =
            serde_yml::from_str(text).map_err(|e| ApplauseError::Parse(Box::new(e)))?;
        debug!("Read configuration with {} pattern(s) from YAML.", config.patterns.len());
        Ok(config)
    }

    /// Reads a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ApplauseConfig =
            serde_json::from_str(text).map_err(|e| ApplauseError::Parse(Box::new(e)))?;
        debug!("Read configuration with {} pattern(s) from JSON.", config.patterns.len());
        Ok(config)
    }

    pub fn with_pattern(mut self, declaration: PatternDeclaration) -> Self {
        self.patterns.push(declaration);
        self
    }

    /// Adds shorthand variables. Non-object values are ignored.
    pub fn with_variables(mut self, variables: Value) -> Self {
        if let Value::Object(map) = variables {
            self.variables.get_or_insert_with(Map::new).extend(map);
        }
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    pub fn with_use_prefix(mut self, use_prefix: bool) -> Self {
        self.options.use_prefix = use_prefix;
        self
    }

    pub fn with_preserve_prefix(mut self, preserve_prefix: bool) -> Self {
        self.options.preserve_prefix = preserve_prefix;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.delimiter = delimiter.into();
        self
    }

    pub fn with_parser<P>(mut self, format: Format, parser: P) -> Self
    where
        P: FormatParser + 'static,
    {
        self.parsers = self.parsers.with_parser(format, parser);
        self
    }
}
