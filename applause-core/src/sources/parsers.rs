//! parsers.rs - Pluggable document parsers for key/value sources.
//!
//! The engine never reads files; it only turns source text into a value tree
//! through a [`FormatParser`]. Defaults are provided for every [`Format`] and
//! each one can be swapped out on [`FormatParsers`].
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Format;
use crate::errors::BoxError;

/// Parses raw document text into a nested value tree.
pub trait FormatParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Value, BoxError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl FormatParser for JsonParser {
    fn parse(&self, text: &str) -> Result<Value, BoxError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl FormatParser for YamlParser {
    fn parse(&self, text: &str) -> Result<Value, BoxError> {
        Ok(serde_yml::from_str(text)?)
    }
}

/// Reads the indentation-based CSON subset (`key: 'value'` pairs, nested
/// blocks, `#` comments, inline arrays) that is also valid YAML.
///
/// Documents using CoffeeScript-only syntax such as `"""` blocks or
/// expressions need a dedicated parser registered via
/// [`FormatParsers::with_parser`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CsonParser;

impl FormatParser for CsonParser {
    fn parse(&self, text: &str) -> Result<Value, BoxError> {
        YamlParser.parse(text)
    }
}

/// The set of parsers used to read text payloads, one per format.
#[derive(Clone)]
pub struct FormatParsers {
    json: Arc<dyn FormatParser>,
    yaml: Arc<dyn FormatParser>,
    cson: Arc<dyn FormatParser>,
}

impl FormatParsers {
    pub fn get(&self, format: Format) -> &dyn FormatParser {
        match format {
            Format::Json => self.json.as_ref(),
            Format::Yaml => self.yaml.as_ref(),
            Format::Cson => self.cson.as_ref(),
        }
    }

    pub fn with_parser<P>(mut self, format: Format, parser: P) -> Self
    where
        P: FormatParser + 'static,
    {
        let parser: Arc<dyn FormatParser> = Arc::new(parser);
        match format {
            Format::Json => self.json = parser,
            Format::Yaml => self.yaml = parser,
            Format::Cson => self.cson = parser,
        }
        self
    }
}

impl Default for FormatParsers {
    fn default() -> Self {
        Self {
            json: Arc::new(JsonParser),
            yaml: Arc::new(YamlParser),
            cson: Arc::new(CsonParser),
        }
    }
}

impl fmt::Debug for FormatParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatParsers").finish_non_exhaustive()
    }
}
