//! declaration.rs - User-facing pattern declarations.
//!
//! A declaration is what the caller writes: a `match`/`replacement` pair, or a
//! `json`/`yaml`/`cson` key/value source. Declarations read from a document
//! keep loosely typed values so that type errors (a numeric `match`, a `null`
//! replacement) surface as [`ApplauseError`](crate::ApplauseError)s while the
//! engine is built, not as deserialization failures.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::sources::{Format, SourceData};

/// Arguments passed to a computed replacement, mirroring a regex-replace
/// callback: the whole match, each capture group, the match offset in bytes,
/// and the text being scanned.
#[derive(Debug, Clone)]
pub struct ReplacementArgs<'a> {
    pub matched: &'a str,
    pub groups: Vec<Option<&'a str>>,
    pub offset: usize,
    pub input: &'a str,
}

pub type ReplaceFn = Arc<dyn Fn(&ReplacementArgs<'_>) -> String + Send + Sync>;

/// What a pattern matches.
#[derive(Debug, Clone)]
pub enum MatchSource {
    /// A literal key, escaped and optionally prefixed before compiling.
    Literal(String),
    /// A raw regular expression, applied to every occurrence.
    Regex(Regex),
    /// Any other value read from an untyped document. Rejected at build time.
    Other(Value),
}

impl From<&str> for MatchSource {
    fn from(key: &str) -> Self {
        MatchSource::Literal(key.to_string())
    }
}

impl From<String> for MatchSource {
    fn from(key: String) -> Self {
        MatchSource::Literal(key)
    }
}

impl From<Regex> for MatchSource {
    fn from(regex: Regex) -> Self {
        MatchSource::Regex(regex)
    }
}

impl From<Value> for MatchSource {
    fn from(value: Value) -> Self {
        match value {
            Value::String(key) => MatchSource::Literal(key),
            other => MatchSource::Other(other),
        }
    }
}

/// What a match is replaced with.
#[derive(Clone)]
pub enum Replacement {
    /// Text with `$` backreferences.
    Text(String),
    /// A callback whose return value is used verbatim.
    Computed(ReplaceFn),
    /// Any other value; arrays and objects render as compact JSON, scalars
    /// as their plain text.
    Structured(Value),
}

impl Replacement {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&ReplacementArgs<'_>) -> String + Send + Sync + 'static,
    {
        Replacement::Computed(Arc::new(f))
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
            Replacement::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
        }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Replacement::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Replacement::Text(text)
    }
}

impl From<Value> for Replacement {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Replacement::Text(text),
            other => Replacement::Structured(other),
        }
    }
}

/// A single entry of the `patterns` list.
///
/// When one of `json`, `yaml` or `cson` is set, its flattened entries are the
/// patterns this declaration contributes and `matcher`/`replacement` are
/// ignored. A declaration with no field set is inert.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "RawDeclaration")]
pub struct PatternDeclaration {
    pub matcher: Option<MatchSource>,
    pub replacement: Option<Replacement>,
    pub json: Option<SourceData>,
    pub yaml: Option<SourceData>,
    pub cson: Option<SourceData>,
}

impl PatternDeclaration {
    pub fn new(matcher: impl Into<MatchSource>, replacement: impl Into<Replacement>) -> Self {
        Self {
            matcher: Some(matcher.into()),
            replacement: Some(replacement.into()),
            ..Self::default()
        }
    }

    pub fn json(source: impl Into<SourceData>) -> Self {
        Self::source(Format::Json, source)
    }

    pub fn yaml(source: impl Into<SourceData>) -> Self {
        Self::source(Format::Yaml, source)
    }

    pub fn cson(source: impl Into<SourceData>) -> Self {
        Self::source(Format::Cson, source)
    }

    pub fn source(format: Format, source: impl Into<SourceData>) -> Self {
        let mut declaration = Self::default();
        let slot = match format {
            Format::Json => &mut declaration.json,
            Format::Yaml => &mut declaration.yaml,
            Format::Cson => &mut declaration.cson,
        };
        *slot = Some(source.into());
        declaration
    }

    pub fn has_sources(&self) -> bool {
        self.json.is_some() || self.yaml.is_some() || self.cson.is_some()
    }

    pub fn is_inert(&self) -> bool {
        !self.has_sources() && self.matcher.is_none() && self.replacement.is_none()
    }

    /// Takes the key/value sources out of the declaration, in json, yaml,
    /// cson order.
    pub(crate) fn take_sources(&mut self) -> Vec<(Format, SourceData)> {
        [
            (Format::Json, self.json.take()),
            (Format::Yaml, self.yaml.take()),
            (Format::Cson, self.cson.take()),
        ]
        .into_iter()
        .filter_map(|(format, source)| source.map(|s| (format, s)))
        .collect()
    }
}

/// Wire shape of a declaration. `null` and absent fields are both `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDeclaration {
    #[serde(rename = "match")]
    matcher: Option<Value>,
    replacement: Option<Value>,
    json: Option<Value>,
    yaml: Option<Value>,
    cson: Option<Value>,
}

impl From<RawDeclaration> for PatternDeclaration {
    fn from(raw: RawDeclaration) -> Self {
        Self {
            matcher: raw.matcher.map(MatchSource::from),
            replacement: raw.replacement.map(Replacement::from),
            json: raw.json.map(SourceData::from),
            yaml: raw.yaml.map(SourceData::from),
            cson: raw.cson.map(SourceData::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_read_as_absent() {
        let declaration: PatternDeclaration =
            serde_json::from_value(json!({"match": null, "replacement": "value"})).unwrap();
        assert!(declaration.matcher.is_none());
        assert!(matches!(declaration.replacement, Some(Replacement::Text(ref t)) if t == "value"));
    }

    #[test]
    fn numeric_match_is_kept_for_validation() {
        let declaration: PatternDeclaration =
            serde_json::from_value(json!({"match": 1, "replacement": "value"})).unwrap();
        assert!(matches!(declaration.matcher, Some(MatchSource::Other(ref v)) if v == &json!(1)));
    }

    #[test]
    fn empty_declaration_is_inert() {
        let declaration: PatternDeclaration = serde_json::from_value(json!({})).unwrap();
        assert!(declaration.is_inert());
    }

    #[test]
    fn take_sources_keeps_format_order() {
        let mut declaration = PatternDeclaration::cson("key: 'c'");
        declaration.json = Some(json!({"key": "j"}).into());
        let formats: Vec<Format> = declaration.take_sources().into_iter().map(|(f, _)| f).collect();
        assert_eq!(formats, vec![Format::Json, Format::Cson]);
        assert!(!declaration.has_sources());
    }
}
