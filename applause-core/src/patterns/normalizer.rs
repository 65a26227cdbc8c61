//! normalizer.rs - Turns declarations into compiled matcher/replacer pairs.
//!
//! Every pattern, whether declared directly or produced by flattening a
//! key/value source, ends up as a [`CompiledPattern`]: a global regex plus a
//! replacer that was fixed when the pattern was built. Nothing is inspected
//! per match beyond the captures.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use log::{debug, warn};
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineOptions;
use crate::errors::{ApplauseError, Result};
use crate::patterns::declaration::{MatchSource, ReplaceFn, Replacement, ReplacementArgs};
use crate::patterns::template::ReplacementTemplate;
use crate::sources::Format;

/// Where a compiled pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSource {
    Patterns,
    Json,
    Yaml,
    Cson,
    Variables,
}

impl From<Format> for PatternSource {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => PatternSource::Json,
            Format::Yaml => PatternSource::Yaml,
            Format::Cson => PatternSource::Cson,
        }
    }
}

enum Replacer {
    /// Pre-rendered text, already carrying the prefix when preserved.
    Fixed(String),
    Template {
        template: ReplacementTemplate,
        prefix: Option<String>,
    },
    Computed(ReplaceFn),
}

/// A single pattern, ready to be applied.
pub struct CompiledPattern {
    /// Global matcher. Literal keys are escaped and prefixed.
    pub regex: Regex,
    /// The literal key, or the regex source for raw regex matches.
    pub label: String,
    pub source: PatternSource,
    /// Length in characters of the literal key; 0 for raw regexes.
    pub source_key_length: usize,
    replacer: Replacer,
}

impl CompiledPattern {
    /// Produces the replacement text for one match found in `input`.
    pub(crate) fn render(&self, caps: &Captures<'_>, input: &str) -> String {
        match &self.replacer {
            Replacer::Fixed(text) => text.clone(),
            Replacer::Template { template, prefix } => {
                let groups = capture_groups(caps);
                let mut out = prefix.clone().unwrap_or_default();
                template.expand_into(&groups, &mut out);
                out
            }
            Replacer::Computed(f) => {
                let (matched, offset) = caps.get(0).map_or(("", 0), |m| (m.as_str(), m.start()));
                f(&ReplacementArgs {
                    matched,
                    groups: capture_groups(caps),
                    offset,
                    input,
                })
            }
        }
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let replacer = match &self.replacer {
            Replacer::Fixed(_) => "fixed",
            Replacer::Template { .. } => "template",
            Replacer::Computed(_) => "computed",
        };
        f.debug_struct("CompiledPattern")
            .field("regex", &self.regex.as_str())
            .field("label", &self.label)
            .field("source", &self.source)
            .field("source_key_length", &self.source_key_length)
            .field("replacer", &replacer)
            .finish()
    }
}

fn capture_groups<'h>(caps: &Captures<'h>) -> Vec<Option<&'h str>> {
    caps.iter().skip(1).map(|group| group.map(|m| m.as_str())).collect()
}

/// Builds the compiled pattern for one `match`/`replacement` pair.
///
/// `index` is the position of the originating declaration and is only used
/// in error messages.
pub fn normalize_pair(
    index: usize,
    matcher: Option<MatchSource>,
    replacement: Option<Replacement>,
    source: PatternSource,
    options: &EngineOptions,
) -> Result<CompiledPattern> {
    let (regex, label, source_key_length, literal) = match matcher {
        None | Some(MatchSource::Other(Value::Null)) => return Err(ApplauseError::MissingMatch { index }),
        Some(MatchSource::Other(found)) => {
            return Err(ApplauseError::InvalidMatchType { index, found: found.to_string() })
        }
        Some(MatchSource::Literal(key)) => {
            let escaped = regex::escape(&key);
            let pattern = if options.use_prefix {
                format!("{}{}", regex::escape(&options.prefix), escaped)
            } else {
                escaped
            };
            let regex = Regex::new(&pattern).map_err(|e| ApplauseError::RegexCompilation(key.clone(), e))?;
            let length = key.chars().count();
            (regex, key, length, true)
        }
        Some(MatchSource::Regex(regex)) => {
            let label = regex.as_str().to_string();
            (regex, label, 0, false)
        }
    };

    let replacement = match replacement {
        None | Some(Replacement::Structured(Value::Null)) => {
            return Err(ApplauseError::MissingReplacement { index, label })
        }
        Some(replacement) => replacement,
    };

    let prefix = (options.preserve_prefix && literal).then(|| options.prefix.clone());
    let replacer = match replacement {
        Replacement::Computed(f) => Replacer::Computed(f),
        Replacement::Text(text) => Replacer::Template {
            template: ReplacementTemplate::parse(&text, regex.captures_len() - 1),
            prefix,
        },
        Replacement::Structured(value) => {
            let rendered = render_structured(&value)?;
            Replacer::Fixed(prefix.unwrap_or_default() + &rendered)
        }
    };

    debug!(
        target: "applause_core::patterns",
        "Compiled pattern '{}' from {:?} as /{}/.",
        label,
        source,
        regex.as_str()
    );

    Ok(CompiledPattern {
        regex,
        label,
        source,
        source_key_length,
        replacer,
    })
}

/// Builds one compiled pattern per flattened `(key, value)` entry.
///
/// Entries with an empty key are skipped: they would match every bare prefix.
pub fn normalize_entries(
    index: usize,
    entries: Vec<(String, Value)>,
    source: PatternSource,
    options: &EngineOptions,
) -> Result<Vec<CompiledPattern>> {
    let mut compiled = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if key.is_empty() {
            warn!("Pattern #{}: skipping {:?} entry with an empty key.", index, source);
            continue;
        }
        compiled.push(normalize_pair(
            index,
            Some(MatchSource::Literal(key)),
            Some(Replacement::from(value)),
            source,
            options,
        )?);
    }
    Ok(compiled)
}

fn render_structured(value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
        other => other.to_string(),
    })
}
