// applause-core/src/engines/regex_engine.rs
//! A `SubstitutionEngine` implementation that applies the compiled patterns
//! as sequential global regex passes.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use log::debug;
use regex::Captures;

use crate::config::{ApplauseConfig, EngineOptions};
use crate::engine::SubstitutionEngine;
use crate::errors::Result;
use crate::patterns::resolver::{resolve_patterns, resolve_patterns_blocking, CompiledPatterns};
use crate::report::{MatchDetail, ReplaceReport};

/// The substitution engine. Cheap to clone; clones share the compiled
/// patterns.
#[derive(Debug, Clone)]
pub struct RegexEngine {
    compiled_patterns: Arc<CompiledPatterns>,
    options: EngineOptions,
}

impl RegexEngine {
    /// Builds an engine, blocking until every deferred source has loaded.
    ///
    /// Fails on the first invalid declaration. Use [`RegexEngine::create_async`]
    /// from inside an async runtime when deferred sources are involved.
    pub fn create(config: ApplauseConfig) -> Result<Self> {
        let options = config.options.clone();
        let compiled_patterns = resolve_patterns_blocking(config)?;
        Ok(Self::from_compiled(compiled_patterns, options))
    }

    /// Builds an engine, awaiting every deferred source.
    pub async fn create_async(config: ApplauseConfig) -> Result<Self> {
        let options = config.options.clone();
        let compiled_patterns = resolve_patterns(config).await?;
        Ok(Self::from_compiled(compiled_patterns, options))
    }

    fn from_compiled(compiled_patterns: CompiledPatterns, options: EngineOptions) -> Self {
        Self {
            compiled_patterns: Arc::new(compiled_patterns),
            options,
        }
    }
}

impl SubstitutionEngine for RegexEngine {
    fn replace_with_detail(&self, content: &str) -> ReplaceReport {
        let mut text = content.to_string();
        let mut report = ReplaceReport::default();

        for pattern in self.compiled_patterns.iter() {
            let mut hits = 0usize;
            let replaced = {
                let input = text.as_str();
                pattern.regex.replace_all(input, |caps: &Captures<'_>| {
                    hits += 1;
                    pattern.render(caps, input)
                })
            };
            if let Cow::Owned(next) = replaced {
                text = next;
            }
            if hits == 0 {
                continue;
            }

            debug!(
                target: "applause_core::engine",
                "Pattern '{}' replaced {} occurrence(s).",
                pattern.label,
                hits
            );
            report.count += hits;
            report.details.push(MatchDetail {
                label: pattern.label.clone(),
                source: pattern.source,
                count: hits,
            });
        }

        report.content = text;
        report
    }

    fn compiled_patterns(&self) -> &CompiledPatterns {
        &self.compiled_patterns
    }

    fn options(&self) -> &EngineOptions {
        &self.options
    }
}
