// File: applause-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use of the engine: build it from a
//! configuration and replace a single string.

use anyhow::{Context, Result};

use crate::config::ApplauseConfig;
use crate::engine::SubstitutionEngine;
use crate::engines::regex_engine::RegexEngine;

/// Builds an engine from `config`. Shorthand for [`RegexEngine::create`].
pub fn create(config: ApplauseConfig) -> crate::errors::Result<RegexEngine> {
    RegexEngine::create(config)
}

/// Builds an engine from `config` and replaces every placeholder in `content`.
///
/// Returns `Ok(None)` when no pattern matched.
pub fn headless_replace_string(config: ApplauseConfig, content: &str) -> Result<Option<String>> {
    let engine = RegexEngine::create(config).context("Failed to build the replacement engine")?;
    Ok(engine.replace(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::declaration::PatternDeclaration;
    use crate::ApplauseError;
    use serde_json::json;

    #[test]
    fn test_headless_replace_string() -> Result<()> {
        let config = ApplauseConfig::new()
            .with_pattern(PatternDeclaration::new("name", "world"))
            .with_variables(json!({"greeting": "hello"}));
        let replaced = headless_replace_string(config, "@@greeting, @@name!")?;
        assert_eq!(replaced.as_deref(), Some("hello, world!"));
        Ok(())
    }

    #[test]
    fn test_headless_replace_string_reports_invalid_patterns() {
        let config = ApplauseConfig::new().with_pattern(PatternDeclaration::new(json!(1), "value"));
        let err = headless_replace_string(config, "@@1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApplauseError>(),
            Some(ApplauseError::InvalidMatchType { .. })
        ));
    }
}
