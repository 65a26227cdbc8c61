// applause-core/src/engine.rs
//! Defines the core SubstitutionEngine trait.
//!
//! The `SubstitutionEngine` trait is the interface callers use once an engine
//! has been built: patterns are resolved and compiled up front, and every
//! replacement call afterwards is a pure function of the compiled patterns and
//! the input text.
//!
//! License: MIT OR APACHE 2.0

use crate::config::EngineOptions;
use crate::patterns::resolver::CompiledPatterns;
use crate::report::ReplaceReport;

/// A trait that defines the core functionality of a substitution engine.
pub trait SubstitutionEngine: Send + Sync {
    /// Replaces every placeholder in `content`.
    ///
    /// Returns `None` when no pattern matched anything, which distinguishes
    /// "nothing to do" from a replacement that produced an empty string.
    fn replace(&self, content: &str) -> Option<String> {
        self.replace_with_detail(content).into_content()
    }

    /// Runs every pattern over `content` and reports how many substitutions
    /// each one made.
    fn replace_with_detail(&self, content: &str) -> ReplaceReport;

    /// Returns the ordered patterns the engine applies.
    fn compiled_patterns(&self) -> &CompiledPatterns;

    /// Returns the settings the patterns were compiled with.
    fn options(&self) -> &EngineOptions;
}
