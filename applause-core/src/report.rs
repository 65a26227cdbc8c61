//! Data structures describing what a replacement run did.

use serde::Serialize;

use crate::patterns::normalizer::PatternSource;

/// Per-pattern substitution count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
    /// The literal key, or the regex source for raw regex matches.
    pub label: String,
    pub source: PatternSource,
    pub count: usize,
}

/// The outcome of running every pattern over one input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReplaceReport {
    pub content: String,
    /// Total number of substitutions across all patterns.
    pub count: usize,
    /// One entry per pattern that matched at least once, in application order.
    pub details: Vec<MatchDetail>,
}

impl ReplaceReport {
    /// The replaced content, or `None` when no pattern matched.
    pub fn into_content(self) -> Option<String> {
        (self.count > 0).then_some(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matches_means_no_content() {
        let report = ReplaceReport { content: "@@key".to_string(), ..Default::default() };
        assert_eq!(report.into_content(), None);
    }

    #[test]
    fn serializes_source_names() {
        let report = ReplaceReport {
            content: "value".to_string(),
            count: 1,
            details: vec![MatchDetail { label: "key".to_string(), source: PatternSource::Variables, count: 1 }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"content":"value","count":1,"details":[{"label":"key","source":"variables","count":1}]}"#);
    }
}
