// applause-core/tests/replace_integration_tests.rs
use applause_core::{
    ApplauseConfig, ApplauseError, PatternDeclaration, RegexEngine, Replacement, SubstitutionEngine,
};
use regex::Regex;
use serde_json::{json, Value};
use test_log::test;

fn engine(config: ApplauseConfig) -> RegexEngine {
    RegexEngine::create(config).expect("engine should build")
}

fn single(key: &str, replacement: impl Into<Replacement>) -> ApplauseConfig {
    ApplauseConfig::new().with_pattern(PatternDeclaration::new(key, replacement))
}

fn nested_document() -> Value {
    json!({
        "key_1": "value_1",
        "key_2": "value_2",
        "group_1": {
            "group_2": { "key_3": "value_3" },
            "group_3": { "key_4": "value_4" },
            "array": [1, 2, 3]
        }
    })
}

#[test]
fn test_replace_simple_key() {
    let engine = engine(single("key", "value"));
    assert_eq!(engine.replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_replace_with_custom_prefix() {
    let engine = engine(single("key", "value").with_prefix("@replace:"));
    assert_eq!(engine.replace("@replace:key").as_deref(), Some("value"));
    assert_eq!(engine.replace("@@key"), None);
}

#[test]
fn test_replace_without_prefix() {
    let engine = engine(single("key", "value").with_use_prefix(false));
    assert_eq!(engine.replace("key").as_deref(), Some("value"));
}

#[test]
fn test_escaped_dollar_sign() {
    let engine = engine(single("key", "$$'"));
    assert_eq!(engine.replace("@@key").as_deref(), Some("$'"));
}

#[test]
fn test_special_characters_in_replacement() {
    let engine = engine(single("key", "detta är en sträng"));
    assert_eq!(engine.replace("@@key").as_deref(), Some("detta är en sträng"));
}

#[test]
fn test_regex_match() {
    let engine = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::new(Regex::new("key").unwrap(), "value")));
    assert_eq!(engine.replace("key").as_deref(), Some("value"));
}

#[test]
fn test_computed_replacement() {
    let engine = engine(single("key", Replacement::computed(|_| "value".to_string())));
    assert_eq!(engine.replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_backreferences_swap_names() {
    let config = ApplauseConfig::new()
        .with_pattern(PatternDeclaration::new(Regex::new(r"(\w+)\s(\w+)").unwrap(), "$2, $1"));
    let engine = engine(config);
    assert_eq!(engine.replace("John Smith").as_deref(), Some("Smith, John"));
}

#[test]
fn test_regex_matches_are_global() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration::new(Regex::new(r"\d").unwrap(), "#"));
    let engine = engine(config);
    assert_eq!(engine.replace("a1b2c3").as_deref(), Some("a#b#c#"));
}

#[test]
fn test_invalid_match_type_fails() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration::new(json!(1), "value"));
    let err = RegexEngine::create(config).unwrap_err();
    assert!(matches!(err, ApplauseError::InvalidMatchType { index: 0, .. }), "{err}");
}

#[test]
fn test_missing_match_fails() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration {
        replacement: Some("value".into()),
        ..Default::default()
    });
    assert!(matches!(RegexEngine::create(config), Err(ApplauseError::MissingMatch { .. })));
}

#[test]
fn test_null_match_fails() {
    let config = ApplauseConfig::from_json_str(r#"{"patterns": [{"match": null, "replacement": "value"}]}"#).unwrap();
    assert!(matches!(RegexEngine::create(config), Err(ApplauseError::MissingMatch { .. })));
}

#[test]
fn test_missing_replacement_fails() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration {
        matcher: Some("key".into()),
        ..Default::default()
    });
    assert!(matches!(RegexEngine::create(config), Err(ApplauseError::MissingReplacement { .. })));
}

#[test]
fn test_null_replacement_fails() {
    let config = ApplauseConfig::from_json_str(r#"{"patterns": [{"match": "key", "replacement": null}]}"#).unwrap();
    assert!(matches!(RegexEngine::create(config), Err(ApplauseError::MissingReplacement { .. })));
}

#[test]
fn test_empty_declarations_are_ignored() {
    let engine = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::default()));
    assert_eq!(engine.replace("@@key"), None);
}

#[test]
fn test_variables() {
    let engine = engine(ApplauseConfig::new().with_variables(json!({"key": "value"})));
    assert_eq!(engine.replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_array_replacement() {
    let engine = engine(single("key", json!([1, 2, 3, 4])));
    assert_eq!(engine.replace("@@key").as_deref(), Some("[1,2,3,4]"));
}

#[test]
fn test_object_replacement() {
    let engine = engine(single("key", json!({"foo": "bar"})));
    assert_eq!(engine.replace("@@key").as_deref(), Some(r#"{"foo":"bar"}"#));
}

#[test]
fn test_sorted_patterns_prevent_bad_replaces() {
    let config = ApplauseConfig::new()
        .with_pattern(PatternDeclaration::new("smaller", "2"))
        .with_pattern(PatternDeclaration::new("small", "1"))
        .with_pattern(PatternDeclaration::new("smallest", "3"));
    let engine = engine(config);
    assert_eq!(engine.replace("@@small-@@smaller-@@smallest").as_deref(), Some("1-2-3"));
}

#[test]
fn test_sorted_json_patterns_prevent_bad_replaces() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration::json(json!({
        "small": "1",
        "smaller": "2",
        "smallest": "3"
    })));
    let engine = engine(config);
    assert_eq!(engine.replace("@@small-@@smaller-@@smallest").as_deref(), Some("1-2-3"));
}

#[test]
fn test_preserve_prefix() {
    let engine = engine(single("key", "value").with_preserve_prefix(true));
    assert_eq!(engine.replace("@@key").as_deref(), Some("@@value"));
}

#[test]
fn test_preserve_prefix_skipped_for_computed_replacement() {
    let config = single("key", Replacement::computed(|_| "value".to_string())).with_preserve_prefix(true);
    assert_eq!(engine(config).replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_preserve_prefix_skipped_for_regex_match() {
    let config = ApplauseConfig::new()
        .with_pattern(PatternDeclaration::new(Regex::new("@@key").unwrap(), "value"))
        .with_preserve_prefix(true);
    assert_eq!(engine(config).replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_flatten_json_object() {
    let engine = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::json(nested_document())));
    assert_eq!(engine.replace("@@group_1.group_2.key_3").as_deref(), Some("value_3"));
    assert_eq!(engine.replace("@@group_1.array").as_deref(), Some("[1,2,3]"));
}

#[test]
fn test_flatten_json_object_with_custom_delimiter() {
    let config = ApplauseConfig::new()
        .with_pattern(PatternDeclaration::json(nested_document()))
        .with_delimiter("-");
    assert_eq!(engine(config).replace("@@group_1-group_2-key_3").as_deref(), Some("value_3"));
}

#[test]
fn test_escape_string_to_create_regex() {
    let engine = engine(single("(../fonts/", "../font/").with_use_prefix(false));
    assert_eq!(engine.replace("(../fonts/").as_deref(), Some("../font/"));
}

#[test]
fn test_inline_sources() {
    let json = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::json(json!({"key": "value"}))));
    assert_eq!(json.replace("@@key").as_deref(), Some("value"));

    let json_text = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::json(r#"{"key": "value"}"#)));
    assert_eq!(json_text.replace("@@key").as_deref(), Some("value"));

    let yaml = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::yaml("key: value")));
    assert_eq!(yaml.replace("@@key").as_deref(), Some("value"));

    let cson = engine(ApplauseConfig::new().with_pattern(PatternDeclaration::cson("key: 'value'")));
    assert_eq!(cson.replace("@@key").as_deref(), Some("value"));
}

#[test]
fn test_malformed_yaml_source_fails() {
    let config = ApplauseConfig::new().with_pattern(PatternDeclaration::yaml("key: [unterminated"));
    assert!(matches!(RegexEngine::create(config), Err(ApplauseError::Parse(_))));
}

#[test]
fn test_engine_is_reusable() {
    let engine = engine(single("key", "value"));
    for _ in 0..3 {
        assert_eq!(engine.replace("a @@key b").as_deref(), Some("a value b"));
    }
}
