//! Tests for the facade crate's re-exports and logging configuration.

use taleforge::{
    ChoiceExtractor, ConfigError, ObservabilityConfig, SegmentSource, TaleforgeError,
    TaleforgeErrorKind, extract_choices, parse_segment,
};

#[test]
fn test_observability_builder() {
    let config = ObservabilityConfig::default()
        .with_log_level("debug")
        .with_json_logs(true);
    assert_eq!(config.log_level, "debug");
    assert!(config.json_logs);
}

#[test]
fn test_observability_defaults_to_text_logs() {
    assert!(!ObservabilityConfig::new().json_logs);
}

#[test]
fn test_reexports_extraction_api() {
    let choices = extract_choices("- Open the gate\n- Wake the guard\n- Climb the wall");
    assert_eq!(choices, ["Open the gate", "Wake the guard", "Climb the wall"]);

    let outcome = ChoiceExtractor::default().extract("Open the gate\nWake the guard");
    assert!(outcome.strategy().is_some());
    assert_eq!(outcome.fallback_count(), 1);
    assert_eq!(outcome.choices()[..2], ["Open the gate", "Wake the guard"]);
    assert_eq!(outcome.choices()[2], "Continue the adventure");
}

#[test]
fn test_structured_segment_through_facade() {
    let raw = r#"{"text": "The gate creaked.", "choices": ["Step inside", "Call out", "Run away"]}"#;
    let segment = parse_segment(&ChoiceExtractor::default(), raw);
    assert_eq!(segment.source(), &SegmentSource::Structured);
    assert_eq!(segment.text(), "The gate creaked.");
    assert!(!segment.used_fallback());
}

#[test]
fn test_reexports_error_types() {
    let err: TaleforgeError = ConfigError::new("bad pool").into();
    assert!(matches!(err.kind(), TaleforgeErrorKind::Config(_)));
    assert!(format!("{}", err).starts_with("Tale Forge Error: Configuration Error: bad pool"));
}
