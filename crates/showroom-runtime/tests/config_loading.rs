//! Loading `InteractionConfig` from TOML and JSON (requires `config`).

use std::io::Write;

use showroom_runtime::config::{ConfigError, InteractionConfig};
use web_time::Duration;

#[test]
fn partial_toml_fills_defaults() {
    let config = InteractionConfig::from_toml_str(
        r#"
        [header]
        collapse_threshold = 200.0

        [carousel]
        auto_advance_ms = 8000
        "#,
    )
    .unwrap();
    assert!((config.header.collapse_threshold - 200.0).abs() < 1e-12);
    assert!((config.header.scrolled_threshold - 50.0).abs() < 1e-12);
    assert_eq!(config.carousel.period(), Duration::from_millis(8000));
    assert_eq!(config.form.latency(), Duration::from_millis(1500));
}

#[test]
fn spring_tables_parse() {
    let config = InteractionConfig::from_toml_str(
        r#"
        [tilt.spring]
        stiffness = 400.0
        damping = 35.0
        "#,
    )
    .unwrap();
    assert!((config.tilt.spring.stiffness - 400.0).abs() < 1e-12);
    assert!((config.tilt.max_tilt - 15.0).abs() < 1e-12);
}

#[test]
fn json_round_trip_through_toml() {
    let config = InteractionConfig::from_json_str(r#"{"magnetic": {"strength": 0.5}}"#).unwrap();
    let toml = config.to_toml_string().unwrap();
    let again = InteractionConfig::from_toml_str(&toml).unwrap();
    assert_eq!(config, again);
}

#[test]
fn invalid_values_are_rejected() {
    let err = InteractionConfig::from_toml_str("[carousel]\nauto_advance_ms = 0\n").unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("auto_advance_ms")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn parse_errors_are_typed() {
    assert!(matches!(
        InteractionConfig::from_toml_str("[header"),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        InteractionConfig::from_json_str("{"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn loads_from_files() {
    let mut toml_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(toml_file, "[scroll]\nquiet_ms = 200").unwrap();
    let config = InteractionConfig::from_toml_file(toml_file.path()).unwrap();
    assert_eq!(config.scroll.quiet_ms, 200);

    let mut json_file = tempfile::NamedTempFile::new().unwrap();
    write!(json_file, r#"{{"form": {{"latency_ms": 10}}}}"#).unwrap();
    let config = InteractionConfig::from_json_file(json_file.path()).unwrap();
    assert_eq!(config.form.latency_ms, 10);

    assert!(matches!(
        InteractionConfig::from_toml_file("/nonexistent/showroom.toml"),
        Err(ConfigError::Io(_))
    ));
}
