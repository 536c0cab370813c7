//! Tests for formation configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        team_size = 6
        random_seed = 42

        [parallel]
        enabled = false
        thread_count = { count = 8 }
        threshold = 300
        min_chunk_size = 40

        [balance]
        max_iterations = 10
        skill_gap_threshold = 0.5

        [ingest]
        thread_count = 2
        skip_header = false
    "#;

    let config = FormationConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.team_size, 6);
    assert_eq!(config.random_seed, Some(42));
    assert!(!config.parallel.enabled);
    assert_eq!(config.parallel.thread_count, ThreadCount::Count(8));
    assert_eq!(config.parallel.threshold, 300);
    assert_eq!(config.parallel.min_chunk_size, 40);
    assert_eq!(config.parallel.chunk_timeout_ms, 2000);
    assert_eq!(config.balance.max_iterations, 10);
    assert!((config.balance.skill_gap_threshold - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.ingest.thread_count, 2);
    assert!(!config.ingest.skip_header);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        team_size: 4
        random_seed: 9
        parallel:
          thread_count: auto
          chunk_timeout_ms: 250
        balance:
          max_iterations: 5
    "#;

    let config = FormationConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.team_size, 4);
    assert_eq!(config.random_seed, Some(9));
    assert_eq!(config.parallel.thread_count, ThreadCount::Auto);
    assert_eq!(config.parallel.chunk_timeout(), Duration::from_millis(250));
    assert_eq!(config.balance.max_iterations, 5);
    assert_eq!(config.ingest, IngestConfig::default());
}

#[test]
fn test_defaults() {
    let config = FormationConfig::from_toml_str("").unwrap();
    assert_eq!(config, FormationConfig::default());
    assert_eq!(config.team_size, 5);
    assert_eq!(config.random_seed, None);
    assert_eq!(config.parallel.threshold, 150);
    assert_eq!(config.parallel.min_chunk_size, 25);
    assert_eq!(config.balance.max_iterations, 50);
    assert!((config.balance.skill_gap_threshold - 1.2).abs() < f64::EPSILON);
}

#[test]
fn test_builder() {
    let config = FormationConfig::new()
        .with_team_size(3)
        .with_random_seed(123)
        .with_balance(BalanceConfig {
            max_iterations: 1,
            ..BalanceConfig::default()
        });

    assert_eq!(config.team_size, 3);
    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.balance.max_iterations, 1);
}

#[test]
fn test_invalid_values_rejected() {
    let err = FormationConfig::from_toml_str("[parallel]\nmin_chunk_size = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = FormationConfig::from_toml_str("[parallel]\nthread_count = { count = 0 }")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = FormationConfig::from_toml_str("[balance]\nskill_gap_threshold = -1.0")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = FormationConfig::from_toml_str("team_size = \"six\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = FormationConfig::load("definitely/not/here/teamforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_thread_count_resolve() {
    assert_eq!(ThreadCount::Count(3).resolve(), 3);
    assert!(ThreadCount::Auto.resolve() >= 1);
}
