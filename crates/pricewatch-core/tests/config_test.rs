//! Tests for the Pricewatch configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use pricewatch_core::config::{CliOverrides, GapPolicy, InvalidRowPolicy, PricewatchConfig};
use pricewatch_core::errors::ConfigError;
use pricewatch_core::RuleThresholds;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all PRICEWATCH_ env vars to prevent cross-test contamination.
fn clear_pricewatch_env_vars() {
    for key in [
        "PRICEWATCH_RULES_RULE1_MIN_DEVIATION",
        "PRICEWATCH_RULES_RULE1_MAX_PERCENTILE",
        "PRICEWATCH_RULES_RULE2_MIN_DEVIATION",
        "PRICEWATCH_RULES_RULE2_MAX_MOM_GROWTH",
        "PRICEWATCH_RULES_RULE2_MAX_YOY_GROWTH",
        "PRICEWATCH_TIERING_STRICT",
        "PRICEWATCH_DYNAMICS_GAP_POLICY",
        "PRICEWATCH_INGEST_INVALID_ROWS",
        "PRICEWATCH_PIPELINE_PARALLEL",
        "PRICEWATCH_REPORT_OUTPUT_DIR",
    ] {
        std::env::remove_var(key);
    }
}

/// CLI beats env, env beats the project file, the project file beats defaults.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pricewatch_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("pricewatch.toml"),
        r#"
[rules]
rule1_min_deviation = 30.0
rule2_min_deviation = 12.0

[tiering]
strict = true
"#,
    )
    .unwrap();
    std::env::set_var("PRICEWATCH_RULES_RULE2_MIN_DEVIATION", "18");

    let cli = CliOverrides {
        rule1_min_deviation: Some(40.0),
        ..Default::default()
    };
    let config = PricewatchConfig::load(dir.path(), None, Some(&cli)).unwrap();

    assert_eq!(config.rules.rule1_min_deviation, Some(40.0));
    assert_eq!(config.rules.rule2_min_deviation, Some(18.0));
    assert_eq!(config.tiering.strict, Some(true));
    assert_eq!(config.rules.rule2_max_mom_growth, None);

    let t = config.rules.thresholds();
    assert_eq!(t.rule1_min_deviation, 40.0);
    assert_eq!(t.rule1_max_percentile, 25.0);
    assert_eq!(t.rule2_max_yoy_growth, -20.0);

    clear_pricewatch_env_vars();
}

/// No config files at all resolves to compiled defaults.
#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pricewatch_env_vars();

    let dir = tempdir();
    let config = PricewatchConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.rules.thresholds(), RuleThresholds::default());
    assert_eq!(config.dynamics.effective_gap_policy(), GapPolicy::PreviousRecord);
    assert_eq!(config.ingest.effective_invalid_rows(), InvalidRowPolicy::Reject);
    assert!(config.pipeline.effective_parallel());
}

/// An explicit config path must exist.
#[test]
fn test_explicit_config_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pricewatch_env_vars();

    let dir = tempdir();
    let missing = dir.path().join("custom.toml");
    let err = PricewatchConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

/// An explicit config path replaces the project file lookup.
#[test]
fn test_explicit_config_is_used() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pricewatch_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("pricewatch.toml"), "[rules]\nrule1_min_deviation = 1.0\n").unwrap();
    let custom = dir.path().join("custom.toml");
    std::fs::write(&custom, "[dynamics]\ngap_policy = \"strict-calendar\"\n").unwrap();

    let config = PricewatchConfig::load(dir.path(), Some(&custom), None).unwrap();
    assert_eq!(config.rules.rule1_min_deviation, None);
    assert_eq!(config.dynamics.gap_policy, Some(GapPolicy::StrictCalendar));
}

/// Enum and path env vars parse; malformed values name the variable.
#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pricewatch_env_vars();

    std::env::set_var("PRICEWATCH_INGEST_INVALID_ROWS", "skip");
    std::env::set_var("PRICEWATCH_DYNAMICS_GAP_POLICY", "strict-calendar");
    std::env::set_var("PRICEWATCH_PIPELINE_PARALLEL", "false");
    std::env::set_var("PRICEWATCH_REPORT_OUTPUT_DIR", "/tmp/pw-out");
    let dir = tempdir();
    let config = PricewatchConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.ingest.invalid_rows, Some(InvalidRowPolicy::Skip));
    assert_eq!(config.dynamics.gap_policy, Some(GapPolicy::StrictCalendar));
    assert_eq!(config.pipeline.parallel, Some(false));
    assert_eq!(config.report.effective_output_dir(), PathBuf::from("/tmp/pw-out"));

    std::env::set_var("PRICEWATCH_TIERING_STRICT", "maybe");
    let err = PricewatchConfig::load(dir.path(), None, None).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "PRICEWATCH_TIERING_STRICT")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    clear_pricewatch_env_vars();
}

/// Invalid TOML is a parse error, not a silent default.
#[test]
fn test_parse_error_on_bad_toml() {
    let err = PricewatchConfig::from_toml("[rules\nrule1_min_deviation = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

/// Unknown keys are ignored.
#[test]
fn test_unknown_keys_ignored() {
    let config = PricewatchConfig::from_toml(
        "[rules]\nrule1_min_deviation = 25.0\nfuture_rule = 3\n\n[future_section]\nx = 1\n",
    )
    .unwrap();
    assert_eq!(config.rules.rule1_min_deviation, Some(25.0));
}

/// Validation names the offending field.
#[test]
fn test_validation_failures() {
    let cases = [
        ("[tiering]\nlower_quantile = 0.7\nupper_quantile = 0.5\n", "tiering.upper_quantile"),
        ("[tiering]\nlower_quantile = 1.5\n", "tiering.lower_quantile"),
        ("[rules]\nrule1_max_percentile = 150.0\n", "rules.rule1_max_percentile"),
        ("[dynamics]\nyoy_offset_months = 0\n", "dynamics.yoy_offset_months"),
        ("[ingest]\ndelimiter = \";;\"\n", "ingest.delimiter"),
        ("[report]\nchart_width = 0\n", "report.chart_width"),
        ("[report]\nchart_height = 0\n", "report.chart_height"),
    ];
    for (toml, expected_field) in cases {
        match PricewatchConfig::from_toml(toml).unwrap_err() {
            ConfigError::ValidationFailed { field, .. } => assert_eq!(field, expected_field),
            other => panic!("unexpected error for {toml:?}: {other:?}"),
        }
    }
}

/// Full config survives a TOML round trip.
#[test]
fn test_toml_round_trip() {
    let config = PricewatchConfig::from_toml(
        r#"
[rules]
rule2_max_mom_growth = -12.5

[ingest]
invalid_rows = "skip"
delimiter = ";"

[ingest.columns]
dealer_id = "dealer"

[report]
chart_width = 800
"#,
    )
    .unwrap();
    let serialized = config.to_toml().unwrap();
    let parsed = PricewatchConfig::from_toml(&serialized).unwrap();
    assert_eq!(config, parsed);
    assert_eq!(parsed.ingest.effective_delimiter(), b';');
    assert_eq!(parsed.ingest.columns.effective_dealer_id(), "dealer");
    assert_eq!(parsed.ingest.columns.effective_quantity(), "cantidad");
    assert_eq!(parsed.report.effective_chart_size(), (800, 900));
}
