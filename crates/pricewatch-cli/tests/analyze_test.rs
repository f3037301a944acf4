//! The analyze command end to end, driven through its library entry point.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use pricewatch_cli::{run_analyze, AnalyzeArgs};
use pricewatch_core::PricewatchErrorCode;

const SOURCE_CSV: &str = "\
biz_assoc_id,part_nbr1,YEAR,MONTH,unit_price_amt,cantidad
D,P,2024,1,10,100
D,P,2024,2,15,50
E,P,2024,2,10,200
F,P,2024,2,8,300
G,P,2024,2,10,400
H,P,2024,2,5,500
";

/// Serializes tests that point HOME at a tempdir and clear PRICEWATCH_ vars.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// A tempdir that doubles as HOME, so the developer's own
/// `~/.pricewatch/config.toml` and environment cannot leak into a run.
fn sandbox() -> (MutexGuard<'static, ()>, tempfile::TempDir) {
    let lock = ENV_MUTEX.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("USERPROFILE", &home);
    for (key, _) in std::env::vars() {
        if key.starts_with("PRICEWATCH_") {
            std::env::remove_var(key);
        }
    }
    (lock, dir)
}

fn args(input: PathBuf, output: PathBuf) -> AnalyzeArgs {
    AnalyzeArgs {
        input,
        output: Some(output),
        config: None,
        rule1_deviation: None,
        rule1_percentile: None,
        rule2_deviation: None,
        rule2_mom: None,
        rule2_yoy: None,
        strict_tiering: false,
        gap_policy: None,
        invalid_rows: None,
        no_parallel: false,
    }
}

fn write_source(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("sales.csv");
    fs::write(&path, contents).unwrap();
    path
}

/// A clean run writes the bundle to the requested directory.
#[test]
fn analyze_writes_report_bundle() {
    let (_lock, dir) = sandbox();
    let input = write_source(dir.path(), SOURCE_CSV);
    let out = dir.path().join("report");

    let outcome = run_analyze(&args(input, out.clone()), dir.path()).unwrap();
    assert_eq!(outcome.output_dir, out);
    assert_eq!(outcome.summary.total_rows, 6);
    assert_eq!(outcome.summary.flagged(), 1);
    assert!(out.join("analysis.csv").exists());
    assert!(out.join("report.json").exists());
}

/// A threshold flag overrides the default rule set.
#[test]
fn threshold_flag_changes_classification() {
    let (_lock, dir) = sandbox();
    let input = write_source(dir.path(), SOURCE_CSV);
    let mut a = args(input, dir.path().join("report"));
    a.rule1_deviation = Some(60.0);
    a.rule2_deviation = Some(60.0);

    let outcome = run_analyze(&a, dir.path()).unwrap();
    assert_eq!(outcome.summary.flagged(), 0);
}

/// Project config in the root directory is picked up.
#[test]
fn project_config_is_loaded() {
    let (_lock, dir) = sandbox();
    let input = write_source(dir.path(), SOURCE_CSV);
    fs::write(
        dir.path().join("pricewatch.toml"),
        "[rules]\nrule1_min_deviation = 60.0\nrule2_min_deviation = 60.0\n",
    )
    .unwrap();

    let outcome = run_analyze(&args(input, dir.path().join("report")), dir.path()).unwrap();
    assert_eq!(outcome.summary.flagged(), 0);
}

/// A malformed row aborts the run with a validation code.
#[test]
fn invalid_row_fails_with_validation_code() {
    let (_lock, dir) = sandbox();
    let input = write_source(
        dir.path(),
        "biz_assoc_id,part_nbr1,YEAR,MONTH,unit_price_amt,cantidad\nD,P,2024,13,10,1\n",
    );
    let err = run_analyze(&args(input, dir.path().join("report")), dir.path()).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(err.coded_message().starts_with("[VALIDATION_ERROR]"));
}

/// Missing input and missing config files surface their own codes.
#[test]
fn missing_files_fail_with_codes() {
    let (_lock, dir) = sandbox();
    let missing_input = dir.path().join("nope.csv");
    let err = run_analyze(&args(missing_input, dir.path().join("r")), dir.path()).unwrap_err();
    assert_eq!(err.error_code(), "INGEST_ERROR");

    let input = write_source(dir.path(), SOURCE_CSV);
    let mut a = args(input, dir.path().join("r"));
    a.config = Some(dir.path().join("missing.toml"));
    let err = run_analyze(&a, dir.path()).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

/// A missing required column is reported by name.
#[test]
fn missing_column_is_named() {
    let (_lock, dir) = sandbox();
    let input = write_source(
        dir.path(),
        "biz_assoc_id,part_nbr1,YEAR,MONTH,unit_price_amt\nD,P,2024,1,10\n",
    );
    let err = run_analyze(&args(input, dir.path().join("r")), dir.path()).unwrap_err();
    assert_eq!(err.error_code(), "MISSING_COLUMN");
    assert!(err.to_string().contains("cantidad"));
}

/// The user config under HOME is a layer below the project file.
#[test]
fn user_config_under_home_is_layered() {
    let (_lock, dir) = sandbox();
    let input = write_source(dir.path(), SOURCE_CSV);
    let user_dir = dir.path().join("home").join(".pricewatch");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(
        user_dir.join("config.toml"),
        "[rules]\nrule1_min_deviation = 60.0\nrule2_min_deviation = 60.0\n",
    )
    .unwrap();

    let outcome = run_analyze(&args(input.clone(), dir.path().join("r1")), dir.path()).unwrap();
    assert_eq!(outcome.summary.flagged(), 0);

    fs::write(
        dir.path().join("pricewatch.toml"),
        "[rules]\nrule1_min_deviation = 15.0\n",
    )
    .unwrap();
    let outcome = run_analyze(&args(input, dir.path().join("r2")), dir.path()).unwrap();
    assert_eq!(outcome.summary.flagged(), 1);
}
