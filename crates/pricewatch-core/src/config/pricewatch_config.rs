//! Top-level Pricewatch configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    DynamicsConfig, GapPolicy, IngestConfig, InvalidRowPolicy, PipelineConfig, ReportConfig,
    RulesConfig, TieringConfig,
};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PRICEWATCH_*`)
/// 3. Project config (`pricewatch.toml` in the project root, or an explicit path)
/// 4. User config (`~/.pricewatch/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PricewatchConfig {
    pub rules: RulesConfig,
    pub tiering: TieringConfig,
    pub dynamics: DynamicsConfig,
    pub ingest: IngestConfig,
    pub report: ReportConfig,
    pub pipeline: PipelineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rule1_min_deviation: Option<f64>,
    pub rule1_max_percentile: Option<f64>,
    pub rule2_min_deviation: Option<f64>,
    pub rule2_max_mom_growth: Option<f64>,
    pub rule2_max_yoy_growth: Option<f64>,
    pub strict_tiering: Option<bool>,
    pub gap_policy: Option<GapPolicy>,
    pub invalid_rows: Option<InvalidRowPolicy>,
    pub output_dir: Option<PathBuf>,
    pub parallel: Option<bool>,
}

impl PricewatchConfig {
    /// Load configuration with layered resolution.
    ///
    /// `root` is searched for `pricewatch.toml` unless `explicit` names a
    /// config file, in which case that file must exist.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal.
                        tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PricewatchConfig) -> Result<(), ConfigError> {
        let rules = &config.rules;
        for (field, value) in [
            ("rules.rule1_min_deviation", rules.rule1_min_deviation),
            ("rules.rule1_max_percentile", rules.rule1_max_percentile),
            ("rules.rule2_min_deviation", rules.rule2_min_deviation),
            ("rules.rule2_max_mom_growth", rules.rule2_max_mom_growth),
            ("rules.rule2_max_yoy_growth", rules.rule2_max_yoy_growth),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(invalid(field, "must be a finite number"));
                }
            }
        }
        if let Some(p) = rules.rule1_max_percentile {
            if !(0.0..=100.0).contains(&p) {
                return Err(invalid(
                    "rules.rule1_max_percentile",
                    "must be between 0 and 100",
                ));
            }
        }

        let lower = config.tiering.effective_lower_quantile();
        let upper = config.tiering.effective_upper_quantile();
        if !(lower > 0.0 && lower < 1.0) {
            return Err(invalid(
                "tiering.lower_quantile",
                "must be strictly between 0 and 1",
            ));
        }
        if !(upper > 0.0 && upper < 1.0) {
            return Err(invalid(
                "tiering.upper_quantile",
                "must be strictly between 0 and 1",
            ));
        }
        if lower >= upper {
            return Err(invalid(
                "tiering.upper_quantile",
                "must be greater than tiering.lower_quantile",
            ));
        }

        if config.dynamics.yoy_offset_months == Some(0) {
            return Err(invalid(
                "dynamics.yoy_offset_months",
                "must be greater than 0",
            ));
        }

        if let Some(ref delimiter) = config.ingest.delimiter {
            if delimiter.len() != 1 || !delimiter.is_ascii() {
                return Err(invalid(
                    "ingest.delimiter",
                    "must be a single ASCII character",
                ));
            }
        }

        if config.report.chart_width == Some(0) {
            return Err(invalid("report.chart_width", "must be non-zero"));
        }
        if config.report.chart_height == Some(0) {
            return Err(invalid("report.chart_height", "must be non-zero"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pricewatch/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PricewatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PricewatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut PricewatchConfig, other: &PricewatchConfig) {
        // Rules
        overlay(&mut base.rules.rule1_min_deviation, &other.rules.rule1_min_deviation);
        overlay(&mut base.rules.rule1_max_percentile, &other.rules.rule1_max_percentile);
        overlay(&mut base.rules.rule2_min_deviation, &other.rules.rule2_min_deviation);
        overlay(&mut base.rules.rule2_max_mom_growth, &other.rules.rule2_max_mom_growth);
        overlay(&mut base.rules.rule2_max_yoy_growth, &other.rules.rule2_max_yoy_growth);

        // Tiering
        overlay(&mut base.tiering.lower_quantile, &other.tiering.lower_quantile);
        overlay(&mut base.tiering.upper_quantile, &other.tiering.upper_quantile);
        overlay(&mut base.tiering.strict, &other.tiering.strict);

        // Dynamics
        overlay(&mut base.dynamics.gap_policy, &other.dynamics.gap_policy);
        overlay(
            &mut base.dynamics.yoy_offset_months,
            &other.dynamics.yoy_offset_months,
        );

        // Ingest
        overlay(&mut base.ingest.invalid_rows, &other.ingest.invalid_rows);
        overlay(&mut base.ingest.delimiter, &other.ingest.delimiter);
        let (cols, other_cols) = (&mut base.ingest.columns, &other.ingest.columns);
        overlay(&mut cols.dealer_id, &other_cols.dealer_id);
        overlay(&mut cols.part_id, &other_cols.part_id);
        overlay(&mut cols.year, &other_cols.year);
        overlay(&mut cols.month, &other_cols.month);
        overlay(&mut cols.unit_price, &other_cols.unit_price);
        overlay(&mut cols.quantity, &other_cols.quantity);

        // Report
        overlay(&mut base.report.output_dir, &other.report.output_dir);
        overlay(&mut base.report.chart_width, &other.report.chart_width);
        overlay(&mut base.report.chart_height, &other.report.chart_height);

        // Pipeline
        overlay(&mut base.pipeline.parallel, &other.pipeline.parallel);
    }

    /// Apply environment variable overrides.
    /// Pattern: `PRICEWATCH_RULES_RULE1_MIN_DEVIATION`, `PRICEWATCH_TIERING_STRICT`, etc.
    /// Malformed values are a validation error, never skipped.
    fn apply_env_overrides(config: &mut PricewatchConfig) -> Result<(), ConfigError> {
        let rules = &mut config.rules;
        env_parse("PRICEWATCH_RULES_RULE1_MIN_DEVIATION", &mut rules.rule1_min_deviation)?;
        env_parse("PRICEWATCH_RULES_RULE1_MAX_PERCENTILE", &mut rules.rule1_max_percentile)?;
        env_parse("PRICEWATCH_RULES_RULE2_MIN_DEVIATION", &mut rules.rule2_min_deviation)?;
        env_parse("PRICEWATCH_RULES_RULE2_MAX_MOM_GROWTH", &mut rules.rule2_max_mom_growth)?;
        env_parse("PRICEWATCH_RULES_RULE2_MAX_YOY_GROWTH", &mut rules.rule2_max_yoy_growth)?;
        env_parse("PRICEWATCH_TIERING_STRICT", &mut config.tiering.strict)?;
        env_parse("PRICEWATCH_DYNAMICS_GAP_POLICY", &mut config.dynamics.gap_policy)?;
        env_parse("PRICEWATCH_INGEST_INVALID_ROWS", &mut config.ingest.invalid_rows)?;
        env_parse("PRICEWATCH_PIPELINE_PARALLEL", &mut config.pipeline.parallel)?;
        if let Ok(val) = std::env::var("PRICEWATCH_REPORT_OUTPUT_DIR") {
            config.report.output_dir = Some(PathBuf::from(val));
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PricewatchConfig, cli: &CliOverrides) {
        overlay(&mut config.rules.rule1_min_deviation, &cli.rule1_min_deviation);
        overlay(&mut config.rules.rule1_max_percentile, &cli.rule1_max_percentile);
        overlay(&mut config.rules.rule2_min_deviation, &cli.rule2_min_deviation);
        overlay(&mut config.rules.rule2_max_mom_growth, &cli.rule2_max_mom_growth);
        overlay(&mut config.rules.rule2_max_yoy_growth, &cli.rule2_max_yoy_growth);
        overlay(&mut config.tiering.strict, &cli.strict_tiering);
        overlay(&mut config.dynamics.gap_policy, &cli.gap_policy);
        overlay(&mut config.ingest.invalid_rows, &cli.invalid_rows);
        overlay(&mut config.report.output_dir, &cli.output_dir);
        overlay(&mut config.pipeline.parallel, &cli.parallel);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Replace `base` with `other` when `other` is set.
fn overlay<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if let Some(v) = other {
        *base = Some(v.clone());
    }
}

/// Parse an environment variable into `slot` when it is set.
fn env_parse<T: std::str::FromStr>(key: &str, slot: &mut Option<T>) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var(key) {
        let parsed = val.trim().parse::<T>().map_err(|_| ConfigError::ValidationFailed {
            field: key.to_string(),
            message: format!("cannot parse '{val}'"),
        })?;
        *slot = Some(parsed);
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Returns the user-level config directory: `~/.pricewatch/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".pricewatch"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
