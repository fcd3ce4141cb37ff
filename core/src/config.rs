//! Configuration loading.
//!
//! The browser build has no filesystem, so configuration arrives as TOML
//! text (embedded at compile time by the app) and is parsed here.

use dino_types::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parse an [`AppConfig`] from TOML, filling every missing field with its default.
pub fn load_from_str(source: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(source)?;
    validate(&config)?;
    tracing::debug!(log_level = %config.log_level, "configuration loaded");
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.survival.duration_variable.trim().is_empty()
        || config.survival.status_variable.trim().is_empty()
    {
        return Err(ConfigError::Invalid(
            "survival variable names must not be blank".to_string(),
        ));
    }
    if config.grid.min_rows < 2 || config.grid.min_cols < 1 {
        return Err(ConfigError::Invalid(
            "grid needs at least a header row, one data row and one column".to_string(),
        ));
    }
    let report = &config.report;
    if report.image_width_mm > report.content_width_mm() + f32::EPSILON
        || report.margin_top_mm + report.margin_bottom_mm >= report.page_height_mm
    {
        return Err(ConfigError::Invalid(
            "report images and margins must fit on the page".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = load_from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_blank_survival_variable() {
        let err = load_from_str("[survival]\nstatus_variable = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = load_from_str("[grid\nmin_rows = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let config = load_from_str(include_str!("../../app/assets/dino.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
