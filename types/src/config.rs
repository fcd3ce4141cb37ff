//! Application configuration.
//!
//! Every section is defaulted so a partial TOML file only overrides what it
//! names. The defaults match `app/assets/dino.toml`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
    pub backend: BackendConfig,
    pub survival: SurvivalConfig,
    pub grid: GridConfig,
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            backend: BackendConfig::default(),
            survival: SurvivalConfig::default(),
            grid: GridConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Where and how to reach the statistics backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Absolute base URL. `None` means the origin the page was served from.
    pub base_url: Option<String>,
    pub statistics_path: String,
    pub survival_path: String,
    pub chat_path: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            statistics_path: "/get-statistics/".to_string(),
            survival_path: "/get-survival/".to_string(),
            chat_path: "/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}

/// Column names the survival panel treats as required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    pub duration_variable: String,
    pub status_variable: String,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            duration_variable: "time_to_event".to_string(),
            status_variable: "event_status".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min_rows: usize,
    pub min_cols: usize,
    /// Start with the bundled survival sample instead of a blank sheet.
    pub load_sample: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_rows: 14,
            min_cols: 7,
            load_sample: true,
        }
    }
}

/// PDF page geometry, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub image_width_mm: f32,
    /// Characters per line for wrapped notes.
    pub wrap_columns: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 15.0,
            margin_top_mm: 20.0,
            margin_bottom_mm: 20.0,
            image_width_mm: 180.0,
            wrap_columns: 95,
        }
    }
}

impl ReportConfig {
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_left_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [backend]
            base_url = "http://localhost:8000"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.backend.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.backend.survival_path, "/get-survival/");
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn content_width_matches_image_width() {
        let report = ReportConfig::default();
        assert_eq!(report.content_width_mm(), report.image_width_mm);
    }
}
