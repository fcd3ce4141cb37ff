//! Request and response shapes for the statistics backend.
//!
//! Field names follow the backend's JSON exactly; Rust-side names are
//! adjusted with `rename`/`alias` where the backend's naming is awkward.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cell::CellValue;
use crate::ordered_map;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /get-statistics/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsPayload {
    pub variable: String,
    pub data: Vec<CellValue>,
    #[serde(rename = "isNumeric")]
    pub is_numeric: bool,
}

/// Body of `POST /get-survival/`: one JSON key per selected variable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurvivalPayload {
    pub columns: Vec<(String, Vec<CellValue>)>,
}

impl SurvivalPayload {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }
}

impl Serialize for SurvivalPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ordered_map::serialize(&self.columns, serializer)
    }
}

impl<'de> Deserialize<'de> for SurvivalPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ordered_map::deserialize(deserializer).map(|columns| Self { columns })
    }
}

/// Body of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub user_input: String,
}

/// Successful chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub result: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptive statistics
// ─────────────────────────────────────────────────────────────────────────────

/// A base64 PNG chart with its display title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chart<'a> {
    pub title: &'static str,
    pub png_base64: &'a str,
}

fn push_chart<'a>(charts: &mut Vec<Chart<'a>>, title: &'static str, image: &'a Option<String>) {
    if let Some(png_base64) = image.as_deref().filter(|s| !s.is_empty()) {
        charts.push(Chart { title, png_base64 });
    }
}

/// Response of `POST /get-statistics/`, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatisticsResult {
    Numeric(NumericStatistics),
    Categorical(CategoricalStatistics),
}

impl StatisticsResult {
    /// Charts in display order: Boxplot, Histogram, Distribution.
    pub fn charts(&self) -> Vec<Chart<'_>> {
        let (boxplot, histogram, barchart) = match self {
            Self::Numeric(s) => (&s.boxplot, &s.histogram, &s.barchart),
            Self::Categorical(s) => (&s.boxplot, &s.histogram, &s.barchart),
        };
        let mut charts = Vec::new();
        push_chart(&mut charts, "Boxplot", boxplot);
        push_chart(&mut charts, "Histogram", histogram);
        push_chart(&mut charts, "Distribution", barchart);
        charts
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub std: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub range: Option<f64>,
    pub sum: Option<f64>,
    pub count: Option<f64>,
    #[serde(rename = "uniqueCount")]
    pub unique_count: Option<f64>,
    pub boxplot: Option<String>,
    pub histogram: Option<String>,
    pub barchart: Option<String>,
}

impl NumericStatistics {
    /// Labeled values in the order they are displayed, exported and reported.
    pub fn summary_rows(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Mode", self.mode),
            ("Standard Deviation", self.std),
            ("Skewness", self.skewness),
            ("Kurtosis", self.kurtosis),
            ("Minimum", self.min),
            ("Maximum", self.max),
            ("Sum", self.sum),
            ("Count", self.count),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoricalStatistics {
    #[serde(default)]
    pub mode: CellValue,
    #[serde(rename = "uniqueCount")]
    pub unique_count: Option<u64>,
    #[serde(rename = "categoryCount", default, with = "ordered_map")]
    pub category_count: Vec<(String, u64)>,
    pub boxplot: Option<String>,
    pub histogram: Option<String>,
    pub barchart: Option<String>,
}

/// One category with its share of all observations.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    pub percentage: f64,
}

impl CategoricalStatistics {
    pub fn total(&self) -> u64 {
        self.category_count.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct categories, falling back to the category table.
    pub fn distinct(&self) -> u64 {
        self.unique_count
            .unwrap_or(self.category_count.len() as u64)
    }

    pub fn shares(&self) -> Vec<CategoryShare> {
        let total = self.total();
        self.category_count
            .iter()
            .map(|(category, count)| CategoryShare {
                category: category.clone(),
                count: *count,
                percentage: if total == 0 {
                    0.0
                } else {
                    *count as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Survival / distribution estimation
// ─────────────────────────────────────────────────────────────────────────────

/// Fitted distribution parameters.
///
/// The backend sends either a positional list (the fitter's tuple) or an
/// object keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FittedParams {
    Positional(Vec<Option<f64>>),
    Named(BTreeMap<String, Option<f64>>),
}

/// Goodness-of-fit record for one candidate distribution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionFit {
    pub aic: Option<f64>,
    pub bic: Option<f64>,
    pub params: Option<FittedParams>,
    pub ks_stat: Option<f64>,
    pub p_value: Option<f64>,
    pub goodness_of_fit: Option<String>,
    /// Set instead of the scores when fitting this candidate failed.
    pub error: Option<String>,
}

/// Kaplan-Meier estimate as parallel arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KaplanMeier {
    #[serde(default)]
    pub timeline: Vec<f64>,
    #[serde(default)]
    pub survival_function: Vec<Option<f64>>,
    /// Flat interleaved bounds: `[lo0, hi0, lo1, hi1, ...]`.
    #[serde(default, alias = "confidenceInterval")]
    pub confidence_interval: Vec<Option<f64>>,
}

/// One Kaplan-Meier table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaplanMeierRow {
    pub time: f64,
    pub survival: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl KaplanMeier {
    pub fn rows(&self) -> Vec<KaplanMeierRow> {
        let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();
        self.timeline
            .iter()
            .enumerate()
            .map(|(i, &time)| KaplanMeierRow {
                time,
                survival: at(&self.survival_function, i),
                lower: at(&self.confidence_interval, i * 2),
                upper: at(&self.confidence_interval, i * 2 + 1),
            })
            .collect()
    }
}

/// Response of `POST /get-survival/`, shared by the survival and
/// estimation panels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurvivalResult {
    #[serde(default, with = "ordered_map")]
    pub all_distributions_results: Vec<(String, DistributionFit)>,
    pub predicted_distribution: Option<String>,
    pub best_distribution: Option<String>,
    pub aic: Option<f64>,
    pub bic: Option<f64>,
    pub params: Option<FittedParams>,
    pub best_params: Option<FittedParams>,
    #[serde(rename = "hasil_uji_goodness_of_fit")]
    pub goodness_of_fit: Option<String>,
    pub kaplan_meier: Option<KaplanMeier>,
    pub median_survival: Option<f64>,
    pub interpretation: Option<String>,
    #[serde(rename = "distribusi_plot")]
    pub distribution_plot: Option<String>,
    pub hazard_plot: Option<String>,
    pub kaplan_meier_plot: Option<String>,
    pub survival_plot: Option<String>,
}

impl SurvivalResult {
    /// Plots in display order.
    pub fn plots(&self) -> Vec<Chart<'_>> {
        let mut charts = Vec::new();
        push_chart(&mut charts, "Distribution Fit", &self.distribution_plot);
        push_chart(&mut charts, "Hazard Function", &self.hazard_plot);
        push_chart(&mut charts, "Kaplan-Meier Curve", &self.kaplan_meier_plot);
        push_chart(&mut charts, "Survival Function", &self.survival_plot);
        charts
    }
}
