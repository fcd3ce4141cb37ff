//! Downloadable PDF reports built from typed analysis results.
//!
//! A [`Report`] is a plain document model: title, a primary table, then
//! sections of labeled values, notes and chart images. The builders here map
//! each analysis result onto that model; [`Report::to_pdf`] lays it out on
//! A4 pages and serializes it.

mod image;
mod layout;
mod pdf;

use chrono::NaiveDate;

use dino_types::formatting::{
    NOT_AVAILABLE, format_fixed, format_percentage, format_score, format_stat_value,
};
use dino_types::{ReportConfig, StatisticsResult, SurvivalResult};

use crate::comparison::{
    AIC_NOTE, Agreement, BIC_NOTE, BestFit, CONSENSUS_NOTE, DISAGREEMENT_NOTE, DistributionComparison,
    LARGE_SAMPLE_NOTE, params_line,
};
use crate::interpretation::Interpretation;

pub use image::{DecodedImage, ImageError, decode_png_base64};
use layout::{FontStyle, PageLayout, line_height};

pub const SURVIVAL_REPORT_FILE: &str = "survival_analysis_report.pdf";

const SURVIVAL_FOOTER: &str = "End of Survival Analysis Report";
const ESTIMATION_FOOTER: &str = "End of Report";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Document model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTable {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A chart as the backend sent it, decoded only when the PDF is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportImage {
    pub title: String,
    pub png_base64: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSection {
    pub title: String,
    pub values: Vec<LabeledValue>,
    pub table: Option<ReportTable>,
    pub notes: Vec<String>,
    pub images: Vec<ReportImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub title_size: f32,
    pub generated_on: NaiveDate,
    pub primary_table: Option<ReportTable>,
    pub sections: Vec<ReportSection>,
    pub footer: Option<String>,
    pub file_name: String,
}

/// `analysis_<name>.pdf`, every whitespace run replaced by `_`.
pub fn descriptive_file_name(variable: &str) -> String {
    let mut name = String::with_capacity(variable.len());
    let mut in_space = false;
    for c in variable.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("analysis_{name}.pdf")
}

fn generated_line(date: NaiveDate) -> String {
    format!("Generated on: {}", date.format("%B %-d, %Y"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

fn statistics_table(result: &StatisticsResult) -> ReportTable {
    match result {
        StatisticsResult::Numeric(stats) => ReportTable {
            caption: None,
            headers: vec!["Statistic".into(), "Value".into()],
            rows: stats
                .summary_rows()
                .iter()
                .map(|(label, value)| vec![label.to_string(), format_stat_value(*value)])
                .collect(),
        },
        StatisticsResult::Categorical(stats) => {
            let mut rows = vec![vec![
                "Unique values".to_string(),
                stats.distinct().to_string(),
                String::new(),
            ]];
            rows.extend(stats.shares().into_iter().map(|share| {
                vec![
                    share.category,
                    share.count.to_string(),
                    format_percentage(share.percentage),
                ]
            }));
            ReportTable {
                caption: None,
                headers: vec!["Category".into(), "Count".into(), "Percentage".into()],
                rows,
            }
        }
    }
}

pub fn descriptive_report(variable: &str, result: &StatisticsResult, date: NaiveDate) -> Report {
    let images: Vec<ReportImage> = result
        .charts()
        .into_iter()
        .map(|chart| ReportImage {
            title: chart.title.to_string(),
            png_base64: chart.png_base64.to_string(),
        })
        .collect();
    let sections = if images.is_empty() {
        Vec::new()
    } else {
        vec![ReportSection {
            title: "Visualizations".into(),
            images,
            ..Default::default()
        }]
    };

    Report {
        title: format!("Descriptive Analysis: {variable}"),
        title_size: 16.0,
        generated_on: date,
        primary_table: Some(statistics_table(result)),
        sections,
        footer: None,
        file_name: descriptive_file_name(variable),
    }
}

fn plot_images(result: &SurvivalResult) -> Vec<ReportImage> {
    result
        .plots()
        .into_iter()
        .map(|chart| ReportImage {
            title: chart.title.to_string(),
            png_base64: chart.png_base64.to_string(),
        })
        .collect()
}

fn kaplan_meier_table(result: &SurvivalResult) -> Option<ReportTable> {
    let km = result.kaplan_meier.as_ref()?;
    let rows: Vec<Vec<String>> = km
        .rows()
        .into_iter()
        .map(|row| {
            vec![
                format_fixed(Some(row.time), 2),
                format_fixed(row.survival, 4),
                format_fixed(row.lower, 4),
                format_fixed(row.upper, 4),
            ]
        })
        .collect();
    if rows.is_empty() {
        return None;
    }
    Some(ReportTable {
        caption: None,
        headers: vec![
            "Time".into(),
            "Survival Probability".into(),
            "Lower CI".into(),
            "Upper CI".into(),
        ],
        rows,
    })
}

/// Best-by-AIC, best-by-BIC and their agreement, shared by the survival and
/// estimation reports. `None` when the backend returned no candidates.
fn comparison_section(result: &SurvivalResult) -> Option<ReportSection> {
    if result.all_distributions_results.is_empty() {
        return None;
    }
    let comparison = DistributionComparison::from_fits(&result.all_distributions_results);
    let best = |fit: Option<&BestFit>, criterion: &str| match fit {
        Some(best) => format!("{} ({criterion}: {:.2})", best.distribution, best.value),
        None => NOT_AVAILABLE.to_string(),
    };
    let mut values = vec![
        LabeledValue::new("Best by AIC", best(comparison.best_aic.as_ref(), "AIC")),
        LabeledValue::new("Best by BIC", best(comparison.best_bic.as_ref(), "BIC")),
    ];
    let mut notes = vec![AIC_NOTE.to_string(), BIC_NOTE.to_string()];
    match comparison.agreement() {
        Some(Agreement::Consensus) => {
            let name = comparison
                .best_aic
                .as_ref()
                .map_or(NOT_AVAILABLE.to_string(), |b| b.distribution.clone());
            values.push(LabeledValue::new("Consensus", format!("{name} ({CONSENSUS_NOTE})")));
        }
        Some(Agreement::Disagreement) => {
            values.push(LabeledValue::new("Note", DISAGREEMENT_NOTE));
            notes.push(format!("Note: {LARGE_SAMPLE_NOTE}"));
        }
        None => {}
    }
    Some(ReportSection {
        title: "Statistical Analysis Final".into(),
        values,
        notes,
        ..Default::default()
    })
}

pub fn survival_report(result: &SurvivalResult, date: NaiveDate) -> Report {
    let comparison = DistributionComparison::from_fits(&result.all_distributions_results);
    let estimated = comparison
        .best_aic
        .as_ref()
        .map_or("Not available".to_string(), |best| best.distribution.clone());

    let mut summary = ReportSection {
        title: "Summary Results".into(),
        values: vec![LabeledValue::new("Estimated Distribution", estimated)],
        ..Default::default()
    };
    if let Some(median) = result.median_survival {
        summary
            .values
            .push(LabeledValue::new("Median Survival Time", format_stat_value(Some(median))));
    }

    let mut sections = vec![summary];
    sections.extend(comparison_section(result));
    if let Some(table) = kaplan_meier_table(result) {
        sections.push(ReportSection {
            title: "Kaplan-Meier Survival Estimates".into(),
            table: Some(table),
            ..Default::default()
        });
    }
    if let Some(text) = &result.interpretation {
        let notes = Interpretation::parse(text).plain_paragraphs();
        if !notes.is_empty() {
            sections.push(ReportSection {
                title: "Interpretation".into(),
                notes,
                ..Default::default()
            });
        }
    }
    let images = plot_images(result);
    if !images.is_empty() {
        sections.push(ReportSection {
            title: "Plots".into(),
            images,
            ..Default::default()
        });
    }

    Report {
        title: "Survival Analysis Report".into(),
        title_size: 18.0,
        generated_on: date,
        primary_table: None,
        sections,
        footer: Some(SURVIVAL_FOOTER.into()),
        file_name: SURVIVAL_REPORT_FILE.into(),
    }
}

/// Per-candidate AIC/BIC table, as the estimation panel shows it.
pub fn comparison_table(result: &SurvivalResult) -> ReportTable {
    ReportTable {
        caption: Some("Comparison of AIC and BIC Values".into()),
        headers: vec!["Distribution".into(), "AIC".into(), "BIC".into()],
        rows: result
            .all_distributions_results
            .iter()
            .map(|(name, fit)| vec![name.clone(), format_score(fit.aic), format_score(fit.bic)])
            .collect(),
    }
}

pub fn estimation_report(result: &SurvivalResult, date: NaiveDate) -> Report {
    let mut sections = Vec::new();

    sections.extend(comparison_section(result));

    let predicted = result.predicted_distribution.as_deref();
    let mut llm = vec![LabeledValue::new(
        "Best Distribution",
        predicted.unwrap_or(NOT_AVAILABLE),
    )];
    if result.params.is_some() {
        llm.push(LabeledValue::new(
            "Parameters",
            params_line(predicted, result.params.as_ref()),
        ));
    }
    llm.push(LabeledValue::new("AIC Score", format_fixed(result.aic, 2)));
    llm.push(LabeledValue::new("BIC Score", format_fixed(result.bic, 2)));
    sections.push(ReportSection {
        title: "Analysis Results From LLM".into(),
        values: llm,
        ..Default::default()
    });

    Report {
        title: "Survival Analysis Report".into(),
        title_size: 18.0,
        generated_on: date,
        primary_table: Some(comparison_table(result)),
        sections,
        footer: Some(ESTIMATION_FOOTER.into()),
        file_name: SURVIVAL_REPORT_FILE.into(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

const SECTION_TITLE_PT: f32 = 14.0;
const IMAGE_TITLE_PT: f32 = 12.0;

impl Report {
    /// Lay the report out and serialize it. Charts that fail to decode are
    /// logged and left out.
    pub fn to_pdf(&self, config: &ReportConfig) -> Result<Vec<u8>, ReportError> {
        let mut images = Vec::new();
        let mut layout = PageLayout::new(config);

        layout.centered_line(&self.title, self.title_size, FontStyle::Bold, 0.0);
        layout.centered_line(
            &generated_line(self.generated_on),
            10.0,
            FontStyle::Regular,
            0.4,
        );
        layout.advance(6.0);

        if let Some(table) = &self.primary_table {
            render_table(&mut layout, table);
            layout.advance(8.0);
        }

        for section in &self.sections {
            let title_height = line_height(SECTION_TITLE_PT);
            layout.ensure(title_height * 2.0);
            layout.line(&section.title, SECTION_TITLE_PT, FontStyle::Bold);
            layout.advance(2.0);

            for value in &section.values {
                layout.ensure(line_height(10.0) + line_height(12.0));
                layout.indented_line(&value.label, 10.0, FontStyle::Italic);
                layout.indented_line(&value.value, 12.0, FontStyle::Bold);
                layout.advance(2.0);
            }
            if let Some(table) = &section.table {
                render_table(&mut layout, table);
                layout.advance(4.0);
            }
            for note in &section.notes {
                layout.wrapped(note, 9.0, FontStyle::Regular);
                layout.advance(2.0);
            }
            for chart in &section.images {
                let decoded = match decode_png_base64(&chart.png_base64) {
                    Ok(decoded) => decoded,
                    Err(err) => {
                        tracing::warn!(chart = %chart.title, error = %err, "skipping report image");
                        continue;
                    }
                };
                let reserve = line_height(IMAGE_TITLE_PT);
                let aspect = decoded.aspect();
                let height = (config.image_width_mm * aspect).min(
                    config.page_height_mm
                        - config.margin_top_mm
                        - config.margin_bottom_mm
                        - reserve,
                );
                layout.ensure(reserve + height);
                layout.line(&chart.title, IMAGE_TITLE_PT, FontStyle::Bold);
                layout.image(images.len(), aspect, reserve);
                images.push(decoded);
                layout.advance(6.0);
            }
            layout.advance(4.0);
        }

        if let Some(footer) = &self.footer {
            layout.advance(4.0);
            layout.centered_line(footer, 10.0, FontStyle::Regular, 0.6);
        }

        let pages = layout.finish();
        tracing::debug!(
            file = %self.file_name,
            pages = pages.len(),
            images = images.len(),
            "report laid out"
        );
        pdf::render(&pages, &images, config)
    }
}

fn render_table(layout: &mut PageLayout<'_>, table: &ReportTable) {
    if let Some(caption) = &table.caption {
        layout.ensure(line_height(SECTION_TITLE_PT) + 14.0);
        layout.line(caption, SECTION_TITLE_PT, FontStyle::Bold);
        layout.advance(2.0);
    }
    layout.table(table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_types::{
        CategoricalStatistics, DistributionFit, FittedParams, KaplanMeier, NumericStatistics,
    };
    use lopdf::Document;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn fit(aic: f64, bic: f64) -> DistributionFit {
        DistributionFit {
            aic: Some(aic),
            bic: Some(bic),
            ..Default::default()
        }
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn file_names() {
        assert_eq!(descriptive_file_name("age"), "analysis_age.pdf");
        assert_eq!(descriptive_file_name("time to  event"), "analysis_time_to_event.pdf");
        assert_eq!(descriptive_file_name(" x "), "analysis__x_.pdf");
    }

    #[test]
    fn generated_line_uses_long_month() {
        assert_eq!(generated_line(date()), "Generated on: March 7, 2025");
    }

    #[test]
    fn descriptive_numeric_report() {
        let result = StatisticsResult::Numeric(NumericStatistics {
            mean: Some(2.5),
            boxplot: Some(image::test_png_base64(40, 20)),
            ..Default::default()
        });
        let report = descriptive_report("age", &result, date());
        assert_eq!(report.title, "Descriptive Analysis: age");
        let table = report.primary_table.as_ref().unwrap();
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.rows[0], vec!["Mean".to_string(), "2.5".to_string()]);
        assert_eq!(table.rows[1][1], "N/A");
        assert_eq!(report.sections[0].images[0].title, "Boxplot");

        let bytes = report.to_pdf(&ReportConfig::default()).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn descriptive_categorical_report() {
        let result = StatisticsResult::Categorical(CategoricalStatistics {
            category_count: vec![("a".into(), 1), ("b".into(), 3)],
            ..Default::default()
        });
        let report = descriptive_report("group", &result, date());
        let table = report.primary_table.unwrap();
        assert_eq!(table.rows[0][1], "2");
        assert_eq!(table.rows[2], vec!["b".to_string(), "3".to_string(), "75.0%".to_string()]);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn estimation_report_flags_disagreement() {
        let result = SurvivalResult {
            all_distributions_results: vec![("A".into(), fit(10.0, 20.0)), ("B".into(), fit(5.0, 25.0))],
            predicted_distribution: Some("weibull".into()),
            params: Some(FittedParams::Positional(vec![Some(1.2), Some(3.0)])),
            aic: Some(123.456),
            ..Default::default()
        };
        let report = estimation_report(&result, date());
        let table = report.primary_table.as_ref().unwrap();
        assert_eq!(table.rows[0], vec!["A".to_string(), "10.0000".into(), "20.0000".into()]);

        let final_section = &report.sections[0];
        assert_eq!(final_section.values[0].value, "B (AIC: 5.00)");
        assert_eq!(final_section.values[1].value, "A (BIC: 20.00)");
        assert_eq!(final_section.values[2].value, DISAGREEMENT_NOTE);
        assert_eq!(final_section.notes.len(), 3);

        let llm = &report.sections[1];
        assert_eq!(llm.values[1].value, "shape = 1.2000, scale = 3.0000");
        assert_eq!(llm.values[2].value, "123.46");
        assert_eq!(llm.values[3].value, "N/A");
        assert_eq!(report.file_name, SURVIVAL_REPORT_FILE);
        assert_eq!(report.footer.as_deref(), Some("End of Report"));
    }

    #[test]
    fn survival_report_sections() {
        let result = SurvivalResult {
            all_distributions_results: vec![("weibull".into(), fit(3.0, 4.0))],
            median_survival: Some(12.0),
            kaplan_meier: Some(KaplanMeier {
                timeline: vec![0.0, 1.5],
                survival_function: vec![Some(1.0), Some(0.8)],
                confidence_interval: vec![Some(1.0), Some(1.0), Some(0.61234), None],
            }),
            interpretation: Some("**Weibull** fits \\(k>1\\) well.".into()),
            hazard_plot: Some("not-an-image".into()),
            ..Default::default()
        };
        let report = survival_report(&result, date());
        let titles: Vec<_> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Summary Results",
                "Statistical Analysis Final",
                "Kaplan-Meier Survival Estimates",
                "Interpretation",
                "Plots"
            ]
        );
        assert_eq!(report.sections[0].values[0].value, "weibull");
        assert_eq!(report.sections[0].values[1].value, "12");
        assert_eq!(
            report.sections[1].values[2].value,
            format!("weibull ({CONSENSUS_NOTE})")
        );
        let km = report.sections[2].table.as_ref().unwrap();
        assert_eq!(km.rows[1], vec!["1.50".to_string(), "0.8000".into(), "0.6123".into(), "N/A".into()]);
        assert_eq!(report.sections[3].notes, ["Weibull fits  well."]);

        // The undecodable plot is skipped, the rest still renders.
        let bytes = report.to_pdf(&ReportConfig::default()).unwrap();
        assert!(page_count(&bytes) >= 1);
    }

    #[test]
    fn survival_report_flags_disagreement() {
        let result = SurvivalResult {
            all_distributions_results: vec![("A".into(), fit(10.0, 20.0)), ("B".into(), fit(5.0, 25.0))],
            ..Default::default()
        };
        let report = survival_report(&result, date());
        assert_eq!(report.sections[0].values[0].value, "B");

        let final_section = &report.sections[1];
        assert_eq!(final_section.title, "Statistical Analysis Final");
        let values: Vec<_> = final_section
            .values
            .iter()
            .map(|v| (v.label.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(
            values,
            [
                ("Best by AIC", "B (AIC: 5.00)"),
                ("Best by BIC", "A (BIC: 20.00)"),
                ("Note", DISAGREEMENT_NOTE),
            ]
        );
        assert!(final_section.notes.iter().any(|n| n.contains(LARGE_SAMPLE_NOTE)));
    }

    #[test]
    fn survival_report_without_candidates_has_no_comparison() {
        let report = survival_report(&SurvivalResult::default(), date());
        assert!(report.sections.iter().all(|s| s.title != "Statistical Analysis Final"));
    }

    #[test]
    fn long_kaplan_meier_table_paginates() {
        let n = 120;
        let result = SurvivalResult {
            kaplan_meier: Some(KaplanMeier {
                timeline: (0..n).map(f64::from).collect(),
                survival_function: vec![Some(0.5); n as usize],
                confidence_interval: vec![Some(0.4); 2 * n as usize],
            }),
            ..Default::default()
        };
        let bytes = survival_report(&result, date())
            .to_pdf(&ReportConfig::default())
            .unwrap();
        assert!(page_count(&bytes) >= 4);
    }
}
