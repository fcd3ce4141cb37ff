//! Result rendering shared by the analysis panels.

use dioxus::prelude::*;

use dino_core::comparison::{
    AIC_NOTE, Agreement, BIC_NOTE, BestFit, CONSENSUS_NOTE, DISAGREEMENT_NOTE, DistributionComparison,
    LARGE_SAMPLE_NOTE, params_line,
};
use dino_core::interpretation::{Inline, Interpretation, SpanStyle};
use dino_core::report::comparison_table;
use dino_types::formatting::{NOT_AVAILABLE, format_fixed, format_percentage, format_stat_value};
use dino_types::{StatisticsResult, SurvivalResult};

fn image_src(png_base64: &str) -> String {
    if png_base64.starts_with("data:") {
        png_base64.to_string()
    } else {
        format!("data:image/png;base64,{png_base64}")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptive
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn StatisticsTable(result: StatisticsResult) -> Element {
    match &result {
        StatisticsResult::Numeric(stats) => rsx! {
            table { class: "stats-table",
                thead {
                    tr { th { "Statistic" } th { "Value" } }
                }
                tbody {
                    for (label , value) in stats.summary_rows() {
                        tr { key: "{label}",
                            td { "{label}" }
                            td { "{format_stat_value(value)}" }
                        }
                    }
                }
            }
        },
        StatisticsResult::Categorical(stats) => rsx! {
            p { class: "stat-line",
                strong { "Unique values: " }
                "{stats.distinct()}"
            }
            table { class: "stats-table",
                thead {
                    tr { th { "Category" } th { "Count" } th { "Percentage" } }
                }
                tbody {
                    for share in stats.shares() {
                        tr { key: "{share.category}",
                            td { "{share.category}" }
                            td { "{share.count}" }
                            td { "{format_percentage(share.percentage)}" }
                        }
                    }
                }
            }
        },
    }
}

#[derive(Clone, PartialEq)]
pub struct ChartImage {
    pub title: String,
    pub png_base64: String,
}

#[component]
pub fn ChartGallery(charts: Vec<ChartImage>) -> Element {
    rsx! {
        div { class: "visualizations",
            for chart in charts.iter() {
                div { key: "{chart.title}", class: "visualization-item",
                    h4 { "{chart.title}" }
                    img { src: image_src(&chart.png_base64), alt: "{chart.title}" }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Survival / estimation
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn SurvivalSummary(result: SurvivalResult) -> Element {
    let comparison = DistributionComparison::from_fits(&result.all_distributions_results);
    let estimated = comparison
        .best_aic
        .as_ref()
        .map_or("Not available".to_string(), |b| b.distribution.clone());

    rsx! {
        div { class: "summary-cards",
            div { class: "card",
                h3 { "Distribution" }
                p {
                    span { class: "card-label", "Estimated Distribution: " }
                    span { class: "card-value", "{estimated}" }
                }
            }
            if let Some(median) = result.median_survival {
                div { class: "card",
                    h3 { "Median Survival" }
                    p {
                        span { class: "card-label", "Time: " }
                        span { class: "card-value", "{format_stat_value(Some(median))}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn KaplanMeierTable(result: SurvivalResult) -> Element {
    let Some(km) = result.kaplan_meier.as_ref() else {
        return rsx! {};
    };
    let rows = km.rows();

    rsx! {
        h3 { "Kaplan-Meier Survival Estimates" }
        div { class: "table-scroll",
            table { class: "km-table",
                thead {
                    tr {
                        th { "Time" }
                        th { "Survival Probability" }
                        th { "Lower CI" }
                        th { "Upper CI" }
                    }
                }
                tbody {
                    for (i , row) in rows.iter().enumerate() {
                        tr { key: "{i}",
                            td { "{format_fixed(Some(row.time), 2)}" }
                            td { "{format_fixed(row.survival, 4)}" }
                            td { "{format_fixed(row.lower, 4)}" }
                            td { "{format_fixed(row.upper, 4)}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn InterpretationView(text: String) -> Element {
    let parsed = Interpretation::parse(&text);
    if parsed.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "interpretation",
            h3 { "Interpretation" }
            for (i , paragraph) in parsed.paragraphs.iter().enumerate() {
                p { key: "{i}",
                    for (j , inline) in paragraph.inlines.iter().enumerate() {
                        match inline {
                            Inline::LineBreak => rsx! { br { key: "{j}" } },
                            Inline::Span { text, style: SpanStyle::Strong } => rsx! { strong { key: "{j}", "{text}" } },
                            Inline::Span { text, style: SpanStyle::Emphasis } => rsx! { em { key: "{j}", "{text}" } },
                            Inline::Span { text, style: SpanStyle::Plain } => rsx! { span { key: "{j}", "{text}" } },
                        }
                    }
                }
            }
        }
    }
}

pub fn survival_plots(result: &SurvivalResult) -> Vec<ChartImage> {
    result
        .plots()
        .into_iter()
        .map(|chart| ChartImage {
            title: chart.title.to_string(),
            png_base64: chart.png_base64.to_string(),
        })
        .collect()
}

/// Best by AIC, best by BIC and whether they agree.
#[component]
pub fn ComparisonVerdict(result: SurvivalResult) -> Element {
    let comparison = DistributionComparison::from_fits(&result.all_distributions_results);
    if comparison.best_aic.is_none() && comparison.best_bic.is_none() {
        return rsx! {};
    }
    let agreement = comparison.agreement();
    let best = |fit: Option<&BestFit>| {
        fit.map_or((NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()), |b| {
            (b.distribution.clone(), format!("{:.2}", b.value))
        })
    };
    let (aic_name, aic_value) = best(comparison.best_aic.as_ref());
    let (bic_name, bic_value) = best(comparison.best_bic.as_ref());

    rsx! {
        div { class: "section",
            h3 { "Statistical Analysis Final" }
            div { class: "summary-cards",
                div { class: "card",
                    div { class: "card-label", "Best by AIC" }
                    div { class: "card-value", "{aic_name}" }
                    div { class: "card-detail", "AIC: {aic_value}" }
                }
                div { class: "card",
                    div { class: "card-label", "Best by BIC" }
                    div { class: "card-value", "{bic_name}" }
                    div { class: "card-detail", "BIC: {bic_value}" }
                }
                match agreement {
                    Some(Agreement::Consensus) => rsx! {
                        div { class: "card card-consensus",
                            div { class: "card-label", "Consensus" }
                            div { class: "card-value", "{aic_name}" }
                            div { class: "card-detail", "{CONSENSUS_NOTE}" }
                        }
                    },
                    Some(Agreement::Disagreement) => rsx! {
                        div { class: "card card-note",
                            div { class: "card-label", "Note" }
                            div { class: "card-value", "{DISAGREEMENT_NOTE}" }
                        }
                    },
                    None => rsx! {},
                }
            }
            p { class: "note", "{AIC_NOTE}" }
            p { class: "note", "{BIC_NOTE}" }
            if agreement == Some(Agreement::Disagreement) {
                p { class: "note note-warning", strong { "Note: " } "{LARGE_SAMPLE_NOTE}" }
            }
        }
    }
}

#[component]
pub fn DistributionComparisonView(result: SurvivalResult) -> Element {
    let table = comparison_table(&result);

    rsx! {
        if !table.rows.is_empty() {
            div { class: "section",
                h3 { "Comparison of AIC and BIC Values" }
                table { class: "distributions-table",
                    thead {
                        tr {
                            for header in table.headers.iter() {
                                th { key: "{header}", "{header}" }
                            }
                        }
                    }
                    tbody {
                        for row in table.rows.iter() {
                            tr { key: "{row[0]}",
                                for (i , cell) in row.iter().enumerate() {
                                    td { key: "{i}", "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
        }
        ComparisonVerdict { result: result.clone() }
        div { class: "section",
            h3 { "Analysis Results From LLM" }
            div { class: "summary-cards",
                div { class: "card",
                    div { class: "card-label", "Best Distribution" }
                    div { class: "card-value",
                        {result.predicted_distribution.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())}
                    }
                }
                if result.params.is_some() {
                    div { class: "card",
                        div { class: "card-label", "Parameters" }
                        div { class: "card-value",
                            {params_line(result.predicted_distribution.as_deref(), result.params.as_ref())}
                        }
                    }
                }
                div { class: "card",
                    div { class: "card-label", "AIC Score" }
                    div { class: "card-value", "{format_fixed(result.aic, 2)}" }
                }
                div { class: "card",
                    div { class: "card-label", "BIC Score" }
                    div { class: "card-value", "{format_fixed(result.bic, 2)}" }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / error
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn LoadingView() -> Element {
    rsx! {
        div { class: "loading",
            div { class: "spinner" }
            p { "Analyzing..." }
        }
    }
}

#[component]
pub fn ErrorView(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "analysis-error",
            p { class: "error-message", "{message}" }
            button { class: "btn", onclick: move |_| on_retry.call(()), "Try Again" }
        }
    }
}
