//! Descriptive statistics: one block per checked variable.

use dioxus::prelude::*;

use dino_core::panels::{CheckOutcome, StatisticsBlock, VariableStatus};
use dino_core::report::descriptive_report;
use dino_core::workbook::{statistics_file_name, statistics_workbook};
use dino_core::{Completion, Variable, Workspace};
use dino_types::AppConfig;

use super::analysis_view::{ChartGallery, ChartImage, StatisticsTable};
use super::toast::{ToastSeverity, use_toast};
use super::variable_list::{VariableItem, VariableList};
use crate::api::use_client;
use crate::utils::{PDF_MIME, XLSX_MIME, download_bytes, today};

#[derive(Props, Clone, PartialEq)]
pub struct DescriptiveAnalysisProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn DescriptiveAnalysis(props: DescriptiveAnalysisProps) -> Element {
    let mut workspace = props.workspace;
    let client = use_client();
    let mut toast = use_toast();
    let mut epoch = use_signal(|| 0u64);

    let on_toggle = move |(variable, checked): (Variable, bool)| {
        if !checked {
            workspace.write().descriptive.uncheck(&variable.name);
            return;
        }
        let outcome = {
            let mut guard = workspace.write();
            let ws = &mut *guard;
            ws.descriptive.check(&ws.grid, &variable)
        };
        match outcome {
            CheckOutcome::Rejected(warning) => {
                toast.show("Warning", warning.to_string(), ToastSeverity::Warning);
                epoch += 1;
            }
            CheckOutcome::Request(request) => {
                let client = client.clone();
                spawn(async move {
                    let result = client.statistics(&request.payload).await;
                    let done = workspace.write().descriptive.complete(request.token, result);
                    if let Completion::Failed(message) = done {
                        toast.show("Error", message, ToastSeverity::Error);
                    }
                });
            }
        }
    };

    let ws = workspace.read();
    let items: Vec<VariableItem> = ws
        .descriptive
        .variables()
        .iter()
        .map(|variable| {
            let status = ws.descriptive.status(&variable.name);
            VariableItem {
                variable: variable.clone(),
                checked: status != VariableStatus::Unchecked,
                pending: status == VariableStatus::Pending,
            }
        })
        .collect();
    let blocks = ws.descriptive.blocks().to_vec();

    rsx! {
        div { class: "panel descriptive-panel",
            h2 { "Descriptive Statistics" }
            VariableList { items, epoch: epoch(), on_toggle }
            div { class: "statistics-blocks",
                for block in blocks {
                    StatisticsBlockView {
                        key: "{block.variable}",
                        block: block.clone(),
                        on_close: move |name: String| {
                            workspace.write().descriptive.uncheck(&name);
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn StatisticsBlockView(block: StatisticsBlock, on_close: EventHandler<String>) -> Element {
    let config = use_context::<AppConfig>();
    let mut toast = use_toast();

    let charts: Vec<ChartImage> = block
        .result
        .charts()
        .into_iter()
        .map(|chart| ChartImage {
            title: chart.title.to_string(),
            png_base64: chart.png_base64.to_string(),
        })
        .collect();

    let pdf_block = block.clone();
    let on_pdf = move |_: MouseEvent| {
        let report = descriptive_report(&pdf_block.variable, &pdf_block.result, today());
        let outcome = report
            .to_pdf(&config.report)
            .map_err(|e| e.to_string())
            .and_then(|bytes| download_bytes(&report.file_name, PDF_MIME, &bytes));
        if let Err(err) = outcome {
            tracing::error!(error = %err, "descriptive report failed");
            toast.show("Error", format!("Failed to create PDF: {err}"), ToastSeverity::Error);
        }
    };

    let xlsx_block = block.clone();
    let on_excel = move |_: MouseEvent| {
        let outcome = statistics_workbook(&xlsx_block.result)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                download_bytes(&statistics_file_name(&xlsx_block.variable), XLSX_MIME, &bytes)
            });
        if let Err(err) = outcome {
            tracing::error!(error = %err, "statistics export failed");
            toast.show("Error", format!("Failed to export: {err}"), ToastSeverity::Error);
        }
    };

    let name = block.variable.clone();
    rsx! {
        div { class: "statistics-block",
            div { class: "block-header",
                h3 { "{block.variable}" }
                div { class: "block-actions",
                    button { class: "btn btn-sm", onclick: on_pdf, "Download PDF" }
                    button { class: "btn btn-sm", onclick: on_excel, "Export Excel" }
                    button {
                        class: "btn btn-close",
                        onclick: move |_| on_close.call(name.clone()),
                        "X"
                    }
                }
            }
            StatisticsTable { result: block.result.clone() }
            if !charts.is_empty() {
                ChartGallery { charts }
            }
        }
    }
}
