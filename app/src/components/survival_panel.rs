//! Survival analysis panel, plus the request plumbing it shares with the
//! estimation panel.

use dioxus::prelude::*;

use dino_core::panels::{AnalysisView, ToggleOutcome};
use dino_core::report::survival_report;
use dino_core::{StatsClient, Variable, Workspace};
use dino_types::{AppConfig, SurvivalResult};

use super::analysis_view::{
    ChartGallery, ComparisonVerdict, ErrorView, InterpretationView, KaplanMeierTable, LoadingView,
    SurvivalSummary, survival_plots,
};
use super::toast::{ToastManager, ToastSeverity, use_toast};
use super::variable_list::{VariableItem, VariableList};
use crate::api::use_client;
use crate::utils::{PDF_MIME, download_bytes, today};

/// The two panels that post to the survival endpoint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FitPanel {
    Survival,
    Estimation,
}

/// Act on a toggle outcome: send the request, or explain the refusal.
pub fn dispatch_toggle(
    outcome: ToggleOutcome,
    panel: FitPanel,
    mut workspace: Signal<Workspace>,
    client: StatsClient,
    mut toast: ToastManager,
    mut epoch: Signal<u64>,
) {
    match outcome {
        ToggleOutcome::Rejected(warning) => {
            toast.show("Warning", warning.to_string(), ToastSeverity::Warning);
            epoch += 1;
        }
        ToggleOutcome::Cleared => {}
        ToggleOutcome::Request(request) => {
            spawn(async move {
                let result = client.survival(&request.payload).await;
                let mut ws = workspace.write();
                match panel {
                    FitPanel::Survival => ws.survival.complete(request.token, result),
                    FitPanel::Estimation => ws.estimation.complete(request.token, result),
                };
            });
        }
    }
}

pub fn report_download(
    config: &AppConfig,
    report: dino_core::Report,
    mut toast: ToastManager,
) {
    let outcome = report
        .to_pdf(&config.report)
        .map_err(|e| e.to_string())
        .and_then(|bytes| download_bytes(&report.file_name, PDF_MIME, &bytes));
    if let Err(err) = outcome {
        tracing::error!(error = %err, file = %report.file_name, "report failed");
        toast.show("Error", format!("Failed to create PDF: {err}"), ToastSeverity::Error);
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SurvivalAnalysisProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn SurvivalAnalysis(props: SurvivalAnalysisProps) -> Element {
    let mut workspace = props.workspace;
    let client = use_client();
    let toast = use_toast();
    let epoch = use_signal(|| 0u64);

    let retry_client = client.clone();
    let on_toggle = move |(variable, checked): (Variable, bool)| {
        let outcome = {
            let mut guard = workspace.write();
            let ws = &mut *guard;
            ws.survival.toggle(&ws.grid, &variable.name, checked)
        };
        dispatch_toggle(outcome, FitPanel::Survival, workspace, client.clone(), toast, epoch);
    };
    let on_retry = move |_: ()| {
        let outcome = {
            let mut guard = workspace.write();
            let ws = &mut *guard;
            ws.survival.retry(&ws.grid)
        };
        dispatch_toggle(outcome, FitPanel::Survival, workspace, retry_client.clone(), toast, epoch);
    };

    let ws = workspace.read();
    let items: Vec<VariableItem> = ws
        .survival
        .variables()
        .iter()
        .map(|variable| VariableItem {
            variable: variable.clone(),
            checked: ws.survival.is_selected(&variable.name),
            pending: false,
        })
        .collect();
    let view = ws.survival.view().clone();

    rsx! {
        div { class: "panel survival-panel",
            h2 { "Survival Analysis" }
            VariableList { items, epoch: epoch(), on_toggle }
            match view {
                AnalysisView::Idle => rsx! {},
                AnalysisView::Loading(_) => rsx! { LoadingView {} },
                AnalysisView::Failed(message) => rsx! { ErrorView { message, on_retry } },
                AnalysisView::Ready(result) => rsx! { SurvivalResultView { result: *result } },
            }
        }
    }
}

#[component]
fn SurvivalResultView(result: SurvivalResult) -> Element {
    let config = use_context::<AppConfig>();
    let toast = use_toast();
    let plots = survival_plots(&result);
    let report_result = result.clone();

    rsx! {
        div { class: "survival-results",
            div { class: "results-header",
                h2 { "Survival Analysis Results" }
                button {
                    class: "btn",
                    onclick: move |_| report_download(&config, survival_report(&report_result, today()), toast),
                    "Download Report"
                }
            }
            SurvivalSummary { result: result.clone() }
            ComparisonVerdict { result: result.clone() }
            KaplanMeierTable { result: result.clone() }
            if let Some(text) = result.interpretation.clone() {
                InterpretationView { text }
            }
            if !plots.is_empty() {
                ChartGallery { charts: plots }
            }
        }
    }
}
