//! Distribution estimation panel.

use dioxus::prelude::*;

use dino_core::panels::AnalysisView;
use dino_core::report::estimation_report;
use dino_core::{Variable, Workspace};
use dino_types::{AppConfig, SurvivalResult};

use super::analysis_view::{DistributionComparisonView, ErrorView, LoadingView};
use super::survival_panel::{FitPanel, dispatch_toggle, report_download};
use super::toast::use_toast;
use super::variable_list::{VariableItem, VariableList};
use crate::api::use_client;
use crate::utils::today;

#[derive(Props, Clone, PartialEq)]
pub struct EstimationAnalysisProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn EstimationAnalysis(props: EstimationAnalysisProps) -> Element {
    let mut workspace = props.workspace;
    let client = use_client();
    let toast = use_toast();
    let epoch = use_signal(|| 0u64);

    let retry_client = client.clone();
    let on_toggle = move |(variable, checked): (Variable, bool)| {
        let outcome = {
            let mut guard = workspace.write();
            let ws = &mut *guard;
            ws.estimation.toggle(&ws.grid, &variable.name, checked)
        };
        dispatch_toggle(outcome, FitPanel::Estimation, workspace, client.clone(), toast, epoch);
    };
    let on_retry = move |_: ()| {
        let outcome = {
            let mut guard = workspace.write();
            let ws = &mut *guard;
            ws.estimation.retry(&ws.grid)
        };
        dispatch_toggle(outcome, FitPanel::Estimation, workspace, retry_client.clone(), toast, epoch);
    };

    let ws = workspace.read();
    let items: Vec<VariableItem> = ws
        .estimation
        .variables()
        .iter()
        .map(|variable| VariableItem {
            variable: variable.clone(),
            checked: ws.estimation.is_selected(&variable.name),
            pending: false,
        })
        .collect();
    let view = ws.estimation.view().clone();

    rsx! {
        div { class: "panel estimation-panel",
            h2 { "Distribution Estimation" }
            VariableList { items, epoch: epoch(), on_toggle }
            match view {
                AnalysisView::Idle => rsx! {},
                AnalysisView::Loading(_) => rsx! { LoadingView {} },
                AnalysisView::Failed(message) => rsx! { ErrorView { message, on_retry } },
                AnalysisView::Ready(result) => rsx! { EstimationResultView { result: *result } },
            }
        }
    }
}

#[component]
fn EstimationResultView(result: SurvivalResult) -> Element {
    let config = use_context::<AppConfig>();
    let toast = use_toast();
    let report_result = result.clone();

    rsx! {
        div { class: "estimation-results",
            div { class: "results-header",
                h2 { "Estimation Results" }
                button {
                    class: "btn",
                    onclick: move |_| report_download(&config, estimation_report(&report_result, today()), toast),
                    "Download Report"
                }
            }
            DistributionComparisonView { result }
        }
    }
}
