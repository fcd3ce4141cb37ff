//! Dino statistics workbench, browser front end.

mod api;
mod components;
mod utils;

use dioxus::prelude::*;
use tracing::Level;

use dino_core::{PanelKind, Workspace};
use dino_types::AppConfig;

use components::{
    ChatPanel, ConfirmDialog, DataControls, DescriptiveAnalysis, EstimationAnalysis, GridView,
    SurvivalAnalysis, ToastFrame, use_confirm_provider, use_toast_provider,
};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_SOURCE: &str = include_str!("../assets/dino.toml");

fn load_config() -> (AppConfig, Option<String>) {
    match dino_core::config::load_from_str(CONFIG_SOURCE) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err.to_string())),
    }
}

fn main() {
    let (config, config_error) = load_config();
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    if let Err(err) = dioxus_logger::init(level) {
        web_sys::console::error_1(&format!("logger init failed: {err}").into());
    }
    if let Some(err) = config_error {
        tracing::error!(error = %err, "bundled config invalid, using defaults");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(|| load_config().0);
    use_toast_provider();
    use_confirm_provider();
    api::use_client_provider(&config);

    let mut workspace = use_signal(|| Workspace::new(&config));
    let active = workspace.read().active();

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        div { class: "app",
            header { class: "app-header",
                h1 { "Dino Statistics" }
                nav { class: "panel-tabs",
                    for kind in PanelKind::ALL {
                        button {
                            key: "{kind.label()}",
                            class: if kind == active { "tab active" } else { "tab" },
                            onclick: move |_| workspace.write().show(kind),
                            "{kind.label()}"
                        }
                    }
                }
            }
            main { class: "workbench",
                section { class: "data-section",
                    DataControls { workspace }
                    GridView { workspace }
                }
                section { class: "panel-section",
                    match active {
                        PanelKind::Descriptive => rsx! { DescriptiveAnalysis { workspace } },
                        PanelKind::Survival => rsx! { SurvivalAnalysis { workspace } },
                        PanelKind::Estimation => rsx! { EstimationAnalysis { workspace } },
                        PanelKind::Chat => rsx! { ChatPanel { workspace } },
                    }
                }
            }
            ConfirmDialog { workspace }
            ToastFrame {}
        }
    }
}
