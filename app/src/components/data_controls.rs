//! Import, export and clear buttons above the grid.

use dioxus::prelude::*;

use dino_core::Workspace;
use dino_core::data_ops::{
    self, ALREADY_EMPTY, ClearCheck, EXPORTED, ExportOutcome, IMPORT_FAILED, NOTHING_TO_EXPORT,
};

use super::confirm_dialog::{ConfirmAction, use_confirm};
use super::toast::{ToastSeverity, use_toast};
use crate::utils::{XLSX_MIME, download_bytes, read_file, take_selected_file};

const FILE_INPUT_ID: &str = "import-file";

#[derive(Props, Clone, PartialEq)]
pub struct DataControlsProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn DataControls(props: DataControlsProps) -> Element {
    let mut workspace = props.workspace;
    let mut toast = use_toast();
    let mut confirm = use_confirm();

    let on_import = move |_: Event<FormData>| {
        let file = match take_selected_file(FILE_INPUT_ID) {
            Ok(Some(file)) => file,
            Ok(None) => return,
            Err(err) => {
                tracing::error!(error = %err, "file input unavailable");
                toast.notice(IMPORT_FAILED, ToastSeverity::Error);
                return;
            }
        };
        let name = file.name();
        let processing = toast.show_persistent(
            "Processing File...",
            data_ops::importing_message(&name),
            ToastSeverity::Info,
        );

        spawn(async move {
            let result = match read_file(&file).await {
                Ok(bytes) => workspace.write().import(&bytes).map_err(|e| e.to_string()),
                Err(err) => Err(err),
            };
            toast.dismiss(processing);

            match result {
                Ok(()) => {
                    tracing::info!(file = %name, "workbook imported");
                    toast.show(
                        "Import Successful!",
                        data_ops::imported_message(&name),
                        ToastSeverity::Success,
                    );
                }
                Err(err) => {
                    tracing::error!(file = %name, error = %err, "import failed");
                    toast.notice(IMPORT_FAILED, ToastSeverity::Error);
                }
            }
        });
    };

    let on_export = move |_: MouseEvent| {
        let outcome = data_ops::export_grid(&workspace.read().grid);
        match outcome {
            Ok(ExportOutcome::NothingToExport) => {
                toast.notice(NOTHING_TO_EXPORT, ToastSeverity::Warning);
            }
            Ok(ExportOutcome::Ready { file_name, bytes }) => {
                match download_bytes(file_name, XLSX_MIME, &bytes) {
                    Ok(()) => toast.notice(EXPORTED, ToastSeverity::Success),
                    Err(err) => {
                        tracing::error!(error = %err, "download failed");
                        toast.show("Error!", err, ToastSeverity::Error);
                    }
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                toast.show("Error!", err.to_string(), ToastSeverity::Error);
            }
        }
    };

    let on_clear = move |_: MouseEvent| {
        let check = data_ops::check_clear(&workspace.read().grid);
        match check {
            ClearCheck::AlreadyEmpty => toast.notice(ALREADY_EMPTY, ToastSeverity::Info),
            ClearCheck::ConfirmationRequired => confirm.ask(ConfirmAction::ClearGrid),
        }
    };

    rsx! {
        div { class: "data-controls",
            label { class: "btn", r#for: FILE_INPUT_ID, "Import" }
            input {
                id: FILE_INPUT_ID,
                r#type: "file",
                accept: ".xlsx,.xls,.ods",
                class: "hidden-input",
                onchange: on_import,
            }
            button { class: "btn", onclick: on_export, "Export" }
            button { class: "btn btn-danger", onclick: on_clear, "Clear" }
        }
    }
}
