//! Confirmation modal for destructive actions.

use dioxus::prelude::*;

use dino_core::Workspace;
use dino_core::data_ops::{CHAT_CLEARED, CLEARED, CONFIRM_CLEAR, CONFIRM_CLEAR_CHAT, Notice};

use super::toast::{ToastSeverity, use_toast};

/// Actions that ask before running.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfirmAction {
    ClearGrid,
    ClearChat,
}

impl ConfirmAction {
    fn prompt(self) -> Notice {
        match self {
            ConfirmAction::ClearGrid => CONFIRM_CLEAR,
            ConfirmAction::ClearChat => CONFIRM_CLEAR_CHAT,
        }
    }

    fn confirm_label(self) -> &'static str {
        match self {
            ConfirmAction::ClearGrid => "Yes, clear it!",
            ConfirmAction::ClearChat => "Yes, delete it!",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ConfirmManager {
    pending: Signal<Option<ConfirmAction>>,
}

impl ConfirmManager {
    pub fn new() -> Self {
        Self {
            pending: Signal::new(None),
        }
    }

    pub fn ask(&mut self, action: ConfirmAction) {
        self.pending.set(Some(action));
    }

    pub fn close(&mut self) {
        self.pending.set(None);
    }
}

impl Default for ConfirmManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_confirm_provider() -> ConfirmManager {
    use_context_provider(ConfirmManager::new)
}

pub fn use_confirm() -> ConfirmManager {
    use_context::<ConfirmManager>()
}

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDialogProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn ConfirmDialog(props: ConfirmDialogProps) -> Element {
    let mut workspace = props.workspace;
    let mut manager = use_confirm();
    let mut toast = use_toast();

    let Some(action) = *manager.pending.read() else {
        return rsx! {};
    };
    let prompt = action.prompt();

    let on_confirm = move |_: MouseEvent| {
        manager.close();
        match action {
            ConfirmAction::ClearGrid => {
                workspace.write().clear_grid();
                tracing::info!("grid cleared");
                toast.notice(CLEARED, ToastSeverity::Success);
            }
            ConfirmAction::ClearChat => {
                workspace.write().chat.clear();
                toast.notice(CHAT_CLEARED, ToastSeverity::Success);
            }
        }
    };

    rsx! {
        div { class: "modal-backdrop",
            div {
                class: "confirm-modal",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h3 { "{prompt.title}" }
                }
                div { class: "modal-content",
                    p { "{prompt.text}" }
                }
                div { class: "modal-actions",
                    button { class: "btn btn-danger", onclick: on_confirm, "{action.confirm_label()}" }
                    button { class: "btn", onclick: move |_| manager.close(), "Cancel" }
                }
            }
        }
    }
}
