//! Chat with the statistics assistant.

use dioxus::prelude::*;

use dino_core::chat::greeting;
use dino_core::{ChatRole, Completion, MessageState, Workspace};

use super::confirm_dialog::{ConfirmAction, use_confirm};
use super::toast::{ToastSeverity, use_toast};
use crate::api::use_client;
use crate::utils::current_hour;

#[derive(Props, Clone, PartialEq)]
pub struct ChatPanelProps {
    pub workspace: Signal<Workspace>,
}

#[component]
pub fn ChatPanel(props: ChatPanelProps) -> Element {
    let mut workspace = props.workspace;
    let client = use_client();
    let mut toast = use_toast();
    let mut confirm = use_confirm();
    let mut draft = use_signal(String::new);

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        let Some(request) = workspace.write().chat.submit(&draft.read()) else {
            return;
        };
        draft.set(String::new());
        let client = client.clone();
        spawn(async move {
            let reply = client.chat(&request.payload).await;
            let done = workspace.write().chat.complete(request.token, reply);
            if let Completion::Failed(message) = done {
                tracing::warn!(%message, "chat request failed");
            }
        });
    };

    let ws = workspace.read();
    let messages = ws.chat.messages().to_vec();
    let pending = ws.chat.is_pending();
    let has_messages = !ws.chat.is_empty();

    rsx! {
        div { class: "panel chat-panel",
            div { class: "chat-header",
                h2 { "{greeting(current_hour())}" }
                button {
                    class: "btn btn-sm",
                    disabled: !has_messages,
                    onclick: move |_| {
                        if workspace.read().chat.is_empty() {
                            toast.show("Nothing to delete", "There are no chats yet.", ToastSeverity::Info);
                        } else {
                            confirm.ask(ConfirmAction::ClearChat);
                        }
                    },
                    "Delete chats"
                }
            }
            div { class: "chat-messages",
                for (i , message) in messages.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: match (message.role, message.state) {
                            (ChatRole::User, _) => "chat-message user",
                            (ChatRole::Assistant, MessageState::Pending) => "chat-message assistant pending",
                            (ChatRole::Assistant, MessageState::Failed) => "chat-message assistant failed",
                            (ChatRole::Assistant, MessageState::Delivered) => "chat-message assistant",
                        },
                        if message.state == MessageState::Pending {
                            span { class: "typing", "..." }
                        } else {
                            "{message.text}"
                        }
                    }
                }
            }
            form { class: "chat-form", onsubmit: on_submit,
                input {
                    class: "chat-input",
                    r#type: "text",
                    placeholder: "Ask a question about your data",
                    value: "{draft}",
                    oninput: move |e: Event<FormData>| draft.set(e.value()),
                }
                button { class: "btn", r#type: "submit", disabled: pending, "Send" }
            }
        }
    }
}
