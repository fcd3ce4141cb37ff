//! Toast notifications.
//!
//! A toast manager lives in context; any component can post a titled
//! message that dismisses itself after a delay or stays until replaced.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use dino_core::data_ops::Notice;

const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastSeverity {
    fn duration_ms(self) -> u32 {
        match self {
            ToastSeverity::Info => 1500,
            ToastSeverity::Success => 3000,
            ToastSeverity::Warning => 5000,
            ToastSeverity::Error => 7000,
        }
    }

    fn class(self) -> &'static str {
        match self {
            ToastSeverity::Success => "toast toast-success",
            ToastSeverity::Info => "toast toast-info",
            ToastSeverity::Warning => "toast toast-warning",
            ToastSeverity::Error => "toast toast-error",
        }
    }
}

#[derive(Clone)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub severity: ToastSeverity,
}

/// Access via `use_toast()` from any component.
#[derive(Clone, Copy)]
pub struct ToastManager {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u32>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Signal::new(vec![]),
            next_id: Signal::new(0),
        }
    }

    fn push(&mut self, title: String, message: String, severity: ToastSeverity) -> u32 {
        let id = *self.next_id.peek();
        *self.next_id.write() += 1;

        let mut toasts = self.toasts.write();
        if toasts.len() >= MAX_TOASTS {
            toasts.remove(0);
        }
        toasts.push(Toast {
            id,
            title,
            message,
            severity,
        });
        id
    }

    /// Show a toast that dismisses itself.
    pub fn show(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: ToastSeverity,
    ) {
        let id = self.push(title.into(), message.into(), severity);
        let mut toasts_signal = self.toasts;
        let duration = severity.duration_ms();
        spawn(async move {
            TimeoutFuture::new(duration).await;
            toasts_signal.write().retain(|t| t.id != id);
        });
    }

    pub fn notice(&mut self, notice: Notice, severity: ToastSeverity) {
        self.show(notice.title, notice.text, severity);
    }

    /// Show a toast that stays until dismissed. Returns its id.
    pub fn show_persistent(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: ToastSeverity,
    ) -> u32 {
        self.push(title.into(), message.into(), severity)
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.write().retain(|t| t.id != id);
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize toast provider at app root.
pub fn use_toast_provider() -> ToastManager {
    use_context_provider(ToastManager::new)
}

pub fn use_toast() -> ToastManager {
    use_context::<ToastManager>()
}

/// Renders all active toasts. Place once at the end of the main layout.
#[component]
pub fn ToastFrame() -> Element {
    let mut manager = use_toast();
    let toasts = manager.toasts.read();

    rsx! {
        div { class: "toast-container",
            for toast in toasts.iter() {
                div {
                    key: "{toast.id}",
                    class: toast.severity.class(),
                    div { class: "toast-body",
                        strong { class: "toast-title", "{toast.title}" }
                        span { class: "toast-message", "{toast.message}" }
                    }
                    button {
                        class: "toast-close",
                        onclick: {
                            let id = toast.id;
                            move |_| manager.dismiss(id)
                        },
                        "X"
                    }
                }
            }
        }
    }
}
