//! Backend client wiring.
//!
//! Builds the [`StatsClient`] from configuration and the page location and
//! shares it through context. Requests themselves live in `dino-core`.

use std::rc::Rc;

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use dino_core::cookie::read_cookie;
use dino_core::{CsrfSource, StatsClient};
use dino_types::AppConfig;

use crate::utils::page_origin;

/// CSRF token read from `document.cookie` on every request.
struct DocumentCookie {
    name: String,
}

impl CsrfSource for DocumentCookie {
    fn csrf_token(&self) -> Option<String> {
        let document: HtmlDocument = web_sys::window()?.document()?.dyn_into().ok()?;
        let cookies = document.cookie().ok()?;
        read_cookie(&cookies, &self.name)
    }
}

pub fn build_client(config: &AppConfig) -> StatsClient {
    let base_url = config
        .backend
        .base_url
        .clone()
        .or_else(page_origin)
        .unwrap_or_default();
    tracing::info!(%base_url, "backend client ready");
    let csrf = Rc::new(DocumentCookie {
        name: config.backend.csrf_cookie.clone(),
    });
    StatsClient::new(base_url, config.backend.clone(), csrf)
}

/// Initialize the client provider at app root.
pub fn use_client_provider(config: &AppConfig) -> StatsClient {
    let config = config.clone();
    use_context_provider(move || build_client(&config))
}

/// Get the backend client from context.
pub fn use_client() -> StatsClient {
    use_context::<StatsClient>()
}
