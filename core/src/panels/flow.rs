//! Loading / result / error lifecycle shared by the survival and
//! estimation panels.

use dino_types::SurvivalPayload;

use super::{Completion, PendingRequest};
use crate::error::ApiError;
use crate::request::{RequestToken, RequestTracker};

/// What the panel's result area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView<R> {
    Idle,
    Loading(RequestToken),
    Ready(Box<R>),
    Failed(String),
}

#[derive(Debug)]
pub struct AnalysisFlow<R> {
    tracker: RequestTracker,
    view: AnalysisView<R>,
}

impl<R> Default for AnalysisFlow<R> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            view: AnalysisView::Idle,
        }
    }
}

impl<R> AnalysisFlow<R> {
    pub fn view(&self) -> &AnalysisView<R> {
        &self.view
    }

    pub fn result(&self) -> Option<&R> {
        match &self.view {
            AnalysisView::Ready(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, AnalysisView::Loading(_))
    }

    /// Drop any result, error or in-flight request.
    pub fn clear(&mut self) {
        self.tracker.invalidate();
        self.view = AnalysisView::Idle;
    }

    pub fn start(&mut self, payload: SurvivalPayload) -> PendingRequest<SurvivalPayload> {
        let token = self.tracker.begin();
        self.view = AnalysisView::Loading(token);
        PendingRequest { token, payload }
    }

    pub fn complete(&mut self, token: RequestToken, result: Result<R, ApiError>) -> Completion {
        if !self.tracker.finish(token) {
            tracing::warn!(%token, "discarding superseded response");
            return Completion::Discarded;
        }
        match result {
            Ok(result) => {
                self.view = AnalysisView::Ready(Box::new(result));
                Completion::Rendered
            }
            Err(err) => {
                let message = err.user_message();
                self.view = AnalysisView::Failed(message.clone());
                Completion::Failed(message)
            }
        }
    }
}
