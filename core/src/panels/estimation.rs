use dino_types::SurvivalResult;

use super::{AnalysisFlow, AnalysisView, Completion, ToggleOutcome, selection_payload};
use crate::error::ApiError;
use crate::grid::Grid;
use crate::request::RequestToken;
use crate::selection::SelectionState;
use crate::variables::Variable;

/// Distribution estimation panel. Any non-empty selection is analyzed.
#[derive(Debug, Default)]
pub struct EstimationPanel {
    variables: Vec<Variable>,
    selection: SelectionState,
    flow: AnalysisFlow<SurvivalResult>,
}

impl EstimationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, grid: &Grid) {
        self.variables = grid.variables();
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.is_selected(name)
    }

    pub fn view(&self) -> &AnalysisView<SurvivalResult> {
        self.flow.view()
    }

    pub fn result(&self) -> Option<&SurvivalResult> {
        self.flow.result()
    }

    pub fn toggle(&mut self, grid: &Grid, name: &str, checked: bool) -> ToggleOutcome {
        self.selection.set(name, checked);
        self.retry(grid)
    }

    pub fn retry(&mut self, grid: &Grid) -> ToggleOutcome {
        self.flow.clear();
        let payload = selection_payload(grid, &self.selection);
        if payload.is_empty() {
            return ToggleOutcome::Cleared;
        }
        tracing::debug!(variables = payload.columns.len(), "requesting distribution estimate");
        ToggleOutcome::Request(self.flow.start(payload))
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<SurvivalResult, ApiError>,
    ) -> Completion {
        self.flow.complete(token, result)
    }

    pub fn reset(&mut self, grid: &Grid) {
        self.selection.reset();
        self.flow.clear();
        self.open(grid);
    }
}
