use dino_types::{SurvivalConfig, SurvivalResult};

use super::{
    AnalysisFlow, AnalysisView, Completion, PanelWarning, ToggleOutcome, selection_payload,
};
use crate::error::ApiError;
use crate::grid::Grid;
use crate::request::RequestToken;
use crate::selection::SelectionState;
use crate::variables::Variable;

/// Survival analysis panel.
///
/// Requires the duration variable (or at least the status variable) in the
/// selection, and refuses the status variable until the duration variable
/// is selected.
#[derive(Debug)]
pub struct SurvivalPanel {
    duration: String,
    status: String,
    variables: Vec<Variable>,
    selection: SelectionState,
    flow: AnalysisFlow<SurvivalResult>,
}

impl SurvivalPanel {
    pub fn new(config: &SurvivalConfig) -> Self {
        Self {
            duration: config.duration_variable.trim().to_string(),
            status: config.status_variable.trim().to_string(),
            variables: Vec::new(),
            selection: SelectionState::new(),
            flow: AnalysisFlow::default(),
        }
    }

    /// Re-derive the variable list from the current header row.
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
        if checked && name == self.status && !self.selection.is_selected(&self.duration) {
            return ToggleOutcome::Rejected(PanelWarning::StatusBeforeDuration {
                duration: self.duration.clone(),
                status: self.status.clone(),
            });
        }

        self.selection.set(name, checked);

        if !self.selection.is_selected(&self.duration) && !self.selection.is_selected(&self.status)
        {
            self.selection.set(name, false);
            self.flow.clear();
            return ToggleOutcome::Rejected(PanelWarning::MissingRequired {
                duration: self.duration.clone(),
                status: self.status.clone(),
            });
        }

        self.dispatch(grid)
    }

    /// Re-issue the request for the current selection.
    pub fn retry(&mut self, grid: &Grid) -> ToggleOutcome {
        self.dispatch(grid)
    }

    fn dispatch(&mut self, grid: &Grid) -> ToggleOutcome {
        self.flow.clear();
        let payload = selection_payload(grid, &self.selection);
        if payload.is_empty() {
            return ToggleOutcome::Cleared;
        }
        tracing::debug!(variables = payload.columns.len(), "requesting survival analysis");
        ToggleOutcome::Request(self.flow.start(payload))
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<SurvivalResult, ApiError>,
    ) -> Completion {
        self.flow.complete(token, result)
    }

    /// Forget the selection and any result after a wholesale data change.
    pub fn reset(&mut self, grid: &Grid) {
        self.selection.reset();
        self.flow.clear();
        self.open(grid);
    }
}
