//! Analysis panels.
//!
//! Each panel owns its selection state and request bookkeeping. Panel
//! operations take the grid explicitly and return what the caller must do
//! next (send a request, show a warning) instead of performing I/O.

mod descriptive;
mod estimation;
mod flow;
mod survival;


pub use descriptive::{CheckOutcome, DescriptivePanel, StatisticsBlock, VariableStatus};
pub use estimation::EstimationPanel;
pub use flow::{AnalysisFlow, AnalysisView};
pub use survival::SurvivalPanel;

use dino_types::{CellValue, StatisticsPayload, SurvivalPayload};

use crate::grid::Grid;
use crate::request::RequestToken;
use crate::selection::SelectionState;
use crate::variables::Variable;

/// A request the caller should send, stamped with the token its completion
/// must present.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest<P> {
    pub token: RequestToken,
    pub payload: P,
}

/// What happened to a completed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Rendered,
    /// The request failed; the message is ready for display.
    Failed(String),
    /// The token was stale; nothing changed.
    Discarded,
}

/// Local validation failures. Nothing is sent when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelWarning {
    #[error("Variable \"{variable}\" has no data to analyze.")]
    EmptyColumn { variable: String },
    #[error("Variable \"{variable}\" no longer exists in the table.")]
    UnknownVariable { variable: String },
    #[error("Please select \"{duration}\" before selecting \"{status}\".")]
    StatusBeforeDuration { duration: String, status: String },
    #[error("Please select at least \"{duration}\" or \"{status}\".")]
    MissingRequired { duration: String, status: String },
}

/// Outcome of toggling a variable in the survival or estimation panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Send this request.
    Request(PendingRequest<SurvivalPayload>),
    /// Nothing selected any more; the view was cleared.
    Cleared,
    /// The toggle was refused; the checkbox must show unchecked.
    Rejected(PanelWarning),
}

/// True when the column's first data value reads as a number.
fn looks_numeric(values: &[CellValue]) -> bool {
    values.first().and_then(CellValue::as_number).is_some()
}

/// Payload for a descriptive statistics request.
pub fn statistics_payload(
    grid: &Grid,
    variable: &Variable,
) -> Result<StatisticsPayload, PanelWarning> {
    let at_index = grid
        .header()
        .get(variable.index)
        .is_some_and(|h| h.trimmed() == variable.name);
    let col = at_index
        .then_some(variable.index)
        .or_else(|| grid.find_column(&variable.name))
        .ok_or_else(|| PanelWarning::UnknownVariable {
            variable: variable.name.clone(),
        })?;
    let data = grid.column_values(col);
    if data.is_empty() {
        return Err(PanelWarning::EmptyColumn {
            variable: variable.name.clone(),
        });
    }
    Ok(StatisticsPayload {
        variable: variable.name.clone(),
        is_numeric: looks_numeric(&data),
        data,
    })
}

/// Payload with the non-empty data of every selected variable.
///
/// Selected names missing from the current header are skipped.
pub fn selection_payload(grid: &Grid, selection: &SelectionState) -> SurvivalPayload {
    let columns = selection
        .selected()
        .filter_map(|name| match grid.find_column(name) {
            Some(col) => Some((name.to_string(), grid.column_values(col))),
            None => {
                tracing::warn!(variable = name, "selected variable not in header, skipping");
                None
            }
        })
        .collect();
    SurvivalPayload { columns }
}
