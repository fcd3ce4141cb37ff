use dino_types::{StatisticsPayload, StatisticsResult};

use super::{Completion, PanelWarning, PendingRequest, statistics_payload};
use crate::error::ApiError;
use crate::grid::Grid;
use crate::request::{RequestToken, TokenIssuer};
use crate::variables::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableStatus {
    Unchecked,
    /// Checkbox disabled while the request is in flight.
    Pending,
    Shown,
}

/// Rendered statistics for one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsBlock {
    pub variable: String,
    pub result: StatisticsResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Request(PendingRequest<StatisticsPayload>),
    Rejected(PanelWarning),
}

/// Descriptive statistics panel.
///
/// Every variable is independent: each check sends its own request, and
/// at most one block exists per variable name.
#[derive(Debug, Default)]
pub struct DescriptivePanel {
    variables: Vec<Variable>,
    issuer: TokenIssuer,
    pending: Vec<(String, RequestToken)>,
    blocks: Vec<StatisticsBlock>,
}

impl DescriptivePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, grid: &Grid) {
        self.variables = grid.variables();
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Blocks in the order they were first rendered.
    pub fn blocks(&self) -> &[StatisticsBlock] {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&StatisticsBlock> {
        self.blocks.iter().find(|b| b.variable == name)
    }

    pub fn status(&self, name: &str) -> VariableStatus {
        if self.pending.iter().any(|(n, _)| n == name) {
            VariableStatus::Pending
        } else if self.block(name).is_some() {
            VariableStatus::Shown
        } else {
            VariableStatus::Unchecked
        }
    }

    pub fn check(&mut self, grid: &Grid, variable: &Variable) -> CheckOutcome {
        let payload = match statistics_payload(grid, variable) {
            Ok(payload) => payload,
            Err(warning) => return CheckOutcome::Rejected(warning),
        };
        let token = self.issuer.issue();
        self.pending.retain(|(n, _)| *n != variable.name);
        self.pending.push((variable.name.clone(), token));
        tracing::debug!(
            variable = %variable.name,
            %token,
            numeric = payload.is_numeric,
            values = payload.data.len(),
            "requesting statistics"
        );
        CheckOutcome::Request(PendingRequest { token, payload })
    }

    /// Remove the variable's block, or cancel its in-flight request.
    ///
    /// Returns `true` if anything changed.
    pub fn uncheck(&mut self, name: &str) -> bool {
        let before = (self.pending.len(), self.blocks.len());
        self.pending.retain(|(n, _)| n != name);
        self.blocks.retain(|b| b.variable != name);
        before != (self.pending.len(), self.blocks.len())
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<StatisticsResult, ApiError>,
    ) -> Completion {
        let Some(pos) = self.pending.iter().position(|(_, t)| *t == token) else {
            tracing::warn!(%token, "discarding statistics for unchecked variable");
            return Completion::Discarded;
        };
        let (variable, _) = self.pending.remove(pos);

        match result {
            Ok(result) => {
                match self.blocks.iter_mut().find(|b| b.variable == variable) {
                    Some(block) => block.result = result,
                    None => self.blocks.push(StatisticsBlock { variable, result }),
                }
                Completion::Rendered
            }
            Err(err) => Completion::Failed(format!(
                "Failed to load statistics: {}",
                err.user_message()
            )),
        }
    }

    pub fn reset(&mut self, grid: &Grid) {
        self.pending.clear();
        self.blocks.clear();
        self.open(grid);
    }
}
