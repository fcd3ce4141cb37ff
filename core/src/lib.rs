pub mod chat;
pub mod client;
pub mod comparison;
pub mod config;
pub mod cookie;
pub mod data_ops;
pub mod error;
pub mod grid;
pub mod interpretation;
pub mod panels;
pub mod report;
pub mod request;
pub mod selection;
pub mod variables;
pub mod workbook;
pub mod workspace;

// Re-exports for convenience
pub use chat::{ChatLog, ChatMessage, ChatRole, MessageState};
pub use client::{CsrfSource, StatsClient};
pub use comparison::{Agreement, DistributionComparison};
pub use error::ApiError;
pub use grid::{Grid, GridChange};
pub use interpretation::Interpretation;
pub use panels::{Completion, PanelWarning, PendingRequest, ToggleOutcome};
pub use report::{Report, ReportError};
pub use request::RequestToken;
pub use variables::Variable;
pub use workbook::WorkbookError;
pub use workspace::{PanelKind, Workspace};
