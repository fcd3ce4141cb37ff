//! Shared types for the Dino statistics workbench.
//!
//! Everything that crosses a crate boundary lives here: grid cell values,
//! backend request/response shapes, application configuration, and the
//! display formatting used by both the UI and generated reports.

pub mod cell;
pub mod config;
pub mod formatting;
pub mod ordered_map;
pub mod wire;

pub use cell::CellValue;
pub use config::{AppConfig, BackendConfig, GridConfig, ReportConfig, SurvivalConfig};
pub use wire::{
    CategoricalStatistics, CategoryShare, Chart, ChatPayload, ChatReply, DistributionFit,
    FittedParams, KaplanMeier, KaplanMeierRow, NumericStatistics, StatisticsPayload,
    StatisticsResult, SurvivalPayload, SurvivalResult,
};
