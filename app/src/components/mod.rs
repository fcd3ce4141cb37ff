//! UI Components
//!
//! Each panel takes the workspace signal as a prop and calls into
//! `dino-core` for every state change.

pub mod analysis_view;
pub mod chat_panel;
pub mod confirm_dialog;
pub mod data_controls;
pub mod descriptive_panel;
pub mod estimation_panel;
pub mod grid_view;
pub mod survival_panel;
pub mod toast;
pub mod variable_list;

pub use chat_panel::ChatPanel;
pub use confirm_dialog::{ConfirmDialog, use_confirm_provider};
pub use data_controls::DataControls;
pub use descriptive_panel::DescriptiveAnalysis;
pub use estimation_panel::EstimationAnalysis;
pub use grid_view::GridView;
pub use survival_panel::SurvivalAnalysis;
pub use toast::{ToastFrame, use_toast_provider};
