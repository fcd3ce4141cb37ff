//! The grid, every panel and which panel is on screen.

use dino_types::{AppConfig, CellValue};

use crate::chat::ChatLog;
use crate::data_ops;
use crate::grid::{Grid, GridChange, GridError};
use crate::panels::{DescriptivePanel, EstimationPanel, SurvivalPanel};
use crate::workbook::WorkbookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Descriptive,
    Survival,
    Estimation,
    Chat,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Descriptive,
        PanelKind::Survival,
        PanelKind::Estimation,
        PanelKind::Chat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Descriptive => "Descriptive",
            PanelKind::Survival => "Survival",
            PanelKind::Estimation => "Estimation",
            PanelKind::Chat => "Chat",
        }
    }
}

/// Fields are public so callers can borrow the grid and one panel at once,
/// e.g. `ws.survival.toggle(&ws.grid, name, checked)`.
#[derive(Debug)]
pub struct Workspace {
    pub grid: Grid,
    pub descriptive: DescriptivePanel,
    pub survival: SurvivalPanel,
    pub estimation: EstimationPanel,
    pub chat: ChatLog,
    active: PanelKind,
    data_epoch: u64,
}

impl Workspace {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            grid: Grid::initial(&config.grid),
            descriptive: DescriptivePanel::new(),
            survival: SurvivalPanel::new(&config.survival),
            estimation: EstimationPanel::new(),
            chat: ChatLog::default(),
            active: PanelKind::Chat,
            data_epoch: 0,
        }
    }

    pub fn active(&self) -> PanelKind {
        self.active
    }

    /// Counts wholesale data changes (import, clear).
    pub fn data_epoch(&self) -> u64 {
        self.data_epoch
    }

    pub fn is_visible(&self, kind: PanelKind) -> bool {
        self.active == kind
    }

    /// Show one panel and hide the rest. Analysis panels re-read the header.
    pub fn show(&mut self, kind: PanelKind) {
        match kind {
            PanelKind::Descriptive => self.descriptive.open(&self.grid),
            PanelKind::Survival => self.survival.open(&self.grid),
            PanelKind::Estimation => self.estimation.open(&self.grid),
            PanelKind::Chat => {}
        }
        self.active = kind;
    }

    /// React to a grid mutation. Wholesale changes reset every analysis panel.
    pub fn apply(&mut self, change: GridChange) {
        if change.invalidates_analysis() {
            self.data_epoch += 1;
            tracing::debug!(?change, epoch = self.data_epoch, "resetting analysis panels");
            self.descriptive.reset(&self.grid);
            self.survival.reset(&self.grid);
            self.estimation.reset(&self.grid);
        }
    }

    pub fn edit_cell(&mut self, row: usize, col: usize, input: &str) -> Result<(), GridError> {
        let change = self.grid.set_cell(row, col, CellValue::from_input(input))?;
        self.apply(change);
        Ok(())
    }

    pub fn append_row(&mut self) {
        let change = self.grid.append_row();
        self.apply(change);
    }

    pub fn append_column(&mut self) {
        let change = self.grid.append_column();
        self.apply(change);
    }

    pub fn clear_grid(&mut self) {
        let change = self.grid.clear();
        self.apply(change);
    }

    pub fn import(&mut self, bytes: &[u8]) -> Result<(), WorkbookError> {
        let change = data_ops::import_workbook(&mut self.grid, bytes)?;
        self.apply(change);
        Ok(())
    }
}
