//! Import, export and clear of the whole grid.
//!
//! These return outcomes and toast texts; the app performs the download,
//! file read and confirmation dialog.

use crate::grid::{Grid, GridChange};
use crate::workbook::{self, GRID_SHEET, WorkbookError};

pub const EXPORT_FILE_NAME: &str = "data.xlsx";

/// Title and body of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub text: &'static str,
}

pub const NOTHING_TO_EXPORT: Notice = Notice {
    title: "No Data to Export!",
    text: "The table is empty. Please add some data before exporting.",
};
pub const EXPORTED: Notice = Notice {
    title: "Export Successful!",
    text: "Your data has been downloaded as 'data.xlsx'",
};
pub const ALREADY_EMPTY: Notice = Notice {
    title: "No Data to Clear!",
    text: "The table is already empty.",
};
pub const CONFIRM_CLEAR: Notice = Notice {
    title: "Clear All Data?",
    text: "This will delete all data in the table. This cannot be undone!",
};
pub const CLEARED: Notice = Notice {
    title: "Cleared!",
    text: "All data has been cleared successfully",
};
pub const IMPORT_FAILED: Notice = Notice {
    title: "Error!",
    text: "Failed to read the file.",
};
pub const CONFIRM_CLEAR_CHAT: Notice = Notice {
    title: "Delete All Chats?",
    text: "Are you sure you want to delete all the chats?",
};
pub const CHAT_CLEARED: Notice = Notice {
    title: "Deleted!",
    text: "All chats have been deleted.",
};

pub fn importing_message(file_name: &str) -> String {
    format!("Reading {file_name}")
}

pub fn imported_message(file_name: &str) -> String {
    format!("Data from {file_name} has been loaded.")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    NothingToExport,
    Ready {
        file_name: &'static str,
        bytes: Vec<u8>,
    },
}

/// Serialize every row, header included, to a one-sheet workbook.
pub fn export_grid(grid: &Grid) -> Result<ExportOutcome, WorkbookError> {
    if grid.is_blank() {
        return Ok(ExportOutcome::NothingToExport);
    }
    let bytes = workbook::write_rows(GRID_SHEET, grid.rows())?;
    tracing::debug!(rows = grid.row_count(), bytes = bytes.len(), "grid exported");
    Ok(ExportOutcome::Ready {
        file_name: EXPORT_FILE_NAME,
        bytes,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCheck {
    AlreadyEmpty,
    ConfirmationRequired,
}

pub fn check_clear(grid: &Grid) -> ClearCheck {
    if grid.is_blank() {
        ClearCheck::AlreadyEmpty
    } else {
        ClearCheck::ConfirmationRequired
    }
}

/// Replace the grid with the first sheet of a workbook. The grid is left
/// untouched when the bytes cannot be read.
pub fn import_workbook(grid: &mut Grid, bytes: &[u8]) -> Result<GridChange, WorkbookError> {
    let rows = workbook::read_first_sheet(bytes)?;
    Ok(grid.replace(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_types::{CellValue, GridConfig};

    fn sample() -> Grid {
        Grid::initial(&GridConfig::default())
    }

    #[test]
    fn blank_grid_has_nothing_to_export() {
        let grid = Grid::new(&GridConfig::default());
        assert_eq!(export_grid(&grid).unwrap(), ExportOutcome::NothingToExport);
        assert_eq!(check_clear(&grid), ClearCheck::AlreadyEmpty);
    }

    #[test]
    fn any_value_makes_grid_exportable() {
        let mut grid = Grid::new(&GridConfig::default());
        grid.set_cell(9, 4, CellValue::Number(0.0)).unwrap();
        assert!(matches!(
            export_grid(&grid).unwrap(),
            ExportOutcome::Ready { file_name: "data.xlsx", .. }
        ));
        assert_eq!(check_clear(&grid), ClearCheck::ConfirmationRequired);
    }

    #[test]
    fn sample_survives_export_and_import() {
        let original = sample();
        let ExportOutcome::Ready { bytes, .. } = export_grid(&original).unwrap() else {
            panic!("sample grid should export");
        };

        let mut grid = Grid::new(&GridConfig::default());
        let change = import_workbook(&mut grid, &bytes).unwrap();
        assert_eq!(change, GridChange::Replaced);
        assert_eq!(grid.header_names()[..2], original.header_names()[..2]);

        let data = |g: &Grid, col| g.column_values(col);
        assert_eq!(data(&grid, 0).len(), 37);
        assert_eq!(data(&grid, 0), data(&original, 0));
        assert_eq!(data(&grid, 1), data(&original, 1));
    }

    #[test]
    fn cleared_grid_reads_as_blank() {
        let mut grid = sample();
        let (rows, cols) = (grid.row_count(), grid.col_count());
        grid.clear();
        assert_eq!((grid.row_count(), grid.col_count()), (rows, cols));
        assert_eq!(check_clear(&grid), ClearCheck::AlreadyEmpty);
    }

    #[test]
    fn unreadable_file_leaves_grid_alone() {
        let mut grid = sample();
        let before = grid.clone();
        assert!(import_workbook(&mut grid, b"not a workbook").is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn messages() {
        assert_eq!(importing_message("a.xlsx"), "Reading a.xlsx");
        assert_eq!(imported_message("a.xlsx"), "Data from a.xlsx has been loaded.");
    }
}
