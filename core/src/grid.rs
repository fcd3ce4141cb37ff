//! The tabular data store behind the spreadsheet view.
//!
//! Row 0 is the header row. Every row always has the same number of columns,
//! and the grid never shrinks below its configured minimum dimensions.
//! Every mutation bumps [`Grid::revision`] and reports a [`GridChange`].

use dino_types::{CellValue, GridConfig};

use crate::variables::{Variable, build_variable_list};

/// Bundled survival dataset: `(time_to_event, event_status)`.
const SAMPLE_ROWS: [(f64, f64); 37] = [
    (13.03, 1.0),
    (12.6, 0.0),
    (13.68, 1.0),
    (8.93, 0.0),
    (17.43, 0.0),
    (5.68, 0.0),
    (15.19, 1.0),
    (9.4, 1.0),
    (9.84, 1.0),
    (5.35, 0.0),
    (3.84, 0.0),
    (6.59, 1.0),
    (9.51, 0.0),
    (12.08, 1.0),
    (11.81, 0.0),
    (13.05, 1.0),
    (5.79, 1.0),
    (11.22, 1.0),
    (1.64, 0.0),
    (7.72, 1.0),
    (10.87, 1.0),
    (10.11, 1.0),
    (7.44, 0.0),
    (8.6, 0.0),
    (12.93, 0.0),
    (11.96, 0.0),
    (2.99, 0.0),
    (1.38, 0.0),
    (8.39, 1.0),
    (8.29, 0.0),
    (10.87, 1.0),
    (13.72, 0.0),
    (2.73, 0.0),
    (9.97, 0.0),
    (13.81, 1.0),
    (6.71, 0.0),
    (5.62, 1.0),
];

pub const SAMPLE_HEADERS: [&str; 2] = ["time_to_event", "event_status"];

/// Header row plus the bundled sample rows, unpadded.
pub fn sample_rows() -> Vec<Vec<CellValue>> {
    let mut rows = Vec::with_capacity(SAMPLE_ROWS.len() + 1);
    rows.push(SAMPLE_HEADERS.iter().map(|h| CellValue::from(*h)).collect());
    rows.extend(
        SAMPLE_ROWS
            .iter()
            .map(|&(time, status)| vec![CellValue::Number(time), CellValue::Number(status)]),
    );
    rows
}

/// Notification emitted by every grid mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChange {
    CellEdited { row: usize, col: usize },
    RowAppended,
    ColumnAppended,
    Replaced,
    Cleared,
}

impl GridChange {
    /// Wholesale changes make every rendered analysis stale.
    pub fn invalidates_analysis(self) -> bool {
        matches!(self, Self::Replaced | Self::Cleared)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    min_rows: usize,
    min_cols: usize,
    revision: u64,
}

impl Grid {
    /// A blank grid of the minimum dimensions.
    pub fn new(config: &GridConfig) -> Self {
        Self::from_rows(Vec::new(), config)
    }

    /// The grid the app starts with.
    pub fn initial(config: &GridConfig) -> Self {
        if config.load_sample {
            Self::from_rows(sample_rows(), config)
        } else {
            Self::new(config)
        }
    }

    /// Build from ragged rows, padding to a rectangle of at least the minimum size.
    pub fn from_rows(rows: Vec<Vec<CellValue>>, config: &GridConfig) -> Self {
        let mut grid = Self {
            rows,
            min_rows: config.min_rows,
            min_cols: config.min_cols,
            revision: 0,
        };
        grid.normalize();
        grid
    }

    fn normalize(&mut self) {
        let cols = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.min_cols);
        if self.rows.len() < self.min_rows {
            self.rows.resize_with(self.min_rows, Vec::new);
        }
        for row in &mut self.rows {
            row.resize(cols, CellValue::Empty);
        }
    }

    fn bump(&mut self, change: GridChange) -> GridChange {
        self.revision += 1;
        tracing::debug!(?change, revision = self.revision, "grid changed");
        change
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn header(&self) -> &[CellValue] {
        self.rows.first().map_or(&[], Vec::as_slice)
    }

    /// Header cells as display strings, untrimmed, in column order.
    pub fn header_names(&self) -> Vec<String> {
        self.header().iter().map(ToString::to_string).collect()
    }

    /// Checkable variables for the current header row.
    pub fn variables(&self) -> Vec<Variable> {
        build_variable_list(&self.header_names())
    }

    /// First column whose trimmed header equals `name`.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.header().iter().position(|h| h.trimmed() == name)
    }

    /// Data cells (rows 1..N) of a column, skipping empty ones.
    pub fn column_values(&self, col: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .skip(1)
            .filter_map(|row| row.get(col))
            .filter(|cell| !cell.is_empty())
            .cloned()
            .collect()
    }

    /// True when no cell, header included, holds a value.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(CellValue::is_empty)
    }

    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<GridChange, GridError> {
        let (rows, cols) = (self.row_count(), self.col_count());
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })?;
        *cell = value;
        Ok(self.bump(GridChange::CellEdited { row, col }))
    }

    pub fn append_row(&mut self) -> GridChange {
        let cols = self.col_count();
        self.rows.push(vec![CellValue::Empty; cols]);
        self.bump(GridChange::RowAppended)
    }

    pub fn append_column(&mut self) -> GridChange {
        for row in &mut self.rows {
            row.push(CellValue::Empty);
        }
        self.bump(GridChange::ColumnAppended)
    }

    /// Replace the whole table, e.g. after an import.
    pub fn replace(&mut self, rows: Vec<Vec<CellValue>>) -> GridChange {
        self.rows = rows;
        self.normalize();
        self.bump(GridChange::Replaced)
    }

    /// Set every cell to the empty string, keeping the dimensions.
    pub fn clear(&mut self) -> GridChange {
        for cell in self.rows.iter_mut().flatten() {
            *cell = CellValue::Text(String::new());
        }
        self.bump(GridChange::Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfig {
        GridConfig::default()
    }

    #[test]
    fn initial_grid_holds_sample_padded_to_minimum() {
        let grid = Grid::initial(&config());
        assert_eq!(grid.row_count(), 38);
        assert_eq!(grid.col_count(), 7);
        assert_eq!(grid.header_names()[..2], ["time_to_event", "event_status"]);
        assert_eq!(grid.cell(1, 0), Some(&CellValue::Number(13.03)));
        assert_eq!(grid.cell(1, 6), Some(&CellValue::Empty));
        assert!(grid.rows().iter().all(|r| r.len() == 7));
    }

    #[test]
    fn blank_grid_uses_minimum_dimensions() {
        let grid = Grid::new(&config());
        assert_eq!((grid.row_count(), grid.col_count()), (14, 7));
        assert!(grid.is_blank());
    }

    #[test]
    fn ragged_rows_are_padded_to_widest() {
        let rows = vec![
            vec![CellValue::from("a")],
            vec![CellValue::Number(1.0); 9],
        ];
        let grid = Grid::from_rows(rows, &config());
        assert_eq!(grid.col_count(), 9);
        assert!(grid.rows().iter().all(|r| r.len() == 9));
    }

    #[test]
    fn column_values_skip_empty_and_keep_zero() {
        let rows = vec![
            vec![CellValue::from("x")],
            vec![CellValue::Number(0.0)],
            vec![CellValue::Empty],
            vec![CellValue::from("")],
            vec![CellValue::Number(4.0)],
        ];
        let grid = Grid::from_rows(rows, &config());
        assert_eq!(
            grid.column_values(0),
            vec![CellValue::Number(0.0), CellValue::Number(4.0)]
        );
    }

    #[test]
    fn find_column_matches_trimmed_header() {
        let rows = vec![vec![CellValue::from(" age "), CellValue::from("sex")]];
        let grid = Grid::from_rows(rows, &config());
        assert_eq!(grid.find_column("age"), Some(0));
        assert_eq!(grid.find_column("sex"), Some(1));
        assert_eq!(grid.find_column("weight"), None);
    }

    #[test]
    fn mutations_bump_revision_and_report_change() {
        let mut grid = Grid::new(&config());
        assert_eq!(grid.revision(), 0);

        let change = grid.set_cell(0, 0, CellValue::from("x")).unwrap();
        assert_eq!(change, GridChange::CellEdited { row: 0, col: 0 });
        assert!(!change.invalidates_analysis());

        assert_eq!(grid.append_row(), GridChange::RowAppended);
        assert_eq!(grid.row_count(), 15);
        assert_eq!(grid.append_column(), GridChange::ColumnAppended);
        assert_eq!(grid.col_count(), 8);
        assert_eq!(grid.revision(), 3);
    }

    #[test]
    fn set_cell_out_of_bounds_fails() {
        let mut grid = Grid::new(&config());
        let err = grid.set_cell(14, 0, CellValue::Number(1.0)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { row: 14, .. }));
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn clear_keeps_dimensions_and_empties_every_cell() {
        let mut grid = Grid::initial(&config());
        let change = grid.clear();
        assert!(change.invalidates_analysis());
        assert_eq!((grid.row_count(), grid.col_count()), (38, 7));
        assert!(
            grid.rows()
                .iter()
                .flatten()
                .all(|c| *c == CellValue::Text(String::new()))
        );
        assert!(grid.is_blank());
    }

    #[test]
    fn replace_normalizes_to_minimum() {
        let mut grid = Grid::initial(&config());
        let change = grid.replace(vec![vec![CellValue::from("only")]]);
        assert_eq!(change, GridChange::Replaced);
        assert_eq!((grid.row_count(), grid.col_count()), (14, 7));
        assert_eq!(grid.header_names()[0], "only");
    }
}
