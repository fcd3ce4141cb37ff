//! Spreadsheet workbook import and export.
//!
//! Reading goes through `calamine` (xlsx, xls, xlsb, ods); writing produces
//! xlsx with `rust_xlsxwriter`. Both operate on in-memory buffers because
//! the browser hands us bytes, not paths.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use dino_types::formatting::{NOT_AVAILABLE, format_percentage};
use dino_types::{CellValue, StatisticsResult};

pub const GRID_SHEET: &str = "Sheet1";
pub const STATISTICS_SHEET: &str = "Statistics";

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("failed to write workbook: {0}")]
    Write(#[from] XlsxError),
    #[error("cell ({row}, {col}) is beyond the spreadsheet limits")]
    TooLarge { row: usize, col: usize },
}

fn position(row: usize, col: usize) -> Result<(u32, u16), WorkbookError> {
    match (u32::try_from(row), u16::try_from(col)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(WorkbookError::TooLarge { row, col }),
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: usize,
    col: usize,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), WorkbookError> {
    let (r, c) = position(row, col)?;
    match (value, format) {
        (CellValue::Empty, _) => {}
        (CellValue::Text(s), _) if s.is_empty() => {}
        (CellValue::Number(n), None) => {
            sheet.write_number(r, c, *n)?;
        }
        (CellValue::Number(n), Some(f)) => {
            sheet.write_number_with_format(r, c, *n, f)?;
        }
        (CellValue::Text(s), None) => {
            sheet.write_string(r, c, s)?;
        }
        (CellValue::Text(s), Some(f)) => {
            sheet.write_string_with_format(r, c, s, f)?;
        }
    }
    Ok(())
}

/// Write rows to a single-sheet xlsx workbook. The first row is bold.
pub fn write_rows(sheet_name: &str, rows: &[Vec<CellValue>]) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (r, row) in rows.iter().enumerate() {
        let format = (r == 0).then_some(&header);
        for (c, value) in row.iter().enumerate() {
            write_cell(sheet, r, c, value, format)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Rows of the first sheet, anchored at A1.
///
/// Leading blank rows and columns before the used range are kept as empty
/// cells so the data lands where it sat in the file.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, WorkbookError> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let name = sheets
        .sheet_names()
        .first()
        .cloned()
        .ok_or(WorkbookError::NoSheets)?;
    let range = sheets.worksheet_range(&name)?;

    let (top, left) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); top as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; left as usize];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }
    tracing::debug!(sheet = %name, rows = rows.len(), "workbook read");
    Ok(rows)
}

/// `<variable>_statistics.xlsx`
pub fn statistics_file_name(variable: &str) -> String {
    format!("{variable}_statistics.xlsx")
}

/// Statistics of one variable as a `Statistics` sheet.
pub fn statistics_workbook(result: &StatisticsResult) -> Result<Vec<u8>, WorkbookError> {
    let rows: Vec<Vec<CellValue>> = match result {
        StatisticsResult::Numeric(stats) => {
            let mut rows = vec![vec!["Statistic".into(), "Value".into()]];
            rows.extend(stats.summary_rows().iter().map(|(label, value)| {
                let value = value
                    .filter(|v| v.is_finite())
                    .map_or_else(|| NOT_AVAILABLE.into(), CellValue::Number);
                vec![(*label).into(), value]
            }));
            rows
        }
        StatisticsResult::Categorical(stats) => {
            let mut rows = vec![vec!["Category".into(), "Count".into(), "Percentage".into()]];
            rows.extend(stats.shares().into_iter().map(|share| {
                vec![
                    share.category.into(),
                    CellValue::Number(share.count as f64),
                    format_percentage(share.percentage).into(),
                ]
            }));
            rows
        }
    };
    write_rows(STATISTICS_SHEET, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_types::{CategoricalStatistics, NumericStatistics};

    fn read_sheet_named(bytes: &[u8], name: &str) -> Vec<Vec<CellValue>> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).unwrap();
        assert_eq!(sheets.sheet_names(), vec![name.to_string()]);
        let range = sheets.worksheet_range(name).unwrap();
        range.rows().map(|r| r.iter().map(to_cell).collect()).collect()
    }

    #[test]
    fn round_trip_keeps_values() {
        let rows = vec![
            vec!["time".into(), "group".into()],
            vec![CellValue::Number(1.5), "a".into()],
            vec![CellValue::Number(0.0), CellValue::Empty],
        ];
        let bytes = write_rows(GRID_SHEET, &rows).unwrap();
        let back = read_first_sheet(&bytes).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn leading_blank_cells_are_preserved() {
        let rows = vec![
            vec![CellValue::Empty, CellValue::Empty],
            vec![CellValue::Empty, "x".into()],
        ];
        let bytes = write_rows(GRID_SHEET, &rows).unwrap();
        let back = read_first_sheet(&bytes).unwrap();
        assert_eq!(back, vec![vec![], vec![CellValue::Empty, "x".into()]]);
    }

    #[test]
    fn garbage_bytes_fail_to_read() {
        assert!(read_first_sheet(b"definitely not a workbook").is_err());
    }

    #[test]
    fn numeric_statistics_sheet() {
        let result = StatisticsResult::Numeric(NumericStatistics {
            mean: Some(9.5),
            count: Some(37.0),
            ..Default::default()
        });
        let bytes = statistics_workbook(&result).unwrap();
        let rows = read_sheet_named(&bytes, STATISTICS_SHEET);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[1], vec!["Mean".into(), CellValue::Number(9.5)]);
        assert_eq!(rows[3], vec!["Mode".into(), "N/A".into()]);
        assert_eq!(rows[10], vec!["Count".into(), CellValue::Number(37.0)]);
    }

    #[test]
    fn categorical_statistics_sheet() {
        let result = StatisticsResult::Categorical(CategoricalStatistics {
            category_count: vec![("b".into(), 3), ("a".into(), 1)],
            ..Default::default()
        });
        let bytes = statistics_workbook(&result).unwrap();
        let rows = read_sheet_named(&bytes, STATISTICS_SHEET);
        assert_eq!(
            rows[1],
            vec!["b".into(), CellValue::Number(3.0), "75.0%".into()]
        );
        assert_eq!(statistics_file_name("age"), "age_statistics.xlsx");
    }
}
