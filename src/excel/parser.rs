use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, Duration, NaiveDate};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExcelError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unreadable spreadsheet {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    #[error("Spreadsheet {} contains no sheets", .0.display())]
    NoSheets(PathBuf),

    #[error("Sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },
}

/// One sheet laid out on absolute sheet coordinates.
///
/// Column positions always count from column A, so a blank margin column
/// shows up as leading `None` cells rather than shifting every index.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: String,
    /// Sheet row 1; `None` where the cell is empty. Empty when row 1 is blank.
    pub headers: Vec<Option<String>>,
    /// Data rows; empty cells are `None`
    pub rows: Vec<Vec<Option<String>>>,
    /// 1-based sheet row number of `rows[0]`
    pub first_data_row: usize,
}

/// Read one sheet of a workbook, or the first sheet when `sheet_name` is `None`
pub fn read_sheet<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<SheetData, ExcelError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExcelError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ExcelError::MalformedInput {
            path: path.to_path_buf(),
            message: "not a regular file".to_string(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ExcelError::MalformedInput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheets = workbook.sheet_names();
    let name = match sheet_name {
        Some(requested) => {
            if !sheets.iter().any(|s| s == requested) {
                return Err(ExcelError::SheetNotFound {
                    sheet: requested.to_string(),
                    available: sheets,
                });
            }
            requested.to_string()
        }
        None => sheets
            .first()
            .cloned()
            .ok_or_else(|| ExcelError::NoSheets(path.to_path_buf()))?,
    };
    debug!("Reading sheet '{}' from {:?}", name, path);

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ExcelError::MalformedInput {
            path: path.to_path_buf(),
            message: format!("Error reading sheet '{}': {}", name, e),
        })?;

    // calamine ranges begin at the first used cell, not at A1
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let margin = start_col as usize;
    let mut rows = range.rows().map(|row| {
        std::iter::repeat_n(None, margin)
            .chain(row.iter().map(cell_text))
            .collect::<Vec<_>>()
    });

    let (headers, first_data_row) = if start_row == 0 {
        (rows.next().unwrap_or_default(), 2)
    } else {
        warn!(
            "Sheet '{}' has nothing in row 1; data starts at row {}",
            name,
            start_row + 1
        );
        (Vec::new(), start_row as usize + 1)
    };
    let rows: Vec<_> = rows.collect();

    debug!("Sheet '{}': {} headers, {} data rows", name, headers.len(), rows.len());
    Ok(SheetData {
        name,
        headers,
        rows,
        first_data_row,
    })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::DateTime(dt) if dt.is_datetime() => Some(
            serial_to_text(dt.as_f64()).unwrap_or_else(|| dt.to_string()),
        ),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() { None } else { Some(text) }
        }
    }
}

/// Render a 1900-system Excel serial as `dd.mm.yyyy`, with `HH:MM` when it carries a time
fn serial_to_text(serial: f64) -> Option<String> {
    if !(0.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = base.checked_add_days(Days::new(serial.trunc() as u64))?;

    let seconds = (serial.fract() * 86_400.0).round() as i64;
    if seconds == 0 {
        return Some(date.format("%d.%m.%Y").to_string());
    }
    let stamp = date.and_hms_opt(0, 0, 0)? + Duration::seconds(seconds);
    Some(stamp.format("%d.%m.%Y %H:%M").to_string())
}

impl SheetData {
    /// Non-empty cells of the first `max_rows` data rows, limited to columns `1..=max_columns`.
    ///
    /// Row and column numbers are absolute sheet positions (the header is row 1).
    pub fn preview(&self, max_rows: usize, max_columns: usize) -> Vec<PreviewRow> {
        self.rows
            .iter()
            .take(max_rows)
            .enumerate()
            .map(|(idx, row)| PreviewRow {
                row_number: self.first_data_row + idx,
                cells: row
                    .iter()
                    .take(max_columns)
                    .enumerate()
                    .filter_map(|(col, value)| value.clone().map(|v| (col + 1, v)))
                    .collect(),
            })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest of the header row and the data rows
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub row_number: usize,
    pub cells: Vec<(usize, String)>,
}
