use std::collections::HashMap;

use shared_types::ExtractionError;

use super::SummaryLayout;

/// Scalar cell value from the raw workbook grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Trimmed text form used for row labels. `None` when the cell is
    /// empty or blank, which marks the row as carrying no data.
    pub fn as_label(&self) -> Option<String> {
        let text = self.to_display_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Display form of the cell, as used for the header row.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => {
                if number.is_finite() && number.fract() == 0.0 {
                    format!("{}", *number as i64)
                } else {
                    number.to_string()
                }
            }
            CellValue::Bool(flag) => flag.to_string(),
        }
    }

    /// Numeric coercion for data cells. Missing and non-numeric content
    /// both resolve to 0.0; booleans count as 0/1. Text is never parsed
    /// as a number, even when it looks like one.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(number) => *number,
            CellValue::Bool(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Empty | CellValue::Text(_) => 0.0,
        }
    }
}

/// Raw 2-D grid of cell values read from one worksheet, addressed by
/// zero-based (row, column).
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }
}

/// Tabular view of the summary sheet after the fixed structural offsets
/// and column exclusions are applied.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// Retained column headers in sheet order. The first is the label
    /// column, the rest are data columns.
    pub headers: Vec<String>,
    /// Data rows in sheet order, keyed by header. Order is meaningful:
    /// it encodes the category/tower grouping hierarchy.
    pub rows: Vec<HashMap<String, CellValue>>,
}

/// Apply the layout's structural offsets and column exclusions to the
/// raw grid: drop the title/metadata rows and leading label columns,
/// read the header row, drop excluded columns, and key every following
/// row by header.
pub fn extract_table(
    grid: &SheetGrid,
    layout: &SummaryLayout,
) -> Result<CleanedTable, ExtractionError> {
    if grid.height() < layout.skip_rows + 1 || grid.width() < layout.skip_cols + 1 {
        return Err(ExtractionError::Structural(format!(
            "Sheet needs at least {} rows and {} columns, got {}x{}",
            layout.skip_rows + 1,
            layout.skip_cols + 1,
            grid.height(),
            grid.width()
        )));
    }

    let header_row = &grid.rows[layout.skip_rows];
    let mut headers: Vec<String> = Vec::new();
    let mut kept_columns = Vec::new();

    for column in layout.skip_cols..grid.width() {
        let header = header_row
            .get(column)
            .map(CellValue::to_display_string)
            .unwrap_or_default()
            .trim()
            .to_string();
        if layout.is_excluded_column(&header) {
            continue;
        }
        // Repeated header: the first occurrence wins, keeping headers
        // unique after exclusion filtering.
        if headers.contains(&header) {
            continue;
        }
        headers.push(header);
        kept_columns.push(column);
    }

    let mut rows = Vec::new();
    for raw_row in grid.rows.iter().skip(layout.skip_rows + 1) {
        let mut row = HashMap::new();
        for (header, &column) in headers.iter().zip(&kept_columns) {
            let cell = raw_row.get(column).cloned().unwrap_or(CellValue::Empty);
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }

    Ok(CleanedTable { headers, rows })
}
