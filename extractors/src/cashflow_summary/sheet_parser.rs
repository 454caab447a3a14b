use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use shared_types::ExtractionError;

use super::table::{CellValue, SheetGrid};

/// Reads `.xlsx` workbook bytes into raw cell grids.
pub struct WorkbookParser;

impl WorkbookParser {
    pub fn new() -> Self {
        Self
    }

    /// Load the named sheet of the workbook as a raw grid. The whole
    /// workbook is buffered before processing begins.
    pub fn parse_sheet(
        &self,
        content: &[u8],
        sheet_name: &str,
    ) -> Result<SheetGrid, ExtractionError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))
            .map_err(|e| ExtractionError::Workbook(format!("Failed to open workbook: {}", e)))?;

        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            ExtractionError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        Ok(SheetGrid { rows })
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Bool(*flag),
        // Date-typed cells surface as ISO text so date-valued headers
        // flow through the calendar grammar.
        Data::DateTime(datetime) => match datetime.as_datetime() {
            Some(datetime) => CellValue::Text(datetime.format("%Y-%m-%d").to_string()),
            None => CellValue::Number(datetime.as_f64()),
        },
        Data::DateTimeIso(text) => CellValue::Text(text.clone()),
        Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
