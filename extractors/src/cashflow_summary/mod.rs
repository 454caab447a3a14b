mod date_parser;
mod flattener;
mod sheet_parser;
mod table;

pub use date_parser::{classify_header, DateRange};
pub use sheet_parser::WorkbookParser;
pub use table::{extract_table, CellValue, CleanedTable, SheetGrid};

use shared_types::{CashflowRecord, ExtractionError};

/// Layout contract of the cash-flow summary sheet: the structural
/// offsets and exclusion sets that decide which cells carry data. These
/// are configuration, not derived from the sheet.
#[derive(Debug, Clone)]
pub struct SummaryLayout {
    /// Worksheet holding the residential cash-flow summary.
    pub sheet_name: String,
    /// Title and metadata rows above the header row.
    pub skip_rows: usize,
    /// Leading label columns before the data block.
    pub skip_cols: usize,
    /// Administrative/total columns dropped from the cleaned table,
    /// matched exactly after trimming.
    pub excluded_columns: Vec<String>,
    /// Aggregate summary labels skipped both as rows and as data
    /// columns, matched on the lowercased trimmed form.
    pub excluded_labels: Vec<String>,
    /// Label prefix marking a sub-entity row, matched case-insensitively.
    pub tower_prefix: String,
}

impl Default for SummaryLayout {
    fn default() -> Self {
        Self {
            sheet_name: "CF Summary Resi- CTC".to_string(),
            skip_rows: 5,
            skip_cols: 4,
            excluded_columns: [
                "Total - Project",
                "Actual Incurred (Oct'20- Sep'23)",
                "Balance (Oct'23 Onwards)",
                "Pre-Tribeca Bal",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            excluded_labels: [
                "collection efficiency",
                "sales (# units)",
                "sales (area in sq ft)",
                "sales (in cr.)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tower_prefix: "tower".to_string(),
        }
    }
}

impl SummaryLayout {
    pub fn is_excluded_column(&self, header: &str) -> bool {
        let trimmed = header.trim();
        self.excluded_columns.iter().any(|column| column == trimmed)
    }

    pub fn is_excluded_label(&self, label: &str) -> bool {
        let lowered = label.trim().to_lowercase();
        self.excluded_labels.iter().any(|skip| *skip == lowered)
    }

    pub fn is_tower_label(&self, label: &str) -> bool {
        label.trim().to_lowercase().starts_with(&self.tower_prefix)
    }
}

/// Extracts normalized cash-flow records from a residential cash-flow
/// summary workbook.
pub struct CashflowSummaryExtractor {
    workbook_parser: WorkbookParser,
    layout: SummaryLayout,
}

impl CashflowSummaryExtractor {
    /// Create an extractor with a custom sheet layout.
    pub fn new(layout: SummaryLayout) -> Self {
        Self {
            workbook_parser: WorkbookParser::new(),
            layout,
        }
    }

    /// Create an extractor for the documented summary layout.
    pub fn with_defaults() -> Self {
        Self::new(SummaryLayout::default())
    }

    /// Full pipeline: workbook bytes -> raw grid -> cleaned table ->
    /// flat records, in sheet order.
    pub fn process_workbook(
        &self,
        content: &[u8],
        project_id: i64,
    ) -> Result<Vec<CashflowRecord>, ExtractionError> {
        let grid = self
            .workbook_parser
            .parse_sheet(content, &self.layout.sheet_name)?;
        self.process_grid(&grid, project_id)
    }

    /// Grid-level entry point for callers that already hold the raw
    /// cell grid.
    pub fn process_grid(
        &self,
        grid: &SheetGrid,
        project_id: i64,
    ) -> Result<Vec<CashflowRecord>, ExtractionError> {
        let table = table::extract_table(grid, &self.layout)?;
        flattener::flatten_rows(&table, project_id, &self.layout)
    }
}
