/// Extraction error types
///
/// Two failure tiers: `Structural` and `Workbook` are fatal to an
/// invocation and produce no partial output; per-cell and per-header
/// degradations never surface here (they resolve to empty dates or a
/// 0.0 value inside the pipeline).
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Input shape violation: grid smaller than the fixed layout
    /// offsets, or no usable columns after exclusion filtering.
    #[error("Structural error: {0}")]
    Structural(String),

    /// Unreadable workbook or missing sheet.
    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
