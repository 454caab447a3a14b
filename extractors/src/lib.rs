//! Extractors Crate
//!
//! This crate turns semi-structured financial workbooks into flat,
//! typed records. Its single extractor handles the residential
//! cash-flow summary layout: a sheet with irregular, human-authored
//! period headers and visually grouped rows.
//!
//! # Architecture
//!
//! - **Types**: Record and error types are defined in the `shared-types` crate
//! - **Implementation**: The extraction pipeline lives in this crate
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::CashflowSummaryExtractor;
//!
//! let extractor = CashflowSummaryExtractor::with_defaults();
//! let records = extractor.process_workbook(&workbook_bytes, project_id)?;
//! ```

pub mod cashflow_summary;

// Re-export commonly used types
pub use cashflow_summary::{CashflowSummaryExtractor, SummaryLayout};
