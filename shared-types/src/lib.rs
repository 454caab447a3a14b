pub mod cashflow;
pub mod extraction;

pub use cashflow::{CashflowRecord, PeriodKind};
pub use extraction::ExtractionError;
