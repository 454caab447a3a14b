pub mod cashflow;
