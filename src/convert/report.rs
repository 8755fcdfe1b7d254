//! Aggregate counters for one conversion run.
//!
//! The report is accumulated as a return value through the conversion pass
//! rather than held in global state, so the document transform stays pure and
//! testable in isolation.

/// Counters and per-row diagnostics collected across all COPY blocks
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// COPY blocks found in the document
    pub total_tables: u64,
    /// Rows successfully converted to INSERT values
    pub total_rows: u64,
    /// Blocks that produced no INSERT (empty data or every row rejected)
    pub skipped_tables: u64,
    /// One diagnostic per row dropped by the strict arity check
    pub errors: Vec<String>,
}

impl ConversionReport {
    /// Whether any rows were dropped during conversion
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
