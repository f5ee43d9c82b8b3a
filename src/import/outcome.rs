//! Per-row outcomes and the run report

use crate::core::item::{ItemKind, ItemRecord};

/// Why a row could not be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The CSV record itself could not be read
    Malformed,
    /// The store rejected the values (negative number, missing name, ...)
    Constraint,
    /// Any other store failure
    Unexpected,
}

/// What happened to one data row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Created(ItemRecord),
    Updated {
        record: ItemRecord,
        /// Earlier record in the same file that wrote this die roll
        duplicate_of: Option<usize>,
    },
    Skipped(String),
    Failed { cause: FailureCause, reason: String },
}

/// A row outcome with enough context to fix the input by hand
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    /// 1-based record number, counting the header as record 1
    pub line: usize,
    /// Rendered row contents (empty when the record could not be read)
    pub row: String,
    pub outcome: RowOutcome,
}

impl RowReport {
    /// One-line description used for progress output
    pub fn message(&self) -> String {
        match &self.outcome {
            RowOutcome::Created(record) => format!("Created: {}", record.display_name()),
            RowOutcome::Updated {
                record,
                duplicate_of: None,
            } => format!("Updated: {}", record.display_name()),
            RowOutcome::Updated {
                record,
                duplicate_of: Some(earlier),
            } => format!(
                "Updated: {} (die_roll {} already written by row {})",
                record.display_name(),
                record.die_roll.unwrap_or_default(),
                earlier
            ),
            RowOutcome::Skipped(reason) => {
                format!("Skipping row with {}: {}", reason, self.row)
            }
            RowOutcome::Failed {
                cause: FailureCause::Malformed,
                reason,
            } => format!("Could not read row: {}", reason),
            RowOutcome::Failed {
                cause: FailureCause::Constraint,
                reason,
            } => format!(
                "Could not process row due to an integrity error: {}. Error: {}",
                self.row, reason
            ),
            RowOutcome::Failed {
                cause: FailureCause::Unexpected,
                reason,
            } => format!(
                "An unexpected error occurred for row: {}. Error: {}",
                self.row, reason
            ),
        }
    }
}

/// Tally of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub kind: ItemKind,
    pub rows_processed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
    /// One message per row, in file order
    pub messages: Vec<String>,
}

impl ImportReport {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            rows_processed: 0,
            created: 0,
            updated: 0,
            skipped: 0,
            errors: 0,
            messages: Vec::new(),
        }
    }

    pub fn record(&mut self, report: &RowReport) {
        self.rows_processed += 1;
        match report.outcome {
            RowOutcome::Created(_) => self.created += 1,
            RowOutcome::Updated { .. } => self.updated += 1,
            RowOutcome::Skipped(_) => self.skipped += 1,
            RowOutcome::Failed { .. } => self.errors += 1,
        }
        self.messages
            .push(format!("Row {}: {}", report.line, report.message()));
    }

    /// Summary line printed at the end of a run
    pub fn summary(&self) -> String {
        format!(
            "Import finished: {} created, {} updated.",
            self.created, self.updated
        )
    }
}
