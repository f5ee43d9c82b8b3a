//! Bulk CSV item importer
//!
//! Reads a comma-separated file with a header row and upserts each data row
//! into one item table, keyed by `die_roll`. Structural problems (unreadable
//! file, missing columns, unknown item type) abort before any row is touched;
//! everything that goes wrong with a single row is recorded as a
//! [`RowOutcome`] and the run carries on.
//!
//! Rows sharing a `die_roll` within one file are applied in order, so the last
//! one wins. Later duplicates are reported as updates that point back at the
//! earlier row.

mod coerce;
mod mapper;
mod outcome;
mod reader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::core::item::ItemKind;
use crate::core::store::ItemStore;

pub use coerce::parse_optional_int;
pub use mapper::{map_row, resolve_kind, MappedRow};
pub use outcome::{FailureCause, ImportReport, RowOutcome, RowReport};
pub use reader::{ImportReader, ImportRow, REQUIRED_COLUMNS};

/// Imports CSV files into the table for one item kind
#[derive(Debug, Clone, Copy)]
pub struct Importer {
    kind: ItemKind,
}

impl Importer {
    pub fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    /// Build an importer from a command-line tag such as `greaterpotion`
    pub fn for_tag(tag: &str) -> Result<Self, ImportError> {
        resolve_kind(tag).map(Self::new)
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Import every row of `path` into `store`
    ///
    /// `on_row` is called once per data row, in file order, as soon as the
    /// row's outcome is known.
    pub fn run<S, F>(&self, store: &mut S, path: &Path, mut on_row: F) -> Result<ImportReport, ImportError>
    where
        S: ItemStore + ?Sized,
        F: FnMut(&RowReport),
    {
        let mut reader = ImportReader::open(path)?;
        let mut report = ImportReport::new(self.kind);
        let mut first_seen: HashMap<i64, usize> = HashMap::new();

        tracing::debug!(
            kind = self.kind.tag(),
            path = %path.display(),
            columns = ?reader.headers(),
            "import header validated"
        );

        for (line, result) in reader.rows() {
            let row_report = match result {
                Ok(row) => self.import_row(store, line, &row, &mut first_seen),
                Err(e) => RowReport {
                    line,
                    row: String::new(),
                    outcome: RowOutcome::Failed {
                        cause: FailureCause::Malformed,
                        reason: e.to_string(),
                    },
                },
            };

            match &row_report.outcome {
                RowOutcome::Created(record) => {
                    tracing::debug!(line, id = record.id, "created item")
                }
                RowOutcome::Updated { record, .. } => {
                    tracing::debug!(line, id = record.id, "updated item")
                }
                RowOutcome::Skipped(reason) => tracing::warn!(line, %reason, "skipped row"),
                RowOutcome::Failed { cause, reason } => {
                    tracing::warn!(line, ?cause, %reason, "row failed")
                }
            }

            on_row(&row_report);
            report.record(&row_report);
        }

        tracing::debug!(
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            errors = report.errors,
            "import finished"
        );

        Ok(report)
    }

    fn import_row<S>(
        &self,
        store: &mut S,
        line: usize,
        row: &ImportRow,
        first_seen: &mut HashMap<i64, usize>,
    ) -> RowReport
    where
        S: ItemStore + ?Sized,
    {
        let described = row.describe();

        let Some(die_roll) = parse_optional_int(row.get("die_roll")) else {
            return RowReport {
                line,
                row: described,
                outcome: RowOutcome::Skipped("invalid or missing 'die_roll'".to_string()),
            };
        };

        let mapped = map_row(self.kind, die_roll, row);

        let outcome = match store.upsert_item(self.kind, mapped.die_roll, &mapped.defaults) {
            Ok((record, true)) => {
                first_seen.entry(die_roll).or_insert(line);
                RowOutcome::Created(record)
            }
            Ok((record, false)) => {
                let duplicate_of = first_seen.get(&die_roll).copied();
                first_seen.entry(die_roll).or_insert(line);
                RowOutcome::Updated {
                    record,
                    duplicate_of,
                }
            }
            Err(e) if e.is_constraint() => RowOutcome::Failed {
                cause: FailureCause::Constraint,
                reason: e.to_string(),
            },
            Err(e) => RowOutcome::Failed {
                cause: FailureCause::Unexpected,
                reason: e.to_string(),
            },
        };

        RowReport {
            line,
            row: described,
            outcome,
        }
    }
}

/// Failures that abort a whole import run
#[derive(Debug, Error, Diagnostic)]
pub enum ImportError {
    #[error("cannot open {path:?}: {source}")]
    #[diagnostic(
        code(catalog::import::file_access),
        help("check the path to the CSV file and its permissions")
    )]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read CSV header of {path:?}: {source}")]
    #[diagnostic(code(catalog::import::header))]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "CSV file must contain the following headers: {} (missing: {})",
        REQUIRED_COLUMNS.join(", "),
        .missing.join(", ")
    )]
    #[diagnostic(
        code(catalog::import::schema),
        help("generate a header line with `catalog template <item-type>`")
    )]
    Schema { missing: Vec<String> },

    #[error("invalid item type '{0}'")]
    #[diagnostic(
        code(catalog::import::configuration),
        help("valid item types: greaterpotion, lesserpotion, magicitem, magicweaponorarmour")
    )]
    Configuration(String),
}
