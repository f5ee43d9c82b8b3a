//! `catalog db` command - Inspect the catalog database
//!
//! The database lives at `.warband/catalog.db` unless the config points
//! elsewhere. Both subcommands only read from it.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_catalog;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Show database location, schema version and row counts
    Status,

    /// Execute a read-only SQL query (TSV unless --format json/csv)
    Query {
        /// SQL query to execute
        sql: String,
    },
}

pub fn run(cmd: DbCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DbCommands::Status => run_status(global),
        DbCommands::Query { sql } => run_query(&sql, global),
    }
}

fn run_status(global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let counts = catalog.store.table_counts().into_diagnostic()?;
    let version = catalog.store.schema_version().into_diagnostic()?;

    if global.format == OutputFormat::Json {
        let json = serde_json::json!({
            "location": catalog.store.path().map(|p| p.display().to_string()),
            "schema_version": version,
            "tables": counts,
        });
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style("Catalog Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Project:         {}", catalog.project.root().display());
    if let Some(path) = catalog.store.path() {
        println!("  Location:        {}", path.display());
    }
    println!("  Schema version:  {}", style(version).cyan());
    println!();
    println!("  {}", style("Rows:").bold());
    for (table, count) in &counts {
        println!("    {:<26} {}", table, count);
    }

    Ok(())
}

fn run_query(sql: &str, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let (columns, rows) = catalog.store.query_raw(sql).into_diagnostic()?;

    match global.format {
        OutputFormat::Json => {
            let json_rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let obj: serde_json::Map<String, serde_json::Value> = columns
                        .iter()
                        .zip(row)
                        .map(|(col, val)| (col.clone(), serde_json::Value::String(val.clone())))
                        .collect();
                    serde_json::Value::Object(obj)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_rows).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(&columns).into_diagnostic()?;
            for row in &rows {
                writer.write_record(row).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        _ => {
            println!("{}", columns.join("\t"));
            for row in &rows {
                println!("{}", row.join("\t"));
            }
        }
    }

    Ok(())
}
