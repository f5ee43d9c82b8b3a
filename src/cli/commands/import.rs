//! `catalog import` command - Import items from CSV files

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;
use crate::import::{ImportReport, Importer, RowOutcome, RowReport};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Item type to load (greaterpotion, lesserpotion, magicitem, magicweaponorarmour)
    pub item_type: String,

    /// CSV file containing the item data
    pub file: PathBuf,

    /// Run the import and report outcomes without saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any row failed
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    // Item type is checked before the project or the file is touched
    let importer = Importer::for_tag(&args.item_type)?;
    let mut catalog = open_catalog(global)?;

    println!(
        "{} Starting import for {} from {}{}",
        style("→").blue(),
        style(importer.kind().display_name()).cyan(),
        style(args.file.display()).yellow(),
        if args.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );
    println!();

    let mut session = catalog.store.session().into_diagnostic()?;
    let report = importer.run(&mut session, &args.file, |row| {
        print_row(row, global.quiet)
    })?;

    if args.dry_run {
        session.rollback().into_diagnostic()?;
    } else {
        session.commit().into_diagnostic()?;
    }

    print_summary(&report, args.dry_run);

    if args.strict && report.errors > 0 {
        return Err(miette::miette!(
            "Import completed with {} error(s)",
            report.errors
        ));
    }

    Ok(())
}

fn print_row(row: &RowReport, quiet: bool) {
    let message = row.message();
    match &row.outcome {
        RowOutcome::Created(_) if !quiet => {
            println!("{} Row {}: {}", style("✓").green(), row.line, message)
        }
        RowOutcome::Updated { duplicate_of, .. } if !quiet => {
            let icon = if duplicate_of.is_some() {
                style("↻").magenta()
            } else {
                style("↻").yellow()
            };
            println!("{} Row {}: {}", icon, row.line, message)
        }
        RowOutcome::Created(_) | RowOutcome::Updated { .. } => {}
        RowOutcome::Skipped(_) => {
            eprintln!("{} Row {}: {}", style("!").yellow(), row.line, message)
        }
        RowOutcome::Failed { .. } => {
            eprintln!("{} Row {}: {}", style("✗").red(), row.line, message)
        }
    }
}

fn print_summary(report: &ImportReport, dry_run: bool) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed: {}", style(report.rows_processed).cyan());
    println!("  Created:        {}", style(report.created).green());
    println!("  Updated:        {}", style(report.updated).yellow());
    if report.skipped > 0 {
        println!("  Skipped:        {}", style(report.skipped).dim());
    }
    if report.errors > 0 {
        println!("  Errors:         {}", style(report.errors).red());
    }
    println!();
    println!("{}", style(report.summary()).green());

    if dry_run {
        println!(
            "{}",
            style("Dry run complete. No changes were saved.").yellow()
        );
    }
}
