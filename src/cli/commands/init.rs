//! `catalog init` command - Initialize a new catalog project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};
use crate::core::{CatalogStore, Config};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite the config even if .warband/ already exists (data is kept)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            let config = Config::load(Some(&project));
            let db_path = project.database_path(config.database.as_deref());
            CatalogStore::open(&db_path).into_diagnostic()?;

            println!(
                "{} Initialized catalog project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!("  Database: {}", style(db_path.display()).dim());
            println!();
            println!("Next steps:");
            println!(
                "  {} Print a CSV header for an item type",
                style("catalog template greaterpotion").yellow()
            );
            println!(
                "  {} Import a spreadsheet",
                style("catalog import greaterpotion potions.csv").yellow()
            );
            println!(
                "  {} Show what was imported",
                style("catalog list greater-potion").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} Catalog project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("catalog init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
