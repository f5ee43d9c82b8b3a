//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CatalogStore, Config, Project};

/// Everything a command needs to talk to the catalog
pub struct Catalog {
    pub project: Project,
    pub config: Config,
    pub store: CatalogStore,
}

/// Locate the project, load its config and open the database
pub fn open_catalog(global: &GlobalOpts) -> Result<Catalog> {
    let project =
        Project::locate(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load(Some(&project));
    let path = project.database_path(config.database.as_deref());
    let store = CatalogStore::open(&path).into_diagnostic()?;

    Ok(Catalog {
        project,
        config,
        store,
    })
}

/// Resolve `--format auto` against the configured default
pub fn effective_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }

    config
        .default_format
        .as_deref()
        .and_then(|s| <OutputFormat as clap::ValueEnum>::from_str(s, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(OutputFormat::Table)
}

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render an optional value, empty when absent
pub fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
