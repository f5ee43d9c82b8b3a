//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, db::DbCommands, import::ImportArgs, init::InitArgs,
    list::ListArgs, template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Warband item catalog")]
#[command(long_about = "Reference tables of tabletop wargame items, with a CSV bulk importer and read-only listings.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .warband/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new catalog project
    Init(InitArgs),

    /// Import items from a CSV file, keyed by die_roll
    Import(ImportArgs),

    /// List the rows of a catalog table
    List(ListArgs),

    /// Print a CSV header and example row for an item type
    Template(TemplateArgs),

    /// Inspect the catalog database
    #[command(subcommand)]
    Db(DbCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default, falling back to a table
    #[default]
    Auto,
    /// Bordered table
    Table,
    /// JSON array with every stored field
    Json,
    /// CSV with importable column names
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
}
