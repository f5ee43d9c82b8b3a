//! CLI command implementations

pub mod completions;
pub mod db;
pub mod import;
pub mod init;
pub mod list;
pub mod template;
