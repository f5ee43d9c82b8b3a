//! Warband Catalog
//!
//! Reference tables of tabletop wargame items (potions, magic items,
//! weapons and armour, treasure, random spells) stored in SQLite, with a
//! CSV bulk importer and read-only listings.

pub mod cli;
pub mod core;
pub mod import;
pub mod logging;
