//! Core module - catalog types, project layout, configuration and storage

pub mod config;
pub mod item;
pub mod project;
pub mod store;

pub use config::Config;
pub use item::{
    ItemDefaults, ItemKind, ItemRecord, RandomSpellRecord, TreasureRecord, UnknownItemKind,
    VariantFields,
};
pub use project::{Project, ProjectError};
pub use store::{CatalogStore, ImportSession, ItemStore, StoreError};
