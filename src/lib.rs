// this_file: src/lib.rs

//! fontsel: font family selection with shared-resource caching, cohort
//! synchronization and persisted favorites.
//!
//! This crate re-exports the workspace members:
//!
//! - [`core`]: cache, catalog, update gate, sync engine, favorites
//! - [`fs`]: memory-mapped loader and face probing
//! - [`fontdb`]: directory scanning into a catalog
//! - [`api`]: the guarded selector entry points

pub use fontsel_api as api;
pub use fontsel_core as core;
pub use fontsel_fontdb as fontdb;
pub use fontsel_fs as fs;

pub use fontsel_api::{Direction, FamilyRow, FontSelector, SharedSelector, UpdateOutcome};
pub use fontsel_core::{
    EntityKind, FamilyCatalog, FontHandle, FontselError, Result, SelectorConfig, SelectorState,
    TextEntity,
};

use fontsel_fontdb::FontScanner;
use fontsel_fs::{FsFontLoader, OsFileSystem};
use std::sync::Arc;

/// Scan the configured font directories and build a selector backed by the
/// real filesystem.
pub fn selector_from_config(config: SelectorConfig) -> FontSelector {
    let catalog = FontScanner::from_config(&config).scan();
    FontSelector::new(
        config,
        catalog,
        Arc::new(FsFontLoader::new()),
        Arc::new(OsFileSystem),
    )
}
