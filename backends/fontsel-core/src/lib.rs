// this_file: backends/fontsel-core/src/lib.rs

//! Core types and logic for the fontsel font selector.
//!
//! - **cache**: variant → validated font handle, load/reuse/evict/collect
//! - **catalog**: families, ordered variants, filtering
//! - **gate**: re-entrancy suppression for update callbacks
//! - **sync**: applying a font change across an entity cohort
//! - **favorites**: the persisted favorites document

pub mod cache;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod favorites;
pub mod gate;
pub mod sync;
pub mod traits;
pub mod types;
pub mod utils;

pub use cache::{CacheStats, ResourceCache};
pub use catalog::FamilyCatalog;
pub use config::{SelectorConfig, DEFAULT_FONT_NAME};
pub use diagnostics::PropagationDiagnostics;
pub use error::FontselError;
pub use favorites::{FavoriteSet, FavoriteStore};
pub use gate::{SuppressionGuard, UpdateGate};
pub use sync::{PropagationReport, SyncEngine};
pub use traits::{FileSystem, FontLoader, TextEntity};
pub use types::{
    same_handle, DisplayOptions, EntityKind, FamilyFilter, FontData, FontFamily, FontHandle,
    FontResource, FontVariant, Selection, SelectorState,
};

/// Result type for fontsel operations
pub type Result<T> = std::result::Result<T, FontselError>;
