// this_file: backends/fontsel-core/src/error.rs

//! Error types for fontsel.
//!
//! None of these are fatal to the host: each one is recoverable at the
//! boundary of a single update operation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Main error type for fontsel operations.
#[derive(Error, Debug)]
pub enum FontselError {
    /// A variant's backing file is missing or could not be loaded.
    #[error("Font resource '{name}' not found at {path}: {reason}")]
    ResourceNotFound {
        name: String,
        path: Utf8PathBuf,
        reason: String,
    },

    /// The favorites document could not be written.
    #[error("Failed to persist favorites to {path}: {source}")]
    PersistenceFailure {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A family index outside the catalog bounds.
    #[error("Family index {index} out of range (catalog holds {len} families)")]
    FamilyIndexOutOfRange { index: usize, len: usize },

    /// A variant identifier the family does not contain.
    #[error("Family '{family}' has no variant '{variant}'")]
    UnknownVariant { family: String, variant: String },

    /// A variant was requested before any family was selected.
    #[error("No font family selected")]
    NoFamilySelected,

    /// A family name absent from the catalog.
    #[error("Unknown font family '{0}'")]
    UnknownFamily(String),

    /// File exists but does not parse as a font.
    #[error("Invalid font file at {path}: {reason}")]
    InvalidFont { path: Utf8PathBuf, reason: String },

    /// Malformed configuration file.
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: Utf8PathBuf, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FontselError {
    /// Build a [`FontselError::ResourceNotFound`] from any displayable cause.
    pub fn not_found(
        name: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::ResourceNotFound {
            name: name.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors the UI should surface as a non-fatal notice.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::PersistenceFailure { .. }
        )
    }
}
