// this_file: backends/fontsel-core/src/favorites.rs

//! Favorite families persisted as a JSON document.
//!
//! The document has the shape `{"favorites": ["Family", ...]}`. Reads treat
//! a missing or malformed document as empty; writes replace the whole file
//! atomically (temp file in the same directory, then rename).

use crate::{FontselError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;

/// Ordered set of favorite family names, kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSet {
    #[serde(default)]
    favorites: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.into();
            if !set.contains(&name) {
                set.favorites.push(name);
            }
        }
        set
    }

    /// Parse a favorites document, collapsing any duplicate entries.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: FavoriteSet = serde_json::from_slice(bytes)?;
        Ok(Self::from_names(raw.favorites))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.favorites.iter().any(|f| f == name)
    }

    /// Add `name` at the end, moving it there if already present.
    pub fn insert(&mut self, name: &str) {
        self.remove(name);
        self.favorites.push(name.to_owned());
    }

    /// Remove every occurrence of `name`. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != name);
        before != self.favorites.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}

/// Reads and writes the favorites document at a fixed path.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    path: Utf8PathBuf,
}

impl FavoriteStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the persisted set. Missing or unreadable documents yield an empty set.
    pub fn load(&self) -> FavoriteSet {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return FavoriteSet::new(),
            Err(e) => {
                log::warn!("Failed to read favorites {}: {}", self.path, e);
                return FavoriteSet::new();
            }
        };

        match FavoriteSet::from_json(&bytes) {
            Ok(set) => {
                log::debug!("Loaded {} favorite(s) from {}", set.len(), self.path);
                set
            }
            Err(e) => {
                log::warn!("Ignoring malformed favorites {}: {}", self.path, e);
                FavoriteSet::new()
            }
        }
    }

    /// Overwrite the document with `set`.
    pub fn save(&self, set: &FavoriteSet) -> Result<()> {
        let contents = set.to_json()?;
        self.write_atomic(contents.as_bytes())
            .map_err(|source| FontselError::PersistenceFailure {
                path: self.path.clone(),
                source,
            })?;
        log::debug!("Saved {} favorite(s) to {}", set.len(), self.path);
        Ok(())
    }

    /// Read-modify-write a single family's membership.
    pub fn toggle_favorite(&self, family: &str, is_favorite: bool) -> Result<FavoriteSet> {
        let mut set = self.load();
        if is_favorite {
            set.insert(family);
        } else {
            set.remove(family);
        }
        self.save(&set)?;
        Ok(set)
    }

    fn write_atomic(&self, contents: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
