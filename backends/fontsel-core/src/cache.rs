// this_file: backends/fontsel-core/src/cache.rs

//! Resource cache mapping variants to live, validated font handles.
//!
//! The cache owns exactly one handle per entry, so the number of users of an
//! entry is its strong count minus one. A freshly loaded handle has no users
//! until an entity stores a clone of it.

use crate::traits::{FileSystem, FontLoader};
use crate::types::{FontHandle, FontResource, FontVariant};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of loaded font resources keyed by resource name.
pub struct ResourceCache {
    loader: Arc<dyn FontLoader>,
    fs: Arc<dyn FileSystem>,

    /// Loaded handles
    entries: HashMap<String, FontHandle>,

    /// Always-present default resource, never collected
    builtin: Option<FontHandle>,

    hits: u64,
    loads: u64,
    evictions: u64,
}

impl ResourceCache {
    /// Create an empty cache over the given loader and filesystem.
    pub fn new(loader: Arc<dyn FontLoader>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            loader,
            fs,
            entries: HashMap::new(),
            builtin: None,
            hits: 0,
            loads: 0,
            evictions: 0,
        }
    }

    /// Resolve a variant to a valid handle, loading it if necessary.
    ///
    /// A cached entry whose file no longer exists is evicted and reloaded;
    /// a stale handle is never returned. Load failures are not cached.
    pub fn resolve(&mut self, variant: &FontVariant) -> Result<FontHandle> {
        let name = variant.resource_name.as_str();

        if let Some(handle) = self.entries.get(name) {
            if self.fs.exists(handle.filepath()) {
                self.hits += 1;
                return Ok(Arc::clone(handle));
            }
            log::debug!(
                "Cached font '{}' lost its file {}, evicting",
                name,
                handle.filepath()
            );
            self.evict(name);
        }

        log::debug!("Loading font '{}' from {}", name, variant.filepath);
        let resource = self.loader.load(variant).map_err(|e| {
            log::warn!("Unable to load font '{}': {}", name, e);
            e
        })?;

        let handle = Arc::new(resource);
        self.entries.insert(name.to_owned(), Arc::clone(&handle));
        self.loads += 1;
        Ok(handle)
    }

    /// Register the always-present default resource.
    pub fn insert_builtin(&mut self, resource: FontResource) -> FontHandle {
        let handle = Arc::new(resource);
        self.builtin = Some(Arc::clone(&handle));
        handle
    }

    /// The default resource, if one was registered.
    pub fn builtin(&self) -> Option<&FontHandle> {
        self.builtin.as_ref()
    }

    /// Get a cached handle (or the builtin) by name without validation.
    pub fn get(&self, name: &str) -> Option<&FontHandle> {
        self.entries
            .get(name)
            .or_else(|| self.builtin.as_ref().filter(|b| b.name() == name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of references held outside the cache.
    pub fn users(&self, name: &str) -> Option<usize> {
        self.entries
            .get(name)
            .map(|handle| Arc::strong_count(handle) - 1)
    }

    /// Drop the entry for `name`. Entities holding the handle keep it alive.
    pub fn evict(&mut self, name: &str) -> bool {
        let removed = self.entries.remove(name).is_some();
        if removed {
            self.evictions += 1;
        }
        removed
    }

    /// Evict every entry nothing else references. Returns the evicted count.
    pub fn garbage_collect(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, handle| Arc::strong_count(handle) > 1);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            log::debug!("Collected {} unused font(s)", evicted);
        }
        self.evictions += evicted as u64;
        evicted
    }

    /// Drop all entries. The builtin resource is kept.
    pub fn clear(&mut self) {
        self.evictions += self.entries.len() as u64;
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            loads: self.loads,
            evictions: self.evictions,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub loads: u64,
    pub evictions: u64,
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::types::FontData;
    use crate::FontselError;
    use camino::{Utf8Path, Utf8PathBuf};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Loader that succeeds for any path the shared filesystem knows about.
    pub struct MemoryLoader {
        pub fs: Arc<MemoryFileSystem>,
    }

    impl FontLoader for MemoryLoader {
        fn load(&self, variant: &FontVariant) -> Result<FontResource> {
            let (name, path) = (variant.resource_name.as_str(), variant.filepath.as_path());
            if !self.fs.exists(path) {
                return Err(FontselError::not_found(name, path, "no such file"));
            }
            self.fs.loads.lock().unwrap().push(path.to_owned());
            Ok(FontResource::new(name, path, FontData::Owned(vec![0; 4]))
                .with_face_index(variant.face_index))
        }
    }

    #[derive(Default)]
    pub struct MemoryFileSystem {
        pub files: Mutex<HashSet<Utf8PathBuf>>,
        pub loads: Mutex<Vec<Utf8PathBuf>>,
    }

    impl MemoryFileSystem {
        pub fn with_files(paths: &[&str]) -> Arc<Self> {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .extend(paths.iter().map(Utf8PathBuf::from));
            Arc::new(fs)
        }

        pub fn remove(&self, path: &str) {
            self.files.lock().unwrap().remove(Utf8Path::new(path));
        }

        pub fn add(&self, path: &str) {
            self.files.lock().unwrap().insert(Utf8PathBuf::from(path));
        }

        pub fn load_count(&self) -> usize {
            self.loads.lock().unwrap().len()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn exists(&self, path: &Utf8Path) -> bool {
            self.files.lock().unwrap().contains(path)
        }
    }

    pub fn memory_cache(paths: &[&str]) -> (ResourceCache, Arc<MemoryFileSystem>) {
        let fs = MemoryFileSystem::with_files(paths);
        let loader = Arc::new(MemoryLoader { fs: Arc::clone(&fs) });
        (ResourceCache::new(loader, fs.clone()), fs)
    }
}
