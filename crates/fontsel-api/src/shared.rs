// this_file: crates/fontsel-api/src/shared.rs

//! Thread-safe wrapper for hosts that dispatch updates from several threads.
//!
//! Every entry point runs under one lock, which serializes cache mutation,
//! the suppression flag and whole propagation passes per selector.

use crate::selector::FontSelector;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable, lock-protected [`FontSelector`].
#[derive(Clone)]
pub struct SharedSelector {
    inner: Arc<Mutex<FontSelector>>,
}

impl SharedSelector {
    pub fn new(selector: FontSelector) -> Self {
        Self {
            inner: Arc::new(Mutex::new(selector)),
        }
    }

    /// Lock the selector for one or more entry point calls.
    pub fn lock(&self) -> MutexGuard<'_, FontSelector> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the selector.
    pub fn with<T>(&self, f: impl FnOnce(&mut FontSelector) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl From<FontSelector> for SharedSelector {
    fn from(selector: FontSelector) -> Self {
        Self::new(selector)
    }
}
