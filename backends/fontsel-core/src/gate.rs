// this_file: backends/fontsel-core/src/gate.rs

//! Re-entrancy suppression for update callbacks.
//!
//! Every guarded entry point checks [`UpdateGate::is_suppressed`] first and
//! returns without side effects when it is set. The entry point doing the
//! real work holds a [`SuppressionGuard`] for the duration of its mutations,
//! so the updates those mutations trigger observe the flag and no-op.

use std::sync::atomic::{AtomicBool, Ordering};

/// Per selector-context suppression flag.
///
/// Hosts share it (usually behind an `Arc`) with the callbacks that must
/// observe it.
#[derive(Debug, Default)]
pub struct UpdateGate {
    suppressed: AtomicBool,
}

impl UpdateGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }

    /// Set the flag until the returned guard is dropped.
    ///
    /// The guard restores the value it found, so a nested acquisition leaves
    /// clearing to the outermost holder.
    pub fn suppress(&self) -> SuppressionGuard<'_> {
        let previous = self.suppressed.swap(true, Ordering::SeqCst);
        SuppressionGuard {
            gate: self,
            previous,
        }
    }

    /// Run `body` with the flag set. The flag is restored on every exit path,
    /// unwinding included.
    pub fn with_suppression<T>(&self, body: impl FnOnce() -> T) -> T {
        let _guard = self.suppress();
        body()
    }
}

/// Scoped hold on an [`UpdateGate`].
#[must_use = "suppression ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SuppressionGuard<'a> {
    gate: &'a UpdateGate,
    previous: bool,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.gate.suppressed.store(self.previous, Ordering::SeqCst);
    }
}
