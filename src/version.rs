//! Mutation version tracking.
//!
//! Single-threaded counter embedded in a set to detect structural changes
//! that happen while user code runs (a comparison callback that inserts or
//! removes keys on the same set). Take a `Snapshot` before handing control
//! to user code and ask `changed_since` afterwards.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance mutation counter. Bump it on every structural change with
/// `self.version.bump()`.
#[derive(Debug)]
pub struct MutationVersion {
    counter: Cell<u64>,
    // Keep !Send + !Sync in line with single-threaded design.
    _nosend: PhantomData<*mut ()>,
}

/// Opaque value of a `MutationVersion` at one point in time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Snapshot(u64);

impl MutationVersion {
    /// Create a new counter. Const so it can be a field default.
    pub const fn new() -> Self {
        Self {
            counter: Cell::new(0),
            _nosend: PhantomData,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.counter.get())
    }

    /// Record one structural change.
    #[inline]
    pub fn bump(&self) {
        self.counter.set(self.counter.get().wrapping_add(1));
    }

    /// True if any change was recorded after `snap` was taken.
    #[inline]
    pub fn changed_since(&self, snap: Snapshot) -> bool {
        self.counter.get() != snap.0
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.counter.get()
    }
}

impl Default for MutationVersion {
    fn default() -> Self {
        Self::new()
    }
}
