//! Invalidation channel for the streaming pipeline.
//!
//! Producers (observer movement, light attach/detach, region renders, manual
//! refresh requests) coalesce into a single dirty flag that the owning system
//! drains once per tick. Any number of posts within a tick cost one rebuild.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Why an invalidation was posted.
///
/// Carried for logging only; every reason triggers the same full rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationReason {
    ObserverMoved,
    LightAttached,
    LightDetached,
    RegionRendered,
    ManualRefresh,
}

/// Cloneable producer endpoint.
///
/// Hand one to every collaborator that can change the streamed light set; a
/// post from any of them bypasses the observer-movement check.
#[derive(Clone)]
pub struct InvalidationHandle {
    dirty: Arc<AtomicBool>,
}

impl InvalidationHandle {
    /// Mark the streamed buffer stale.
    pub fn post(&self, reason: InvalidationReason) {
        log::trace!("light buffer invalidated: {reason:?}");
        self.dirty.store(true, Ordering::Relaxed);
    }
}

/// Consumer side of the channel.
///
/// The tick is single-threaded; the flag is atomic only so handles can be
/// cloned into producers without borrowing the owning system. Relaxed
/// ordering is enough for a coalescing flag.
#[derive(Default)]
pub struct InvalidationBus {
    dirty: Arc<AtomicBool>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// New producer endpoint sharing this bus's flag.
    pub fn handle(&self) -> InvalidationHandle {
        InvalidationHandle {
            dirty: Arc::clone(&self.dirty),
        }
    }

    /// Post directly, without going through a handle.
    pub fn post(&self, reason: InvalidationReason) {
        log::trace!("light buffer invalidated: {reason:?}");
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Whether a rebuild is owed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Read and clear the flag. Called exactly once per tick by the consumer.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }
}
