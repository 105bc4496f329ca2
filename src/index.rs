//! Atomic index types used by the ring queue.
//!
//! The queue stores its `front` and `rear` indices already masked into
//! `[0, CAPACITY)`, so a plain `usize` atomic is always wide enough.
use crate::cache_padded::CachePaddedAtomicUsize;
use crate::loom_bindings::sync::atomic::AtomicUsize;
use std::ops::Deref;

/// The atomic type holding one ring index.
pub type IndexAtomic = AtomicUsize;

/// Cache padded [`IndexAtomic`].
///
/// Each index lands on its own cache line: `rear` is write-hot for the
/// producer and read-hot for the consumer, and vice versa for `front`, so
/// sharing a line would turn every push and pop into a coherence miss.
pub type CachePaddedIndexAtomic = CachePaddedAtomicUsize;

/// Non cache padded [`IndexAtomic`].
pub struct NotCachePaddedIndexAtomic(IndexAtomic);

impl Deref for NotCachePaddedIndexAtomic {
    type Target = IndexAtomic;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for NotCachePaddedIndexAtomic {
    fn default() -> Self {
        Self(IndexAtomic::new(0))
    }
}
