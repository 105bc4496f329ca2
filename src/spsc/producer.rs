//! This module provides the [`Producer`] trait for the single-producer,
//! single-consumer queue.

/// A producer of the single-producer, single-consumer queue.
///
/// Because it is the only producer, it can push values very quickly.
pub trait Producer<T> {
    /// Returns the capacity of the queue, including the sentinel slot.
    ///
    /// One slot is kept as a sentinel gap, so at most `capacity() - 1`
    /// values can be live at a time.
    fn capacity(&self) -> usize;

    /// Returns the length of the queue.
    ///
    /// The consumer may pop concurrently, so the result is stale the instant
    /// it returns. Treat it as a hint.
    fn len(&self) -> usize;

    /// Returns whether the queue looks empty. A hint, like [`len`](Self::len).
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the queue looks full. A hint, like [`len`](Self::len),
    /// but a `false` result stays valid until this producer pushes: only the
    /// consumer can free slots, never occupy them.
    #[inline]
    fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Returns the number of values that can be pushed before the queue is
    /// full.
    #[inline]
    fn free_slots(&self) -> usize {
        self.capacity() - 1 - self.len()
    }

    /// Pushes a value only if the queue is not full.
    /// It returns the value back if the queue is full, untouched.
    fn maybe_push(&mut self, value: T) -> Result<(), T>;

    /// Constructs a value directly in the queue's slot only if the queue is
    /// not full. It returns the initializer back if the queue is full,
    /// without calling it.
    ///
    /// If `init` panics, the panic propagates and the queue is left exactly
    /// as it was before the call.
    fn maybe_push_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<(), F>;
}
