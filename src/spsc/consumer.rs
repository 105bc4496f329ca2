//! This module provides the [`Consumer`] trait for the single-producer,
//! single-consumer queue.

/// A consumer of the single-producer, single-consumer queue.
///
/// Because it is the only consumer, it can pop values very quickly.
pub trait Consumer<T> {
    /// Returns the capacity of the queue, including the sentinel slot.
    ///
    /// One slot is kept as a sentinel gap, so at most `capacity() - 1`
    /// values can be live at a time.
    fn capacity(&self) -> usize;

    /// Returns the length of the queue.
    ///
    /// The producer may push concurrently, so the result is stale the
    /// instant it returns. Treat it as a hint.
    fn len(&self) -> usize;

    /// Returns whether the queue looks empty. A hint, like
    /// [`len`](Self::len), but a `false` result stays valid until this
    /// consumer pops: only the producer can occupy slots, never free them.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pops the oldest value from the queue, or returns `None` if the queue
    /// is empty.
    fn pop(&mut self) -> Option<T>;

    /// Returns a reference to the oldest value without popping it, or `None`
    /// if the queue is empty.
    ///
    /// Repeated calls without an intervening [`pop`](Self::pop) observe the
    /// same value. The borrow ends before the next `pop` can run.
    fn peek(&self) -> Option<&T>;

    /// Like [`peek`](Self::peek), but the value can be mutated in place.
    fn peek_mut(&mut self) -> Option<&mut T>;
}
