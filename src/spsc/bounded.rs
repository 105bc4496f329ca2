//! This module provides a single-producer single-consumer queue.
//!
//! It is implemented as a const bounded ring with one sentinel slot.
use crate::hints::unlikely;
use crate::index::{CachePaddedIndexAtomic, IndexAtomic, NotCachePaddedIndexAtomic};
use crate::light_arc::LightArc;
use crate::spsc::{Consumer, Producer};
use std::marker::PhantomData;
use std::mem::{needs_drop, MaybeUninit};
use std::ops::Deref;
use std::ptr;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

// Both indices are kept masked into `[0, CAPACITY)`. One slot stays vacant as
// a sentinel gap: `front == rear` means empty and `(rear + 1) & MASK == front`
// means full, so the two indices alone distinguish the two states and no
// shared length counter (which both threads would have to write) is needed.

/// The single-producer, single-consumer ring-based _const bounded_ queue.
///
/// It is safe to use when and only when only one thread is writing to the queue at the same time,
/// and only one thread is reading from the queue at the same time.
///
/// You can call `producer_` methods for the producer and `consumer_` methods for the consumer.
///
/// It accepts the atomic wrapper as a generic parameter.
/// It allows using cache-padded atomics or not.
/// You should create type aliases not to write this large type name.
///
/// `CAPACITY` must be a power of two and at least 2; invalid capacities are
/// rejected at compile time. One slot is kept as a sentinel gap, so at most
/// `CAPACITY - 1` values are live at a time.
///
/// # Using directly the [`RingQueue`] vs. using [`new_bounded`] or [`new_compact_bounded`].
///
/// The functions allocate the [`RingQueue`] on the heap in [`LightArc`] and provide separate
/// producer and consumer handles. It hurts the performance if you don't need to allocate the
/// queue separately, but the handles enforce the single-producer, single-consumer contract
/// statically.
///
/// It doesn't implement the [`Producer`] and [`Consumer`] traits because all producer and
/// consumer methods are unsafe (can be called only by one thread for each).
#[repr(C)]
pub struct RingQueue<
    T,
    const CAPACITY: usize,
    AtomicWrapper: Deref<Target = IndexAtomic> + Default = NotCachePaddedIndexAtomic,
> {
    rear: AtomicWrapper,
    front: AtomicWrapper,
    buffer: *mut [MaybeUninit<T>; CAPACITY],
}

impl<T, const CAPACITY: usize, AtomicWrapper: Deref<Target = IndexAtomic> + Default>
    RingQueue<T, CAPACITY, AtomicWrapper>
{
    const MASK: usize = CAPACITY - 1;

    /// Creates a new [`RingQueue`] with all slots uninitialized.
    ///
    /// This is the only allocation the queue ever performs.
    pub fn new() -> Self {
        // Evaluated at monomorphization: an invalid CAPACITY does not compile.
        const {
            assert!(
                CAPACITY >= 2 && CAPACITY.is_power_of_two(),
                "CAPACITY must be a power of two and at least 2"
            );
        }

        Self {
            buffer: Box::into_raw(Box::new([const { MaybeUninit::uninit() }; CAPACITY])),
            rear: AtomicWrapper::default(),
            front: AtomicWrapper::default(),
        }
    }

    /// Returns the capacity of the queue, including the sentinel slot.
    #[inline]
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Returns a pointer to the buffer.
    fn buffer_thin_ptr(&self) -> *const MaybeUninit<T> {
        unsafe { &*self.buffer }.as_ptr()
    }

    /// Returns a mutable pointer to the buffer.
    fn buffer_mut_thin_ptr(&self) -> *mut MaybeUninit<T> {
        unsafe { &mut *self.buffer }.as_mut_ptr()
    }

    /// Advances an index by one slot, wrapping at `CAPACITY`.
    #[inline]
    fn next(idx: usize) -> usize {
        idx.wrapping_add(1) & Self::MASK
    }

    /// Returns the number of live elements for the given index snapshot.
    #[inline]
    fn len(front: usize, rear: usize) -> usize {
        rear.wrapping_sub(front) & Self::MASK
    }
}

// Producer
impl<T, const CAPACITY: usize, AtomicWrapper: Deref<Target = IndexAtomic> + Default>
    RingQueue<T, CAPACITY, AtomicWrapper>
{
    /// Returns the number of elements in the queue.
    ///
    /// The consumer may pop concurrently, so the result can only overcount.
    ///
    /// # Safety
    ///
    /// The caller should be the only producer.
    #[inline]
    pub unsafe fn producer_len(&self) -> usize {
        let front = self.front.load(Relaxed);
        let rear = unsafe { self.rear.unsync_load() }; // only producer can change rear

        Self::len(front, rear)
    }

    /// Writes a value into the slot at `rear` and publishes it.
    ///
    /// # Safety
    ///
    /// The caller should be the only producer and the queue should not be full.
    #[inline(always)]
    pub unsafe fn push_unchecked(&self, value: T, rear: usize) {
        unsafe {
            self.buffer_mut_thin_ptr()
                .add(rear)
                .write(MaybeUninit::new(value));
        }

        // This `Release` publishes both the advanced index and the
        // just-written element to the consumer's `Acquire` load of `rear`.
        self.rear.store(Self::next(rear), Release);
    }

    /// Pushes a value into the queue, or returns it back if the queue is full.
    /// On `Err` the queue is untouched.
    ///
    /// # Safety
    ///
    /// The caller should be the only producer.
    #[inline]
    pub unsafe fn producer_maybe_push(&self, value: T) -> Result<(), T> {
        let rear = unsafe { self.rear.unsync_load() }; // only producer can change rear

        // Synchronizes with the consumer's `Release` store in pop: the slot
        // about to be overwritten has been observed vacated.
        let front = self.front.load(Acquire);

        if unlikely(Self::next(rear) == front) {
            return Err(value);
        }

        unsafe { self.push_unchecked(value, rear) };

        Ok(())
    }

    /// Constructs a value directly in the slot at `rear`, or returns the
    /// initializer back (uncalled) if the queue is full.
    ///
    /// If `init` panics, the panic propagates, the slot stays vacant and
    /// `rear` is not advanced: the queue is left exactly as before the call.
    ///
    /// # Safety
    ///
    /// The caller should be the only producer.
    #[inline]
    pub unsafe fn producer_maybe_push_with<F: FnOnce() -> T>(&self, init: F) -> Result<(), F> {
        let rear = unsafe { self.rear.unsync_load() }; // only producer can change rear
        let front = self.front.load(Acquire);

        if unlikely(Self::next(rear) == front) {
            return Err(init);
        }

        // `rear` is advanced only after `init` returns.
        unsafe { self.push_unchecked(init(), rear) };

        Ok(())
    }

    /// Returns whether the queue is full.
    ///
    /// The consumer may pop concurrently, so a `true` result is stale the
    /// instant it returns; a `false` result stays valid until this producer
    /// pushes.
    ///
    /// # Safety
    ///
    /// The caller should be the only producer.
    #[inline]
    pub unsafe fn producer_is_full(&self) -> bool {
        let rear = unsafe { self.rear.unsync_load() }; // only producer can change rear
        let front = self.front.load(Acquire);

        Self::next(rear) == front
    }
}

// Consumer
impl<T, const CAPACITY: usize, AtomicWrapper: Deref<Target = IndexAtomic> + Default>
    RingQueue<T, CAPACITY, AtomicWrapper>
{
    /// Returns the number of values in the queue.
    ///
    /// The producer may push concurrently, so the result can only undercount.
    ///
    /// # Safety
    ///
    /// The caller should be the only consumer.
    #[inline]
    pub unsafe fn consumer_len(&self) -> usize {
        let rear = self.rear.load(Relaxed);
        let front = unsafe { self.front.unsync_load() }; // only consumer can change front

        Self::len(front, rear)
    }

    /// Pops the oldest value from the queue, or returns `None` if the queue
    /// is empty.
    ///
    /// # Safety
    ///
    /// The caller should be the only consumer.
    #[inline]
    pub unsafe fn consumer_maybe_pop(&self) -> Option<T> {
        // Synchronizes with the producer's `Release` store in push: the
        // element about to be read has been fully written.
        let rear = self.rear.load(Acquire);
        let front = unsafe { self.front.unsync_load() }; // only consumer can change front

        if unlikely(rear == front) {
            return None;
        }

        let value = unsafe { self.buffer_thin_ptr().add(front).cast::<T>().read() };

        // This `Release` publishes the vacated slot to the producer's
        // `Acquire` load of `front`.
        self.front.store(Self::next(front), Release);

        Some(value)
    }

    /// Returns a reference to the oldest value without popping it, or `None`
    /// if the queue is empty. The same emptiness check and ordering pair as
    /// [`consumer_maybe_pop`](Self::consumer_maybe_pop), but `front` is not
    /// advanced.
    ///
    /// # Safety
    ///
    /// The caller should be the only consumer, and the reference must not
    /// outlive the next pop.
    #[inline]
    pub unsafe fn consumer_peek(&self) -> Option<&T> {
        let rear = self.rear.load(Acquire);
        let front = unsafe { self.front.unsync_load() }; // only consumer can change front

        if unlikely(rear == front) {
            return None;
        }

        Some(unsafe { &*self.buffer_thin_ptr().add(front).cast::<T>() })
    }

    /// Like [`consumer_peek`](Self::consumer_peek), but mutable.
    ///
    /// # Safety
    ///
    /// The caller should be the only consumer, the reference must not
    /// outlive the next pop, and no other reference to the front element may
    /// exist.
    #[inline]
    pub unsafe fn consumer_peek_mut(&self) -> Option<&mut T> {
        let rear = self.rear.load(Acquire);
        let front = unsafe { self.front.unsync_load() }; // only consumer can change front

        if unlikely(rear == front) {
            return None;
        }

        Some(unsafe { &mut *self.buffer_mut_thin_ptr().add(front).cast::<T>() })
    }

    /// Returns whether the queue is empty.
    ///
    /// The producer may push concurrently, so a `true` result is stale the
    /// instant it returns; a `false` result stays valid until this consumer
    /// pops.
    ///
    /// # Safety
    ///
    /// The caller should be the only consumer.
    #[inline]
    pub unsafe fn consumer_is_empty(&self) -> bool {
        let rear = self.rear.load(Acquire);
        let front = unsafe { self.front.unsync_load() }; // only consumer can change front

        rear == front
    }
}

impl<T, const CAPACITY: usize, AtomicWrapper: Deref<Target = IndexAtomic> + Default> Default
    for RingQueue<T, CAPACITY, AtomicWrapper>
{
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<T, const CAPACITY: usize, AtomicWrapper> Sync for RingQueue<T, CAPACITY, AtomicWrapper> where
    AtomicWrapper: Deref<Target = IndexAtomic> + Default
{
}
#[allow(clippy::non_send_fields_in_send_ty, reason = "We guarantee it is Send")]
unsafe impl<T, const CAPACITY: usize, AtomicWrapper> Send for RingQueue<T, CAPACITY, AtomicWrapper> where
    AtomicWrapper: Deref<Target = IndexAtomic> + Default
{
}

impl<T, const CAPACITY: usize, AtomicWrapper> Drop for RingQueue<T, CAPACITY, AtomicWrapper>
where
    AtomicWrapper: Deref<Target = IndexAtomic> + Default,
{
    fn drop(&mut self) {
        // While dropping there is no concurrency.

        if needs_drop::<T>() {
            let mut front = unsafe { self.front.unsync_load() };
            let rear = unsafe { self.rear.unsync_load() };

            // Only `[front, rear)` holds live elements; the other slots are
            // uninitialized and must not be dropped.
            while front != rear {
                unsafe {
                    ptr::drop_in_place(self.buffer_mut_thin_ptr().add(front).cast::<T>());
                }

                front = Self::next(front);
            }
        }

        unsafe { drop(Box::from_raw(self.buffer)) };
    }
}

/// Generates ring queue producer and consumer handles.
macro_rules! generate_ring_producer_and_consumer {
    ($producer_name:ident, $consumer_name:ident, $atomic_wrapper:ty) => {
        /// The producing half of a [`RingQueue`].
        pub struct $producer_name<T, const CAPACITY: usize> {
            inner: LightArc<RingQueue<T, CAPACITY, $atomic_wrapper>>,
            _non_sync: PhantomData<*const ()>,
        }

        impl<T: Send, const CAPACITY: usize> Producer<T> for $producer_name<T, CAPACITY> {
            #[inline]
            fn capacity(&self) -> usize {
                CAPACITY
            }

            #[inline]
            fn len(&self) -> usize {
                unsafe { self.inner.producer_len() }
            }

            #[inline]
            fn is_full(&self) -> bool {
                unsafe { self.inner.producer_is_full() }
            }

            #[inline]
            fn maybe_push(&mut self, value: T) -> Result<(), T> {
                unsafe { self.inner.producer_maybe_push(value) }
            }

            #[inline]
            fn maybe_push_with<F: FnOnce() -> T>(&mut self, init: F) -> Result<(), F> {
                unsafe { self.inner.producer_maybe_push_with(init) }
            }
        }

        unsafe impl<T: Send, const CAPACITY: usize> Send for $producer_name<T, CAPACITY> {}

        /// The consuming half of a [`RingQueue`].
        pub struct $consumer_name<T, const CAPACITY: usize> {
            inner: LightArc<RingQueue<T, CAPACITY, $atomic_wrapper>>,
            _non_sync: PhantomData<*const ()>,
        }

        impl<T: Send, const CAPACITY: usize> Consumer<T> for $consumer_name<T, CAPACITY> {
            #[inline]
            fn capacity(&self) -> usize {
                CAPACITY
            }

            #[inline]
            fn len(&self) -> usize {
                unsafe { self.inner.consumer_len() }
            }

            #[inline]
            fn is_empty(&self) -> bool {
                unsafe { self.inner.consumer_is_empty() }
            }

            #[inline]
            fn pop(&mut self) -> Option<T> {
                unsafe { self.inner.consumer_maybe_pop() }
            }

            #[inline]
            fn peek(&self) -> Option<&T> {
                unsafe { self.inner.consumer_peek() }
            }

            #[inline]
            fn peek_mut(&mut self) -> Option<&mut T> {
                unsafe { self.inner.consumer_peek_mut() }
            }
        }

        unsafe impl<T: Send, const CAPACITY: usize> Send for $consumer_name<T, CAPACITY> {}
    };

    ($producer_name:ident, $consumer_name:ident) => {
        generate_ring_producer_and_consumer!(
            $producer_name,
            $consumer_name,
            NotCachePaddedIndexAtomic
        );
    };
}

generate_ring_producer_and_consumer!(RingProducer, RingConsumer, CachePaddedIndexAtomic);

/// Creates a new single-producer, single-consumer ring queue with the given
/// capacity. Returns [`producer`](RingProducer) and [`consumer`](RingConsumer).
///
/// It accepts the capacity as a const generic parameter.
/// The capacity must be a power of two and at least 2; one slot is kept as a
/// sentinel gap, so at most `CAPACITY - 1` values are live at a time.
///
/// The `front` and `rear` indices are placed on separate cache lines:
/// `rear` is write-hot for the producer and read-hot for the consumer and
/// vice versa, so sharing a line would turn every push and pop into a
/// coherence miss. If you hold many queues and can sacrifice the throughput
/// for memory, use [`new_compact_bounded`].
///
/// Both handles are `Send` but not `Sync` and not `Clone`: the
/// single-producer, single-consumer contract is enforced statically.
///
/// # Examples
///
/// ```
/// use spscring::spsc::{new_bounded, Producer, Consumer};
///
/// let (mut producer, mut consumer) = new_bounded::<_, 256>();
///
/// producer.maybe_push(1).unwrap();
/// producer.maybe_push(2).unwrap();
///
/// assert_eq!(consumer.peek(), Some(&1));
/// assert_eq!(consumer.pop(), Some(1));
/// assert_eq!(consumer.pop(), Some(2));
/// assert_eq!(consumer.pop(), None);
/// ```
pub fn new_bounded<T, const CAPACITY: usize>(
) -> (RingProducer<T, CAPACITY>, RingConsumer<T, CAPACITY>) {
    let queue = LightArc::new(RingQueue::new());

    (
        RingProducer {
            inner: queue.clone(),
            _non_sync: PhantomData,
        },
        RingConsumer {
            inner: queue,
            _non_sync: PhantomData,
        },
    )
}

generate_ring_producer_and_consumer!(CompactRingProducer, CompactRingConsumer);

/// Creates a new single-producer, single-consumer ring queue with the given
/// capacity, without cache padding of the indices. Returns
/// [`producer`](CompactRingProducer) and [`consumer`](CompactRingConsumer).
///
/// Cache padding can improve the performance of the queue many times, but it
/// also requires more memory (likely 128 or 256 more bytes for the queue).
/// Unless you hold many queues, prefer [`new_bounded`].
pub fn new_compact_bounded<T, const CAPACITY: usize>(
) -> (CompactRingProducer<T, CAPACITY>, CompactRingConsumer<T, CAPACITY>) {
    let queue = LightArc::new(RingQueue::new());

    (
        CompactRingProducer {
            inner: queue.clone(),
            _non_sync: PhantomData,
        },
        CompactRingConsumer {
            inner: queue,
            _non_sync: PhantomData,
        },
    )
}
