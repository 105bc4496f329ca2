//! This module provides a single-producer single-consumer ring queue.
//!
//! It is implemented as a const bounded ring with one sentinel slot.
//! Use [`new_bounded`] (the two indices land on separate cache lines) or
//! [`new_compact_bounded`] (smaller, shared cache line), or use
//! [`RingQueue`] directly when the handles are not needed.
//!
//! It also contains the [`Producer`] and [`Consumer`] traits.
mod bounded;
mod consumer;
mod producer;
#[cfg(all(test, not(spscring_loom)))]
mod tests;

pub use bounded::*;
pub use consumer::*;
pub use producer::*;
