#![deny(clippy::all)]
#![deny(clippy::assertions_on_result_states)]
#![deny(clippy::allow_attributes_without_reason)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(
    clippy::missing_const_for_fn,
    reason = "Since we cannot make a constant function non-constant after its release,
    we need to look for a reason to make it constant, and not vice versa."
)]
#![allow(clippy::inline_always, reason = "We write highly optimized code.")]
#![allow(
    clippy::must_use_candidate,
    reason = "It is better to developer think about it."
)]
#![allow(
    clippy::module_name_repetitions,
    reason = "This is acceptable most of the time."
)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Unless the error is something special,
    the developer should document it."
)]
#![allow(clippy::redundant_pub_crate, reason = "It improves readability.")]
#![allow(clippy::if_not_else, reason = "It improves readability.")]
pub mod backoff;
pub mod cache_padded;
pub mod hints;
pub mod index;
pub mod light_arc;
#[cfg(all(spscring_loom, test))]
mod loom;
pub mod loom_bindings;
pub mod spsc;
#[cfg(not(spscring_loom))]
mod test_lock;

pub use backoff::Backoff;
pub use light_arc::LightArc;
pub use spsc::{Consumer, Producer};
