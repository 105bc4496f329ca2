//! This module abstracts over `loom` and `std::sync` depending on whether we
//! are running loom model tests or not.

#![allow(unused, reason = "Not every binding is used in both configurations.")]

#[cfg(not(all(test, spscring_loom)))]
mod std;
#[cfg(not(all(test, spscring_loom)))]
pub use self::std::*;

#[cfg(all(test, spscring_loom))]
mod mocked;
#[cfg(all(test, spscring_loom))]
pub use self::mocked::*;
