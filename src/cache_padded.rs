//! Provides cache-padded atomic types.
use crate::loom_bindings::sync::atomic::AtomicUsize;
use core::ops::Deref;
use std::mem::MaybeUninit;

// Cache line sizes per architecture. On modern x86_64 and aarch64 the
// prefetcher pulls pairs of lines, so 128 bytes is used there.
#[cfg(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "arm64ec",
    target_arch = "powerpc64",
))]
const ALIGN: usize = 128;

#[cfg(any(
    target_arch = "arm",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "hexagon",
))]
const ALIGN: usize = 32;

#[cfg(target_arch = "s390x")]
const ALIGN: usize = 256;

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "arm64ec",
    target_arch = "powerpc64",
    target_arch = "arm",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "hexagon",
    target_arch = "s390x",
)))]
const ALIGN: usize = 64;

macro_rules! generate_cache_padded_atomic {
    ($name:ident, $atomic:ident) => {
        /// Cache padded atomic. Can be dereferenced to the inner atomic.
        pub struct $name {
            atomic: $atomic,
            _pad: MaybeUninit<
                [u8; if size_of::<$atomic>() > ALIGN {
                    0
                } else {
                    ALIGN - size_of::<$atomic>()
                }],
            >,
        }

        impl $name {
            /// Creates a new cache padded atomic.
            pub fn new() -> Self {
                Self {
                    atomic: $atomic::new(0),
                    _pad: MaybeUninit::uninit(),
                }
            }
        }

        impl Deref for $name {
            type Target = $atomic;

            fn deref(&self) -> &Self::Target {
                &self.atomic
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

generate_cache_padded_atomic!(CachePaddedAtomicUsize, AtomicUsize);
