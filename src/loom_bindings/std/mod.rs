mod atomic_usize;
mod mutex;

pub mod hint {
    pub use std::hint::spin_loop;
}

pub mod sync {
    pub use std::sync::Arc;

    pub use crate::loom_bindings::std::mutex::Mutex;

    pub mod atomic {
        pub use crate::loom_bindings::std::atomic_usize::AtomicUsize;
        pub use std::sync::atomic::{fence, Ordering};
    }
}

pub mod thread {
    #[inline]
    pub fn yield_now() {
        std::thread::yield_now();
    }

    pub use std::thread::{spawn, JoinHandle};
}
