//! Bindings used when running under loom. Loom's atomics already provide
//! `unsync_load`, so they can be re-exported as-is.

pub mod hint {
    pub use loom::hint::spin_loop;
}

pub mod sync {
    pub use loom::sync::{Arc, Mutex};

    pub mod atomic {
        pub use loom::sync::atomic::{fence, AtomicUsize};
        pub use std::sync::atomic::Ordering;
    }
}

pub mod thread {
    pub use loom::thread::{spawn, yield_now, JoinHandle};
}
