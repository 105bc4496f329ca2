//! Loom model tests for the index protocol. Run with
//! `RUSTFLAGS="--cfg spscring_loom" cargo test --release loom`.
use crate::spsc::{new_bounded, Consumer, Producer};

#[test]
fn loom_spsc_publishes_elements_in_order() {
    loom::model(|| {
        let (mut producer, mut consumer) = new_bounded::<usize, 4>();

        let th = loom::thread::spawn(move || {
            for i in 0..3 {
                producer.maybe_push(i).unwrap();
            }
        });

        let mut next = 0;

        while next < 3 {
            match consumer.pop() {
                Some(value) => {
                    // The acquire load of `rear` must make the element fully
                    // visible, and FIFO order must hold.
                    assert_eq!(value, next);

                    next += 1;
                }
                None => loom::thread::yield_now(),
            }
        }

        th.join().unwrap();
    });
}

#[test]
fn loom_spsc_rejected_push_has_no_effect() {
    loom::model(|| {
        // Capacity 2 means a single usable slot.
        let (mut producer, mut consumer) = new_bounded::<usize, 2>();

        producer.maybe_push(1).unwrap();

        let th = loom::thread::spawn(move || producer.maybe_push(2).is_ok());

        assert_eq!(consumer.pop(), Some(1));

        let pushed = th.join().unwrap();

        // The second push either observed the vacated slot or was rejected
        // without a trace.
        match consumer.pop() {
            Some(value) => {
                assert!(pushed);
                assert_eq!(value, 2);
            }
            None => assert!(!pushed),
        }
    });
}
