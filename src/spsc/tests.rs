use crate::backoff::Backoff;
use crate::spsc::{new_bounded, new_compact_bounded};
use crate::test_lock::TEST_LOCK;
use crate::{Consumer as ConsumerExt, Producer as ProducerExt};
use std::thread::spawn;

fn test_spsc_fifo_exactly_once<Producer, Consumer>(creator: fn() -> (Producer, Consumer))
where
    Producer: ProducerExt<usize> + Send + 'static,
    Consumer: ConsumerExt<usize> + Send + 'static,
{
    const N: usize = 1_000_000;

    let (mut producer, mut consumer) = creator();

    // Producer thread.
    //
    // Push all numbers from 0 to N, retrying with backoff when full. Retry
    // policy lives with the caller: the queue itself never waits.
    let t0 = spawn(move || {
        let backoff = Backoff::new();

        for i in 0..N {
            while producer.maybe_push(i).is_err() {
                backoff.snooze();
            }

            backoff.reset();
        }
    });

    // Consumer thread.
    //
    // Record the received sequence, retrying with backoff when empty.
    let t1 = spawn(move || {
        let backoff = Backoff::new();
        let mut received = Vec::with_capacity(N);

        while received.len() < N {
            match consumer.pop() {
                Some(value) => {
                    received.push(value);

                    backoff.reset();
                }
                None => backoff.snooze(),
            }
        }

        received
    });

    t0.join().unwrap();
    let received = t1.join().unwrap();

    // Every accepted value is delivered exactly once, in push order.
    assert_eq!(received.len(), N);

    for (expected, got) in received.into_iter().enumerate() {
        assert_eq!(got, expected);
    }
}

fn test_spsc_peek_agrees_with_pop<Producer, Consumer>(creator: fn() -> (Producer, Consumer))
where
    Producer: ProducerExt<usize> + Send + 'static,
    Consumer: ConsumerExt<usize> + Send + 'static,
{
    const N: usize = 100_000;

    let (mut producer, mut consumer) = creator();

    let t0 = spawn(move || {
        let backoff = Backoff::new();

        for i in 0..N {
            while producer.maybe_push(i).is_err() {
                backoff.snooze();
            }

            backoff.reset();
        }
    });

    let t1 = spawn(move || {
        let backoff = Backoff::new();
        let mut popped = 0;

        while popped < N {
            // A non-empty peek stays valid for this consumer until it pops,
            // no matter what the producer does in between.
            let Some(&peeked) = consumer.peek() else {
                backoff.snooze();

                continue;
            };

            assert_eq!(peeked, popped);
            assert_eq!(consumer.pop(), Some(peeked));

            popped += 1;

            backoff.reset();
        }

        assert_eq!(consumer.pop(), None);
    });

    t0.join().unwrap();
    t1.join().unwrap();
}

#[test]
fn test_bounded_spsc_fifo_exactly_once() {
    let test_guard = TEST_LOCK.lock();

    test_spsc_fifo_exactly_once(new_bounded::<usize, 256>);

    println!("Cache padded done, start compact");

    test_spsc_fifo_exactly_once(new_compact_bounded::<usize, 256>);

    drop(test_guard);
}

#[test]
fn test_bounded_spsc_peek_agrees_with_pop() {
    let test_guard = TEST_LOCK.lock();

    test_spsc_peek_agrees_with_pop(new_bounded::<usize, 64>);

    println!("Cache padded done, start compact");

    test_spsc_peek_agrees_with_pop(new_compact_bounded::<usize, 64>);

    drop(test_guard);
}

#[test]
fn test_bounded_spsc_tiny_capacity_cross_thread() {
    let test_guard = TEST_LOCK.lock();

    // Capacity 2 means a single usable slot: the threads strictly alternate.
    test_spsc_fifo_exactly_once(new_bounded::<usize, 2>);

    drop(test_guard);
}
