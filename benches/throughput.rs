use criterion::{criterion_group, criterion_main, Criterion};
use spscring::spsc::{new_bounded, new_compact_bounded, Consumer, Producer};
use std::time::Instant;

// Single-threaded benchmark.
//
// `N` items are pushed and then popped from the queue.
fn push_pop<P, C, Creator, const N: usize>(name: &str, creator: Creator, c: &mut Criterion)
where
    P: Producer<usize>,
    C: Consumer<usize>,
    Creator: Fn() -> (P, C),
{
    let (mut producer, mut consumer) = creator();

    c.bench_function(&format!("push_pop-{name}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                for i in 0..N {
                    let _ = producer.maybe_push(i);
                }

                for _ in 0..N {
                    let _ = consumer.pop();
                }
            }

            start.elapsed() / N as u32
        })
    });
}

// Cross-thread benchmark.
//
// The producer thread streams items while this thread drains them; the
// reported time is per item.
fn cross_thread<P, C, Creator>(name: &str, creator: Creator, c: &mut Criterion)
where
    P: Producer<usize> + Send + 'static,
    C: Consumer<usize> + Send + 'static,
    Creator: Fn() -> (P, C),
{
    const BATCH: u32 = 1024;

    c.bench_function(&format!("cross_thread-{name}"), |b| {
        b.iter_custom(|iters| {
            let (mut producer, mut consumer) = creator();
            let total = iters as usize * BATCH as usize;

            let start = Instant::now();

            let th = std::thread::spawn(move || {
                for i in 0..total {
                    while producer.maybe_push(i).is_err() {
                        std::hint::spin_loop();
                    }
                }
            });

            let mut received = 0;

            while received < total {
                if consumer.pop().is_some() {
                    received += 1;
                } else {
                    std::hint::spin_loop();
                }
            }

            th.join().unwrap();

            start.elapsed() / BATCH
        })
    });
}

fn bench_push_pop(c: &mut Criterion) {
    push_pop::<_, _, _, 256>("cache_padded", new_bounded::<usize, 1024>, c);
    push_pop::<_, _, _, 256>("compact", new_compact_bounded::<usize, 1024>, c);
}

fn bench_cross_thread(c: &mut Criterion) {
    cross_thread("cache_padded", new_bounded::<usize, 1024>, c);
    cross_thread("compact", new_compact_bounded::<usize, 1024>, c);
}

criterion_group!(benches, bench_push_pop, bench_cross_thread);
criterion_main!(benches);
