//! # Event Hub Dispatch Benchmarks
//!
//! | Operation | Shape |
//! |-----------|-------|
//! | trigger | N listeners on one event, both dispatch modes |
//! | on + off | register then remove the last of N listeners |
//! | trigger (unknown event) | short-circuit on never-registered names |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use event_hub::{callback, Callback, DispatchMode, EventHub, Events, HubConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const SIZES: [usize; 4] = [1, 10, 100, 1000];

fn counting(counter: &Arc<AtomicU64>) -> Callback<EventHub> {
    let counter = counter.clone();
    callback(move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    })
}

fn hub_with_listeners(mode: DispatchMode, size: usize, counter: &Arc<AtomicU64>) -> EventHub {
    let hub = EventHub::with_config(HubConfig::default().with_dispatch(mode));
    for _ in 0..size {
        hub.on("tick", counting(counter), None).expect("register");
    }
    hub
}

fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigger");

    for mode in [DispatchMode::Snapshot, DispatchMode::Live] {
        for size in SIZES {
            let counter = Arc::new(AtomicU64::new(0));
            let hub = hub_with_listeners(mode, size, &counter);

            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(mode.to_string(), size), &size, |b, _| {
                b.iter(|| black_box(hub.trigger("tick").is_ok()))
            });
        }
    }

    group.finish();
}

fn bench_on_off(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_off");

    for size in SIZES {
        let counter = Arc::new(AtomicU64::new(0));
        let hub = hub_with_listeners(DispatchMode::Snapshot, size, &counter);
        let extra = counting(&counter);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                hub.on("tick", &extra, None).expect("register");
                black_box(hub.off("tick", &extra, None).is_ok())
            })
        });
    }

    group.finish();
}

fn bench_unknown_event(c: &mut Criterion) {
    let counter = Arc::new(AtomicU64::new(0));
    let hub = hub_with_listeners(DispatchMode::Snapshot, 10, &counter);

    c.bench_function("trigger_unknown_event", |b| {
        b.iter(|| black_box(hub.trigger("never-registered").is_ok()))
    });
}

criterion_group!(benches, bench_trigger, bench_on_off, bench_unknown_event);
criterion_main!(benches);
