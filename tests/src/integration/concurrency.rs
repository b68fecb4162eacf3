//! # Cross-Thread Use
//!
//! Each registry serializes access with its own lock. These tests register,
//! remove and dispatch from several worker threads at once.

#[cfg(test)]
mod tests {
    use crate::support::init_tracing;
    use event_hub::{callback, Callback, EventHub, Events};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WORKERS: usize = 8;
    const PER_WORKER: usize = 100;

    fn counting(counter: &Arc<AtomicUsize>) -> Callback<EventHub> {
        let counter = counter.clone();
        callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration() {
        init_tracing();
        let hub = Arc::new(EventHub::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..WORKERS {
            let hub = hub.clone();
            let counter = counter.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                for _ in 0..PER_WORKER {
                    hub.on("tick", counting(&counter), None).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(hub.listener_count("tick"), WORKERS * PER_WORKER);
        hub.trigger("tick").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), WORKERS * PER_WORKER);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dispatch_while_other_threads_mutate() {
        init_tracing();
        let hub = Arc::new(EventHub::new());
        let counter = Arc::new(AtomicUsize::new(0));
        let stable = counting(&counter);
        hub.on("tick", &stable, None).unwrap();

        let mutators: Vec<_> = (0..WORKERS)
            .map(|_| {
                let hub = hub.clone();
                let churn = counting(&Arc::new(AtomicUsize::new(0)));
                tokio::task::spawn_blocking(move || {
                    for _ in 0..PER_WORKER {
                        hub.on("tick", &churn, None).unwrap();
                        hub.off("tick", &churn, None).unwrap();
                    }
                })
            })
            .collect();

        let trigger_hub = hub.clone();
        let triggers = tokio::task::spawn_blocking(move || {
            for _ in 0..PER_WORKER {
                trigger_hub.trigger("tick").unwrap();
            }
        });

        for handle in mutators {
            handle.await.unwrap();
        }
        triggers.await.unwrap();

        // Every churned listener was removed again; only the stable one is left.
        assert_eq!(hub.listener_count("tick"), 1);
        assert_eq!(counter.load(Ordering::SeqCst), PER_WORKER);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_hubs_on_different_threads_are_isolated() {
        init_tracing();
        let counters: Vec<Arc<AtomicUsize>> =
            (0..WORKERS).map(|_| Arc::new(AtomicUsize::new(0))).collect();

        let handles: Vec<_> = counters
            .iter()
            .enumerate()
            .map(|(i, counter)| {
                let counter = counter.clone();
                tokio::task::spawn_blocking(move || {
                    let hub = EventHub::new();
                    hub.on("tick", counting(&counter), None).unwrap();
                    for _ in 0..=i {
                        hub.trigger("tick").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        for (i, counter) in counters.iter().enumerate() {
            assert_eq!(counter.load(Ordering::SeqCst), i + 1);
        }
    }
}
