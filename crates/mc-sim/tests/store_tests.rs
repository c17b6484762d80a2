use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mc_sim::{Bounds, SimError, SimRng, SimulatedStore, StoreOptions, StoreStatus};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
struct Queue {
    queue: f64,
}

const QUEUE_BOUNDS: Bounds = Bounds::new(0.0, 30.0);

fn counting_update(
    calls: Arc<AtomicUsize>,
) -> impl FnMut(&Queue, &mut SimRng) -> Result<Queue, SimError> + Send + 'static {
    move |prev: &Queue, rng: &mut SimRng| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Queue {
            queue: QUEUE_BOUNDS.clamp(prev.queue + rng.unit()),
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_clamped_queue_after_two_ticks() {
    let store = SimulatedStore::spawn(
        Queue { queue: 10.0 },
        |prev: &Queue, rng: &mut SimRng| {
            Ok(Queue {
                queue: QUEUE_BOUNDS.clamp(prev.queue + rng.unit()),
            })
        },
        SimRng::scripted([25.0, 25.0]),
        StoreOptions::new("queue", Duration::from_secs(1)),
    );

    tokio::time::sleep(Duration::from_millis(2_500)).await;

    assert_eq!(store.ticks(), 2);
    assert_eq!(store.current().await, Queue { queue: 30.0 });
    store.stop();
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_interval() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = SimulatedStore::create(
        Queue { queue: 0.0 },
        counting_update(calls.clone()),
        Duration::from_secs(2),
    );

    tokio::time::sleep(Duration::from_millis(1_900)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    store.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_first_tick_never_updates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = SimulatedStore::create(
        Queue { queue: 10.0 },
        counting_update(calls.clone()),
        Duration::from_secs(1),
    );
    store.stop();

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.ticks(), 0);
    assert_eq!(store.status(), StoreStatus::Stopped);
    assert_eq!(store.current().await, Queue { queue: 10.0 });
}

#[tokio::test(start_paused = true)]
async fn test_double_stop_is_noop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = SimulatedStore::create(
        Queue { queue: 1.0 },
        counting_update(calls.clone()),
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    store.stop();
    let after_first = calls.load(Ordering::SeqCst);
    store.stop();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(after_first, 3);
    assert_eq!(calls.load(Ordering::SeqCst), after_first);
    assert_eq!(store.status(), StoreStatus::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_timer() {
    let calls = Arc::new(AtomicUsize::new(0));
    {
        let _store = SimulatedStore::create(
            Queue { queue: 1.0 },
            counting_update(calls.clone()),
            Duration::from_secs(1),
        );
        tokio::time::sleep(Duration::from_millis(1_500)).await;
    }
    let at_drop = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(at_drop, 1);
    assert_eq!(calls.load(Ordering::SeqCst), at_drop);
}

#[tokio::test(start_paused = true)]
async fn test_failed_update_stops_and_reports() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let store = SimulatedStore::spawn(
        Queue { queue: 0.0 },
        move |prev: &Queue, _rng: &mut SimRng| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n == 1 {
                return Err(SimError::update("queue rule rejected state"));
            }
            Ok(Queue { queue: prev.queue + 1.0 })
        },
        SimRng::seeded(7),
        StoreOptions::new("failing", Duration::from_secs(1)).with_faults(tx),
    );

    tokio::time::sleep(Duration::from_secs(10)).await;

    let fault = rx.recv().await.expect("fault delivered");
    assert_eq!(fault.store, "failing");
    assert_eq!(fault.ticks, 1);
    assert_eq!(fault.error, SimError::update("queue rule rejected state"));

    assert_eq!(calls.load(Ordering::SeqCst), 2, "no retries after failure");
    assert_eq!(store.ticks(), 1);
    assert_eq!(store.current().await, Queue { queue: 1.0 });
    assert!(matches!(store.status(), StoreStatus::Failed(_)));

    // stopping a failed store keeps the failure visible
    store.stop();
    assert!(matches!(store.status(), StoreStatus::Failed(_)));
}

#[tokio::test(start_paused = true)]
async fn test_panicking_update_is_a_failure() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let store = SimulatedStore::spawn(
        Queue { queue: 0.0 },
        |_prev: &Queue, _rng: &mut SimRng| -> Result<Queue, SimError> {
            panic!("divide by zero in rule")
        },
        SimRng::seeded(7),
        StoreOptions::new("panicky", Duration::from_secs(1)).with_faults(tx),
    );

    tokio::time::sleep(Duration::from_millis(1_500)).await;

    let fault = rx.recv().await.expect("fault delivered");
    assert_eq!(
        fault.error,
        SimError::UpdatePanicked("divide by zero in rule".to_string())
    );
    assert_eq!(
        store.status(),
        StoreStatus::Failed(SimError::UpdatePanicked("divide by zero in rule".to_string()))
    );
    assert_eq!(store.ticks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_is_coerced() {
    let store = SimulatedStore::create(
        Queue { queue: 0.0 },
        |prev: &Queue, _rng: &mut SimRng| Ok(prev.clone()),
        Duration::ZERO,
    );
    assert_eq!(store.interval(), mc_sim::MIN_INTERVAL);
    store.stop();
}

#[tokio::test(start_paused = true)]
async fn test_bounds_hold_for_many_ticks() {
    let store = SimulatedStore::spawn(
        Queue { queue: 15.0 },
        |prev: &Queue, rng: &mut SimRng| {
            Ok(Queue {
                queue: QUEUE_BOUNDS.clamp(prev.queue + rng.jitter(0.5, 40.0)),
            })
        },
        SimRng::seeded(99),
        StoreOptions::new("walk", Duration::from_millis(10)),
    );

    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let q = store.current().await.queue;
        assert!(QUEUE_BOUNDS.contains(q), "queue {q} escaped bounds");
    }
    assert!(store.ticks() > 100);
}
