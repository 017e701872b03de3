//! Concurrency tests
//!
//! Every mutating call on a cell is one indivisible unit: read,
//! compute, and write share a single guard scope. These tests drive
//! many threads through one module and one cell and check that no
//! intermediate state ever leaks.

use std::sync::Arc;
use std::thread;

use evercount::{ActorId, CounterController, LogicModule, ValueStore};

const THREADS: usize = 8;
const INCREMENTS_PER_THREAD: usize = 200;

#[test]
fn concurrent_increments_never_lose_updates() {
    let admin = ActorId::new();
    let module = Arc::new(LogicModule::basic(admin));
    let store = Arc::new(ValueStore::uint(module.id()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let module = Arc::clone(&module);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..INCREMENTS_PER_THREAD {
                    module.increment(&store).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (THREADS * INCREMENTS_PER_THREAD) as u64;
    assert_eq!(module.current_value(&store).unwrap(), expected);
    // One version bump per committed write, plus the initial version
    assert_eq!(store.version(), expected + 1);
}

#[test]
fn readers_only_observe_committed_multiples() {
    let admin = ActorId::new();
    let module = Arc::new(LogicModule::bulk(admin));
    let store = Arc::new(ValueStore::uint(module.id()));

    let writer = {
        let module = Arc::clone(&module);
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..500 {
                module.increment(&store).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let value = store.read().as_uint().unwrap();
                    // Bulk increments move in steps of 10; anything
                    // else would be a torn intermediate state
                    assert_eq!(value % 10, 0);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(module.current_value(&store).unwrap(), 5000);
}

#[test]
fn swap_during_increments_keeps_every_update() {
    let owner = ActorId::new();
    let controller = Arc::new(CounterController::new(owner));
    let basic = Arc::new(LogicModule::basic(controller.id()));
    let bulk = Arc::new(LogicModule::bulk(controller.id()));
    controller.update_counter(owner, basic).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                let mut committed = 0u64;
                for _ in 0..100 {
                    // A swap can race in; only authorization errors
                    // from the outdated module are acceptable
                    if controller.increase_counter().is_ok() {
                        committed += 1;
                    }
                }
                committed
            })
        })
        .collect();

    controller.update_counter(owner, bulk).unwrap();

    let mut basic_or_bulk_commits = 0u64;
    for worker in workers {
        basic_or_bulk_commits += worker.join().unwrap();
    }

    // Every committed increment moved the value by 1 or 10; the store
    // version counts exactly the commits plus the initial version
    assert_eq!(controller.store().version(), basic_or_bulk_commits + 1);
    let value = controller.get_counter().unwrap();
    assert!(value >= basic_or_bulk_commits);
}
