//! Integration tests for the different kinds of callback handles.
//!
//! The registry is generic over its handle type. These tests register plain function
//! pointers, reference-counted closures and numeric ids, and invoke snapshots the way a
//! logging core would.

use callback_registry::{CallbackHandle, CallbackId, CallbackRegistry, SharedCallback};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type LogFn = fn(&str) -> usize;

fn message_len(msg: &str) -> usize {
    msg.len()
}

fn word_count(msg: &str) -> usize {
    msg.split_whitespace().count()
}

#[test]
fn test_function_pointer_handles() {
    let registry: CallbackRegistry<Option<LogFn>> = CallbackRegistry::new();
    let len: Option<LogFn> = Some(message_len);
    let words: Option<LogFn> = Some(word_count);

    registry.add(len);
    registry.add(words);
    registry.add(len);
    assert_eq!(registry.count(), 2);

    let mut results: Vec<usize> = registry
        .snapshot()
        .into_iter()
        .flatten()
        .map(|callback| callback("two words"))
        .collect();
    results.sort();
    assert_eq!(results, vec![2, 9]);

    registry.remove(&len);
    assert!(!registry.contains(&len));
    assert!(registry.contains(&words));
}

#[test]
fn test_null_function_pointer_is_a_valid_handle() {
    let registry: CallbackRegistry<Option<LogFn>> = CallbackRegistry::new();

    assert!(!registry.contains(&None));
    registry.add(None);
    assert!(registry.contains(&None));
    assert_eq!(registry.count(), 1);

    registry.remove(&None);
    assert_eq!(registry.count(), 0);
}

#[test]
fn test_fixed_buffer_of_function_pointers() {
    let registry: CallbackRegistry<Option<LogFn>> = CallbackRegistry::new();
    registry.add(Some(message_len));

    let stale: Option<LogFn> = Some(word_count);
    let mut buffer = [stale; 3];
    assert_eq!(registry.try_read_into(&mut buffer), 1);
    assert!(buffer[0].is_some());
    assert!(buffer[1].is_empty());
    assert!(buffer[2].is_empty());
}

#[test]
fn test_shared_closure_handles() {
    type Sink = dyn Fn(&str) + Send + Sync;

    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    let collector = SharedCallback::new(Arc::new(move |msg: &str| {
        received_clone.lock().unwrap().push(msg.to_string());
    }) as Arc<Sink>);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let counter = SharedCallback::new(Arc::new(move |_: &str| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    }) as Arc<Sink>);

    let registry: CallbackRegistry<SharedCallback<Sink>> = CallbackRegistry::new();
    registry.add(collector.clone());
    registry.add(counter.clone());
    registry.add(collector.clone());
    assert_eq!(registry.count(), 2);

    for handle in registry.snapshot() {
        if let Some(callback) = handle.get() {
            callback("first");
        }
    }

    registry.remove(&collector);
    for handle in registry.snapshot() {
        if let Some(callback) = handle.get() {
            callback("second");
        }
    }

    assert_eq!(*received.lock().unwrap(), vec!["first".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_identical_closures_are_distinct_registrations() {
    type Sink = dyn Fn(&str) + Send + Sync;

    let first = SharedCallback::new(Arc::new(|_: &str| {}) as Arc<Sink>);
    let second = SharedCallback::new(Arc::new(|_: &str| {}) as Arc<Sink>);

    let registry = CallbackRegistry::new();
    registry.add(first.clone());
    registry.add(second);
    assert_eq!(registry.count(), 2);

    registry.remove(&first);
    assert_eq!(registry.count(), 1);
    assert!(!registry.contains(&first));
}

#[test]
fn test_ids_into_external_table() {
    let table: Mutex<HashMap<CallbackId, String>> = Mutex::new(HashMap::new());
    let registry = CallbackRegistry::new();

    for name in ["console", "file", "syslog"] {
        let id = CallbackId::next();
        table.lock().unwrap().insert(id, name.to_string());
        registry.add(id);
    }

    let mut buffer = [CallbackId::empty(); 2];
    let count = registry.try_read_into(&mut buffer);
    assert_eq!(count, 3);

    let table = table.lock().unwrap();
    for id in buffer {
        assert!(table.contains_key(&id));
    }
}
