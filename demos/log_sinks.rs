//! Log sink example for callback-registry.
//!
//! Demonstrates the pattern the registry exists for:
//! - A process-wide registry of log sinks declared with `define_callback_registry!`
//! - Sinks registering and unregistering from several threads
//! - A dispatcher that snapshots into a fixed buffer and falls back on truncation
//! - Registry tracing routed to the `log` facade via `env_logger`
//!
//! Run with: `RUST_LOG=trace cargo run --example log_sinks`

use callback_registry::{define_callback_registry, SharedCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

type Sink = dyn Fn(&str) + Send + Sync;

define_callback_registry!(sinks, SharedCallback<Sink>);

const FAST_PATH: usize = 4;

/// Snapshot the sinks and call each one without holding any lock.
fn dispatch(msg: &str) -> usize {
    let mut buffer: [SharedCallback<Sink>; FAST_PATH] = Default::default();
    let count = sinks::try_read_into(&mut buffer);

    let snapshot: Vec<SharedCallback<Sink>> = if count > buffer.len() {
        log::debug!("{count} sinks registered, taking the slow path");
        sinks::snapshot()
    } else {
        buffer.into_iter().take(count).collect()
    };

    for sink in &snapshot {
        if let Some(callback) = sink.get() {
            callback(msg);
        }
    }
    snapshot.len()
}

fn main() {
    env_logger::init();

    println!("=== callback-registry: Log Sinks ===\n");

    let delivered = Arc::new(AtomicUsize::new(0));

    let workers: Vec<_> = (0..6)
        .map(|id| {
            let delivered = delivered.clone();
            thread::spawn(move || {
                let sink = SharedCallback::new(Arc::new(move |msg: &str| {
                    delivered.fetch_add(1, Ordering::Relaxed);
                    println!("   [sink {id}] {msg}");
                }) as Arc<Sink>);

                sinks::add(sink.clone());
                dispatch(&format!("sink {id} online"));
                if id % 2 == 0 {
                    sinks::remove(&sink);
                }
            })
        })
        .collect();

    for worker in workers {
        if worker.join().is_err() {
            eprintln!("a worker panicked");
        }
    }

    let reached = dispatch("final broadcast");
    println!("\n   final broadcast reached {reached} sinks");
    println!(
        "   {} deliveries in total",
        delivered.load(Ordering::Relaxed)
    );

    sinks::remove_all();
    println!("\n=== Done ===");
}
