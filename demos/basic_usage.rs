//! Basic usage example for callback-registry.
//!
//! Demonstrates:
//! - Registering plain function pointers as callbacks
//! - Idempotent `add` and silent `remove`
//! - Taking a growable snapshot with `read_into()`
//! - Taking a fixed-capacity snapshot with `try_read_into()` and detecting truncation
//!
//! Run with: `cargo run --example basic_usage`

use callback_registry::CallbackRegistry;

type LogFn = fn(&str);

fn console(msg: &str) {
    println!("   [console] {msg}");
}

fn shout(msg: &str) {
    println!("   [shout] {}", msg.to_uppercase());
}

fn quiet(_msg: &str) {}

fn main() {
    println!("=== callback-registry: Basic Usage ===\n");

    let registry: CallbackRegistry<Option<LogFn>> = CallbackRegistry::new();

    // -------------------------------------------------------------------------
    // 1. Register callbacks
    // -------------------------------------------------------------------------
    println!("1. Registering callbacks...");

    let console: Option<LogFn> = Some(console);
    let shout: Option<LogFn> = Some(shout);
    let quiet: Option<LogFn> = Some(quiet);

    registry.add(console);
    registry.add(shout);
    registry.add(quiet);
    let again = registry.add(console);

    println!("   Registered 3 callbacks, re-adding console inserted: {again}");
    println!("   count = {}", registry.count());

    // -------------------------------------------------------------------------
    // 2. Dispatch through a growable snapshot
    // -------------------------------------------------------------------------
    println!("\n2. Dispatching through read_into()...");

    let mut snapshot = Vec::new();
    registry.read_into(&mut snapshot);
    for callback in snapshot.iter().flatten() {
        callback("hello from read_into");
    }

    // -------------------------------------------------------------------------
    // 3. Fixed-capacity snapshot
    // -------------------------------------------------------------------------
    println!("\n3. Fixed-capacity snapshots...");

    let mut small: [Option<LogFn>; 2] = [None; 2];
    let count = registry.try_read_into(&mut small);
    println!(
        "   buffer of {} -> {} registered, truncated: {}",
        small.len(),
        count,
        count > small.len()
    );

    let mut large: [Option<LogFn>; 5] = [None; 5];
    let count = registry.try_read_into(&mut large);
    let padded = large.iter().filter(|slot| slot.is_none()).count();
    println!("   buffer of {} -> {count} registered, {padded} empty slots", large.len());

    // -------------------------------------------------------------------------
    // 4. Remove
    // -------------------------------------------------------------------------
    println!("\n4. Removing callbacks...");

    println!("   remove(quiet) -> {}", registry.remove(&quiet));
    println!("   remove(quiet) again -> {}", registry.remove(&quiet));
    println!("   contains(shout) -> {}", registry.contains(&shout));
    println!("   remove_all() cleared {}", registry.remove_all());
    println!("   count = {}", registry.count());

    println!("\n=== Done ===");
}
