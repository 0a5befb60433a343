//! Trait contracts example for callback-registry.
//!
//! Demonstrates using `CallbackRegistryApi` directly:
//! - One static registry per logging subsystem, each behind its own type
//! - Generic code written against the trait instead of a concrete registry
//! - Numeric `CallbackId` handles indexing into a caller-owned callback table
//!
//! Run with: `cargo run --example trait_contracts`

use callback_registry::{CallbackHandle, CallbackId, CallbackRegistry, CallbackRegistryApi};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

// =============================================================================
// Subsystems
// =============================================================================

static AUDIT: LazyLock<CallbackRegistry<CallbackId>> = LazyLock::new(CallbackRegistry::new);
static METRICS: LazyLock<CallbackRegistry<CallbackId>> = LazyLock::new(CallbackRegistry::new);

struct Audit;

impl CallbackRegistryApi for Audit {
    type Handle = CallbackId;

    fn registry() -> &'static CallbackRegistry<CallbackId> {
        &AUDIT
    }
}

struct Metrics;

impl CallbackRegistryApi for Metrics {
    type Handle = CallbackId;

    fn registry() -> &'static CallbackRegistry<CallbackId> {
        &METRICS
    }
}

// =============================================================================
// Callback table owned by the caller
// =============================================================================

type Handler = Box<dyn Fn(&str) + Send + Sync>;

static HANDLERS: LazyLock<Mutex<HashMap<CallbackId, Handler>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn install(handler: impl Fn(&str) + Send + Sync + 'static) -> CallbackId {
    let id = CallbackId::next();
    HANDLERS
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(id, Box::new(handler));
    id
}

/// Works with any subsystem registry.
fn publish<R: CallbackRegistryApi<Handle = CallbackId>>(subsystem: &R, msg: &str) {
    let mut ids = [CallbackId::empty(); 8];
    let count = subsystem.try_read_into(&mut ids);
    if count > ids.len() {
        println!("   ({} handlers not reached)", count - ids.len());
    }

    let handlers = HANDLERS.lock().unwrap_or_else(|p| p.into_inner());
    for id in ids.iter().filter(|id| !id.is_empty()) {
        if let Some(handler) = handlers.get(id) {
            handler(msg);
        }
    }
}

fn main() {
    println!("=== callback-registry: Trait Contracts ===\n");

    let audit_log = install(|msg| println!("   [audit-log] {msg}"));
    let audit_mail = install(|msg| println!("   [audit-mail] {msg}"));
    let metrics_push = install(|msg| println!("   [metrics] {msg}"));

    Audit.add(audit_log);
    Audit.add(audit_mail);
    Metrics.add(metrics_push);

    println!("1. Publishing to each subsystem...");
    publish(&Audit, "user logged in");
    publish(&Metrics, "latency=12ms");

    println!("\n2. Unregistering {audit_mail}...");
    Audit.remove(&audit_mail);
    publish(&Audit, "user logged out");

    println!(
        "\n3. Subsystem sizes: audit={}, metrics={}",
        Audit.count(),
        Metrics.count()
    );

    println!("\n=== Done ===");
}
