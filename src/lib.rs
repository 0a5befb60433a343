//! # Callback Registry
//!
//! A thread-safe registry of opaque callback handles, for subsystems that let observers
//! register and unregister at arbitrary times from arbitrary threads (a logging core
//! fanning messages out to sinks, for instance).
//!
//! The registry only stores handles. Invoking them, formatting messages and filtering by
//! level are the caller's business: take a snapshot, then call the callbacks without
//! holding any lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use callback_registry::CallbackRegistry;
//!
//! fn to_stdout(msg: &str) {
//!     println!("{msg}");
//! }
//!
//! let sinks: CallbackRegistry<Option<fn(&str)>> = CallbackRegistry::new();
//! sinks.add(Some(to_stdout));
//!
//! // Fixed-capacity read: the return value is the true count.
//! let mut buffer = [None; 8];
//! let count = sinks.try_read_into(&mut buffer);
//! assert_eq!(count, 1);
//!
//! for sink in buffer.iter().flatten() {
//!     sink("hello");
//! }
//! ```
//!
//! ## Features
//!
//! - **Linearizable**: one mutex serializes every operation, reads included
//! - **Generic handles**: any `Clone + Eq + Hash` identity with an empty value
//! - **Two snapshot modes**: a growable `Vec`, or a caller-owned slice with truncation reporting
//! - **Tracing support**: optional callback and `log` records for every operation
//!
//! ## Main Items
//!
//! - [`CallbackRegistry`] - the registry itself
//! - [`CallbackHandle`] - bound for handle types, with [`CallbackId`] and [`SharedCallback`]
//! - [`CallbackRegistryApi`] - trait over a `'static` registry
//! - [`define_callback_registry!`] - declare an isolated process-wide registry
//! - [`RegistryEvent`] - events passed to the tracing callback

mod handle;
mod macros;
mod registry;
mod registry_event;
mod registry_trait;

pub use handle::{CallbackHandle, CallbackId, SharedCallback};
pub use registry::{CallbackRegistry, TraceCallback};
pub use registry_event::RegistryEvent;
pub use registry_trait::CallbackRegistryApi;
