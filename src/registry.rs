//! A thread-safe set of callback handles.
//!
//! [`CallbackRegistry`] is the shared structure a logging subsystem (or anything else that
//! fans out to observers) keeps its callbacks in. Observers register and unregister from
//! arbitrary threads while the dispatching side takes point-in-time snapshots.
//!
//! # Examples
//!
//! ```
//! use callback_registry::CallbackRegistry;
//!
//! fn to_stderr(msg: &str) {
//!     eprintln!("{msg}");
//! }
//!
//! let registry: CallbackRegistry<Option<fn(&str)>> = CallbackRegistry::new();
//! registry.add(Some(to_stderr));
//!
//! // Snapshot, then invoke without holding any lock.
//! for callback in registry.snapshot().into_iter().flatten() {
//!     callback("hello");
//! }
//! ```

use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{CallbackHandle, RegistryEvent};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` after every registry operation.
/// It must be thread-safe because the registry itself is shared between threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Thread-safe registry of opaque callback handles.
///
/// A single mutex guards the handle set. Every operation, reads included, holds it for
/// the whole of its critical section, so all operations are linearizable: no caller ever
/// observes a half-applied `add`, `remove` or `remove_all`.
///
/// The registry stores handles only. It never invokes them, and dropping the registry
/// does not notify anyone.
///
/// `CallbackRegistry` is deliberately not `Clone`; share it by reference, `Arc` or a
/// `static` (see [`define_callback_registry!`](crate::define_callback_registry)).
pub struct CallbackRegistry<H> {
    callbacks: Mutex<HashSet<H>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl<H: CallbackHandle> CallbackRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry with room for `capacity` handles before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            callbacks: Mutex::new(HashSet::with_capacity(capacity)),
            trace: Mutex::new(None),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Tracing
    // ---------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked after every registry operation.
    ///
    /// The callback runs after the handle set's lock has been released, so it may call
    /// back into this registry. Calls made from inside the callback are traced as well.
    ///
    /// # Example
    /// ```rust
    /// use callback_registry::CallbackRegistry;
    ///
    /// let registry: CallbackRegistry<u32> = CallbackRegistry::new();
    /// registry.set_trace_callback(|event| println!("[registry-trace] {event}"));
    /// registry.add(1);
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        log::trace!("callback registry: {event}");

        // Clone the hook out so it runs without the trace lock held.
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------------------------------------

    /// Acquires the handle set.
    ///
    /// No critical section in this module can leave the set inconsistent (a panicking
    /// `Hash` or `Clone` of `H` aborts a single insert or copy), so a poisoned lock is
    /// recovered rather than reported.
    fn lock(&self) -> MutexGuard<'_, HashSet<H>> {
        self.callbacks.lock().unwrap_or_else(|poisoned| {
            log::warn!("callback registry lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Returns the number of distinct registered handles.
    pub fn count(&self) -> usize {
        let count = self.lock().len();
        self.emit_event(RegistryEvent::Count { count });
        count
    }

    /// Returns `true` if no handle is registered.
    pub fn is_empty(&self) -> bool {
        let count = self.lock().len();
        self.emit_event(RegistryEvent::Count { count });
        count == 0
    }

    /// Returns `true` if `handle` is currently registered.
    ///
    /// The empty handle is looked up like any other value.
    pub fn contains(&self, handle: &H) -> bool {
        let found = self.lock().contains(handle);
        self.emit_event(RegistryEvent::Contains { found });
        found
    }

    /// Registers `handle`. Adding an already registered handle changes nothing.
    ///
    /// Returns `true` if the handle was not registered before.
    pub fn add(&self, handle: H) -> bool {
        let inserted = self.lock().insert(handle);
        self.emit_event(RegistryEvent::Add { inserted });
        inserted
    }

    /// Unregisters `handle`. Removing an unknown handle changes nothing.
    ///
    /// Returns `true` if the handle was registered.
    pub fn remove(&self, handle: &H) -> bool {
        let removed = self.lock().remove(handle);
        self.emit_event(RegistryEvent::Remove { removed });
        removed
    }

    /// Unregisters every handle in one step and returns how many were registered.
    pub fn remove_all(&self) -> usize {
        let cleared = {
            let mut callbacks = self.lock();
            let cleared = callbacks.len();
            callbacks.clear();
            cleared
        };
        self.emit_event(RegistryEvent::RemoveAll { cleared });
        cleared
    }

    /// Replaces the contents of `sequence` with every registered handle.
    ///
    /// The order is the set's enumeration order: unspecified, but the same order
    /// [`try_read_into`](Self::try_read_into) would use for the same state.
    pub fn read_into(&self, sequence: &mut Vec<H>) {
        let count = {
            let callbacks = self.lock();
            sequence.clear();
            sequence.extend(callbacks.iter().cloned());
            callbacks.len()
        };
        self.emit_event(RegistryEvent::ReadInto { count });
    }

    /// Returns a new vector holding every registered handle.
    pub fn snapshot(&self) -> Vec<H> {
        let mut sequence = Vec::new();
        self.read_into(&mut sequence);
        sequence
    }

    /// Copies as many handles as fit into `buffer`.
    ///
    /// Slots past the last copied handle are set to [`CallbackHandle::empty`]. Returns the
    /// number of handles that were registered at the time of the read; if it is greater
    /// than `buffer.len()`, the tail of the enumeration order was not copied and the caller
    /// may retry with a buffer of the returned size.
    ///
    /// # Examples
    ///
    /// ```
    /// use callback_registry::CallbackRegistry;
    ///
    /// let registry: CallbackRegistry<u32> = CallbackRegistry::new();
    /// registry.add(7);
    /// registry.add(9);
    ///
    /// let mut buffer = [u32::MAX; 4];
    /// assert_eq!(registry.try_read_into(&mut buffer), 2);
    /// assert_eq!(&buffer[2..], &[0, 0]);
    ///
    /// let mut small = [0u32; 1];
    /// assert_eq!(registry.try_read_into(&mut small), 2); // truncated
    /// ```
    pub fn try_read_into(&self, buffer: &mut [H]) -> usize {
        self.try_read_into_padded(buffer, H::empty())
    }

    /// Like [`try_read_into`](Self::try_read_into), padding unused slots with `empty`.
    pub fn try_read_into_padded(&self, buffer: &mut [H], empty: H) -> usize {
        let capacity = buffer.len();
        let count = {
            let callbacks = self.lock();
            let mut iter = callbacks.iter();
            for slot in buffer.iter_mut() {
                *slot = match iter.next() {
                    Some(handle) => handle.clone(),
                    None => empty.clone(),
                };
            }
            callbacks.len()
        };

        if count > capacity {
            log::debug!(
                "callback registry: snapshot truncated, {count} registered, buffer holds {capacity}"
            );
        }
        self.emit_event(RegistryEvent::TryReadInto { count, capacity });
        count
    }
}

impl<H: CallbackHandle> Default for CallbackRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: CallbackHandle> fmt::Debug for CallbackRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("count", &self.lock().len())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;

    fn registry_with(handles: &[u32]) -> CallbackRegistry<u32> {
        let registry = CallbackRegistry::new();
        for &handle in handles {
            registry.add(handle);
        }
        registry
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry: CallbackRegistry<u32> = CallbackRegistry::default();
        assert_eq!(registry.count(), 0);
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let registry = CallbackRegistry::new();
        assert!(registry.add(A));
        assert!(!registry.add(A));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_contains_after_add_and_remove() {
        let registry = CallbackRegistry::new();
        registry.add(A);
        assert!(registry.contains(&A));

        assert!(registry.remove(&A));
        assert!(!registry.contains(&A));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let registry = registry_with(&[A]);
        assert!(!registry.remove(&B));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_empty_handle_is_an_ordinary_value() {
        let registry = CallbackRegistry::new();
        assert!(!registry.contains(&0));
        registry.add(0u32);
        assert!(registry.contains(&0));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_all() {
        let registry = registry_with(&[A, B, C]);
        assert_eq!(registry.remove_all(), 3);
        assert_eq!(registry.count(), 0);
        assert!([A, B, C].iter().all(|h| !registry.contains(h)));
        assert_eq!(registry.remove_all(), 0);
    }

    #[test]
    fn test_read_into_replaces_contents() {
        let registry = registry_with(&[A, B, C]);
        let mut sequence = vec![99, 98, 97, 96, 95];
        registry.read_into(&mut sequence);

        assert_eq!(sequence.len(), 3);
        let seen: HashSet<u32> = sequence.into_iter().collect();
        assert_eq!(seen, HashSet::from([A, B, C]));
    }

    #[test]
    fn test_try_read_into_truncates() {
        let registry = registry_with(&[A, B, C]);
        let mut buffer = [0u32; 2];

        assert_eq!(registry.try_read_into(&mut buffer), 3);
        assert!(buffer.iter().all(|h| [A, B, C].contains(h)));
        assert_ne!(buffer[0], buffer[1]);
    }

    #[test]
    fn test_try_read_into_pads_with_empty() {
        let registry = registry_with(&[A, B]);
        let mut buffer = [u32::MAX; 5];

        assert_eq!(registry.try_read_into(&mut buffer), 2);
        let head: HashSet<u32> = buffer[..2].iter().copied().collect();
        assert_eq!(head, HashSet::from([A, B]));
        assert_eq!(&buffer[2..], &[0, 0, 0]);
    }

    #[test]
    fn test_try_read_into_zero_capacity() {
        let registry = registry_with(&[A, B]);
        let mut buffer: [u32; 0] = [];
        assert_eq!(registry.try_read_into(&mut buffer), 2);
    }

    #[test]
    fn test_try_read_into_padded_custom_sentinel() {
        let registry = registry_with(&[A]);
        let mut buffer = [0u32; 3];

        assert_eq!(registry.try_read_into_padded(&mut buffer, u32::MAX), 1);
        assert_eq!(buffer, [A, u32::MAX, u32::MAX]);
    }

    #[test]
    fn test_snapshot_and_fixed_read_share_order() {
        let registry = registry_with(&[A, B, C, 4, 5, 6]);
        let snapshot = registry.snapshot();
        let mut buffer = [0u32; 6];
        registry.try_read_into(&mut buffer);
        assert_eq!(snapshot, buffer.to_vec());
    }

    #[test]
    fn test_trace_callback_receives_outcomes() {
        let registry = CallbackRegistry::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        registry.set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(event.clone());
        });

        registry.add(A);
        registry.add(A);
        registry.remove(&B);
        registry.try_read_into(&mut [0u32; 0]);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                RegistryEvent::Add { inserted: true },
                RegistryEvent::Add { inserted: false },
                RegistryEvent::Remove { removed: false },
                RegistryEvent::TryReadInto {
                    count: 1,
                    capacity: 0
                },
            ]
        );

        registry.clear_trace_callback();
        registry.add(B);
        assert_eq!(events.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_debug_shows_count() {
        let registry = registry_with(&[A, B]);
        assert_eq!(format!("{:?}", registry), "CallbackRegistry { count: 2, .. }");
    }
}
