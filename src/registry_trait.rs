//! Trait for process-wide callback registries.
//!
//! This module provides the `CallbackRegistryApi` trait with default implementations for
//! every registry operation. An implementor only has to point at a `'static`
//! [`CallbackRegistry`]; the [`define_callback_registry!`](crate::define_callback_registry)
//! macro does exactly that.

use crate::{CallbackHandle, CallbackRegistry, RegistryEvent};

/// Access to a `'static` callback registry.
///
/// Provides default implementations for all registry operations, requiring only the
/// `registry` accessor to be implemented.
///
/// # Examples
///
/// ```rust
/// use callback_registry::{CallbackRegistry, CallbackRegistryApi};
/// use std::sync::LazyLock;
///
/// static SINKS: LazyLock<CallbackRegistry<u64>> = LazyLock::new(CallbackRegistry::new);
///
/// struct Sinks;
///
/// impl CallbackRegistryApi for Sinks {
///     type Handle = u64;
///
///     fn registry() -> &'static CallbackRegistry<u64> {
///         &SINKS
///     }
/// }
///
/// Sinks.add(7);
/// assert!(Sinks.contains(&7));
/// ```
pub trait CallbackRegistryApi {
    /// The handle type stored in the registry.
    type Handle: CallbackHandle;

    /// Access the registry static.
    fn registry() -> &'static CallbackRegistry<Self::Handle>;

    // ---------------------------------------------------------------------------------------------
    // Tracing
    // ---------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        Self::registry().set_trace_callback(callback);
    }

    /// Clear the tracing callback.
    ///
    /// Registered handles are not affected.
    fn clear_trace_callback(&self) {
        Self::registry().clear_trace_callback();
    }

    // ---------------------------------------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------------------------------------

    /// Number of registered handles.
    fn count(&self) -> usize {
        Self::registry().count()
    }

    /// Whether no handle is registered.
    fn is_empty(&self) -> bool {
        Self::registry().is_empty()
    }

    /// Check if a handle is registered.
    fn contains(&self, handle: &Self::Handle) -> bool {
        Self::registry().contains(handle)
    }

    /// Register a handle. Returns `false` if it was already registered.
    fn add(&self, handle: Self::Handle) -> bool {
        Self::registry().add(handle)
    }

    /// Unregister a handle. Returns `false` if it was not registered.
    fn remove(&self, handle: &Self::Handle) -> bool {
        Self::registry().remove(handle)
    }

    /// Unregister every handle.
    fn remove_all(&self) -> usize {
        Self::registry().remove_all()
    }

    /// Replace `sequence` with a snapshot of every registered handle.
    fn read_into(&self, sequence: &mut Vec<Self::Handle>) {
        Self::registry().read_into(sequence)
    }

    /// A new vector holding every registered handle.
    fn snapshot(&self) -> Vec<Self::Handle> {
        Self::registry().snapshot()
    }

    /// Fill `buffer` with registered handles, padding with the empty handle.
    ///
    /// Returns the number of registered handles, which exceeds `buffer.len()` when the
    /// snapshot was truncated.
    fn try_read_into(&self, buffer: &mut [Self::Handle]) -> usize {
        Self::registry().try_read_into(buffer)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::CallbackRegistryApi;
    use crate::{CallbackId, CallbackRegistry, RegistryEvent};

    use serial_test::serial;
    use std::sync::{Arc, LazyLock, Mutex};

    static REGISTRY: LazyLock<CallbackRegistry<CallbackId>> =
        LazyLock::new(CallbackRegistry::new);

    struct Api;

    impl CallbackRegistryApi for Api {
        type Handle = CallbackId;

        fn registry() -> &'static CallbackRegistry<CallbackId> {
            &REGISTRY
        }
    }

    const API: Api = Api;

    #[test]
    #[serial]
    fn test_add_contains_remove() {
        API.remove_all();

        let id = CallbackId::next();
        assert!(API.add(id));
        assert!(API.contains(&id));
        assert_eq!(API.count(), 1);

        assert!(API.remove(&id));
        assert!(!API.contains(&id));
        assert!(API.is_empty());
    }

    #[test]
    #[serial]
    fn test_snapshots() {
        API.remove_all();

        let ids = [CallbackId::next(), CallbackId::next(), CallbackId::next()];
        for id in ids {
            API.add(id);
        }

        let mut sequence = Vec::new();
        API.read_into(&mut sequence);
        sequence.sort();
        assert_eq!(sequence, ids.to_vec());

        let mut buffer = [CallbackId::next(); 4];
        assert_eq!(API.try_read_into(&mut buffer), 3);
        assert_eq!(buffer[3], CallbackId(0));
        assert_eq!(API.snapshot().len(), 3);

        assert_eq!(API.remove_all(), 3);
    }

    #[test]
    #[serial]
    fn test_trace_through_trait() {
        API.remove_all();

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        API.set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(event.clone());
        });

        API.add(CallbackId::next());
        API.clear_trace_callback();
        API.remove_all();

        assert_eq!(
            *events.lock().unwrap(),
            vec![RegistryEvent::Add { inserted: true }]
        );
    }
}
