//! Macros for declaring process-wide callback registries.

/// Declares a module holding a process-wide callback registry.
///
/// The macro generates a module containing:
/// - A `static` registry for the given handle type (hidden)
/// - An `Api` struct that implements `CallbackRegistryApi`, and an `API` constant
/// - Free functions for every registry operation
///
/// # Examples
///
/// ```rust
/// use callback_registry::define_callback_registry;
///
/// fn to_stderr(msg: &str) {
///     eprintln!("{msg}");
/// }
///
/// define_callback_registry!(log_sinks, Option<fn(&str)>);
///
/// let sink: Option<fn(&str)> = Some(to_stderr);
/// log_sinks::add(sink);
/// assert!(log_sinks::contains(&sink));
///
/// for sink in log_sinks::snapshot().into_iter().flatten() {
///     sink("hello");
/// }
/// ```
///
/// # Multiple Registries
///
/// Every invocation is isolated from every other:
///
/// ```rust
/// use callback_registry::define_callback_registry;
///
/// define_callback_registry!(errors, u32);
/// define_callback_registry!(warnings, u32);
///
/// errors::add(1);
/// assert!(!warnings::contains(&1));
/// ```
#[macro_export]
macro_rules! define_callback_registry {
    ($name:ident, $handle:ty) => {
        #[allow(dead_code)]
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            use std::sync::LazyLock;

            // Registry storage (module-private)
            static REGISTRY: LazyLock<$crate::CallbackRegistry<$handle>> =
                LazyLock::new($crate::CallbackRegistry::new);

            /// Zero-sized type that implements the registry API.
            pub struct Api;

            impl $crate::CallbackRegistryApi for Api {
                type Handle = $handle;

                fn registry() -> &'static $crate::CallbackRegistry<$handle> {
                    &REGISTRY
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            // Free functions delegate to API

            pub fn count() -> usize {
                use $crate::CallbackRegistryApi;
                API.count()
            }

            pub fn is_empty() -> bool {
                use $crate::CallbackRegistryApi;
                API.is_empty()
            }

            pub fn contains(handle: &$handle) -> bool {
                use $crate::CallbackRegistryApi;
                API.contains(handle)
            }

            pub fn add(handle: $handle) -> bool {
                use $crate::CallbackRegistryApi;
                API.add(handle)
            }

            pub fn remove(handle: &$handle) -> bool {
                use $crate::CallbackRegistryApi;
                API.remove(handle)
            }

            pub fn remove_all() -> usize {
                use $crate::CallbackRegistryApi;
                API.remove_all()
            }

            pub fn read_into(sequence: &mut Vec<$handle>) {
                use $crate::CallbackRegistryApi;
                API.read_into(sequence)
            }

            pub fn snapshot() -> Vec<$handle> {
                use $crate::CallbackRegistryApi;
                API.snapshot()
            }

            pub fn try_read_into(buffer: &mut [$handle]) -> usize {
                use $crate::CallbackRegistryApi;
                API.try_read_into(buffer)
            }

            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::CallbackRegistryApi;
                API.set_trace_callback(callback)
            }

            pub fn clear_trace_callback() {
                use $crate::CallbackRegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}
