//! Handle types that can be stored in a [`CallbackRegistry`](crate::CallbackRegistry).
//!
//! A handle is an opaque identity for "a callback". The registry never looks inside it:
//! it only hashes, compares and copies it. Every handle type also has an *empty* value,
//! which the fixed-capacity snapshot writes into slots it has no handle for.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of a callback as seen by the registry.
///
/// Implemented for:
/// - `Option<T>` for any hashable `T` (empty value `None`). This is how plain function
///   pointers are registered: `Option<fn(&str)>`.
/// - The unsigned and signed integer primitives (empty value `0`).
/// - [`CallbackId`] and [`SharedCallback`].
///
/// Function pointer identity is an address, and the compiler may give two functions with
/// identical bodies the same address. Such callbacks collapse into one registration: the
/// second `add` is a no-op and removing either unregisters both. Use [`SharedCallback`] or
/// [`CallbackId`] when every registration must stay distinct.
///
/// # Examples
///
/// ```rust
/// use callback_registry::CallbackHandle;
///
/// fn on_message(_msg: &str) {}
///
/// let handle: Option<fn(&str)> = Some(on_message);
/// assert!(!handle.is_empty());
/// assert!(<Option<fn(&str)>>::empty().is_empty());
/// ```
pub trait CallbackHandle: Clone + Eq + Hash + Send + 'static {
    /// The sentinel written into unused snapshot slots.
    fn empty() -> Self;

    /// Whether this handle is the sentinel.
    fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl<T> CallbackHandle for Option<T>
where
    T: Clone + Eq + Hash + Send + 'static,
{
    fn empty() -> Self {
        None
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_integer_handle {
    ($($t:ty),* $(,)?) => {
        $(
            impl CallbackHandle for $t {
                fn empty() -> Self {
                    0
                }
            }
        )*
    };
}

impl_integer_handle!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// -------------------------------------------------------------------------------------------------
// CallbackId
// -------------------------------------------------------------------------------------------------

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

/// Numeric handle into a caller-owned callback table.
///
/// `CallbackId(0)` is the empty value; [`CallbackId::next`] never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CallbackId(pub u64);

impl CallbackId {
    /// Returns a process-unique, non-zero id.
    pub fn next() -> Self {
        CallbackId(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "callback#{}", self.0)
    }
}

impl CallbackHandle for CallbackId {
    fn empty() -> Self {
        CallbackId(0)
    }
}

// -------------------------------------------------------------------------------------------------
// SharedCallback
// -------------------------------------------------------------------------------------------------

/// Identity handle for a reference-counted closure.
///
/// Two handles are equal when they point at the same allocation. The closure itself is
/// never compared, so two separately allocated closures with identical code are distinct
/// registrations, while clones of one handle are the same registration.
///
/// The registry keeps a strong reference for as long as the handle is registered, but
/// claims nothing else about the closure's lifetime.
///
/// # Examples
///
/// ```rust
/// use callback_registry::{CallbackRegistry, SharedCallback};
/// use std::sync::Arc;
///
/// type Sink = dyn Fn(&str) + Send + Sync;
///
/// let registry: CallbackRegistry<SharedCallback<Sink>> = CallbackRegistry::new();
/// let sink = SharedCallback::new(Arc::new(|msg: &str| println!("{msg}")) as Arc<Sink>);
///
/// registry.add(sink.clone());
/// assert!(registry.contains(&sink));
///
/// for handle in registry.snapshot() {
///     if let Some(callback) = handle.get() {
///         callback("hello");
///     }
/// }
/// ```
pub struct SharedCallback<F: ?Sized> {
    inner: Option<Arc<F>>,
}

impl<F: ?Sized> SharedCallback<F> {
    pub fn new(callback: Arc<F>) -> Self {
        Self {
            inner: Some(callback),
        }
    }

    /// The callback, or `None` for the empty handle.
    pub fn get(&self) -> Option<&Arc<F>> {
        self.inner.as_ref()
    }

    /// Address used for identity; null for the empty handle.
    fn addr(&self) -> *const () {
        match &self.inner {
            Some(arc) => Arc::as_ptr(arc) as *const (),
            None => std::ptr::null(),
        }
    }
}

impl<F: ?Sized> From<Arc<F>> for SharedCallback<F> {
    fn from(callback: Arc<F>) -> Self {
        Self::new(callback)
    }
}

impl<F: ?Sized> Default for SharedCallback<F> {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl<F: ?Sized> Clone for SharedCallback<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F: ?Sized> PartialEq for SharedCallback<F> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl<F: ?Sized> Eq for SharedCallback<F> {}

impl<F: ?Sized> Hash for SharedCallback<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<F: ?Sized> fmt::Debug for SharedCallback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(_) => write!(f, "SharedCallback({:p})", self.addr()),
            None => write!(f, "SharedCallback(empty)"),
        }
    }
}

impl<F> CallbackHandle for SharedCallback<F>
where
    F: ?Sized + Send + Sync + 'static,
{
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_none()
    }
}
