/// Events emitted by a [`CallbackRegistry`](crate::CallbackRegistry) during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`. Each one
/// describes what the operation observed while it held the registry lock.
///
/// # Examples
///
/// ```rust
/// use callback_registry::RegistryEvent;
///
/// let event = RegistryEvent::Add { inserted: true };
/// assert_eq!(event.to_string(), "add { inserted: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// The number of registered handles was read.
    Count { count: usize },

    /// A membership check was performed.
    Contains { found: bool },

    /// A handle was added.
    Add {
        /// `false` if the handle was already registered
        inserted: bool,
    },

    /// A handle was removed.
    Remove {
        /// `false` if the handle was not registered
        removed: bool,
    },

    /// The registry was cleared.
    RemoveAll { cleared: usize },

    /// A full snapshot was copied into a growable sequence.
    ReadInto { count: usize },

    /// A snapshot was copied into a fixed-capacity buffer.
    TryReadInto {
        /// Registered handles at the time of the read
        count: usize,
        /// Length of the receiving buffer
        capacity: usize,
    },
}

impl RegistryEvent {
    /// Whether a fixed-capacity read dropped handles.
    pub fn is_truncated(&self) -> bool {
        matches!(self, RegistryEvent::TryReadInto { count, capacity } if count > capacity)
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Count { count } => write!(f, "count {{ count: {count} }}"),
            RegistryEvent::Contains { found } => write!(f, "contains {{ found: {found} }}"),
            RegistryEvent::Add { inserted } => write!(f, "add {{ inserted: {inserted} }}"),
            RegistryEvent::Remove { removed } => write!(f, "remove {{ removed: {removed} }}"),
            RegistryEvent::RemoveAll { cleared } => {
                write!(f, "remove_all {{ cleared: {cleared} }}")
            }
            RegistryEvent::ReadInto { count } => write!(f, "read_into {{ count: {count} }}"),
            RegistryEvent::TryReadInto { count, capacity } => {
                write!(
                    f,
                    "try_read_into {{ count: {count}, capacity: {capacity} }}"
                )
            }
        }
    }
}
