//! Signal Implementation
//!
//! A Signal is the writable root of the reactive graph. It holds a value and
//! a version counter kept by the runtime.
//!
//! # How Signals Work
//!
//! 1. Reading a signal inside a memo or effect records the reader as a
//!    dependent, along with the version it saw.
//!
//! 2. Writing a signal bumps its version and asks the runtime to propagate
//!    the change.
//!
//! 3. Readers that re-validate later compare versions instead of values, so
//!    `T` does not need `PartialEq`.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use super::runtime::Runtime;
use super::subscriber::SourceId;

struct SignalInner<T> {
    id: SourceId,
    value: RwLock<T>,
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        Runtime::forget_source(self.id);
    }
}

/// A reactive signal holding a value of type T.
///
/// Clones share the same value and identity.
///
/// ```rust,ignore
/// let page = Signal::new(1usize);
/// page.set(2);
/// assert_eq!(page.get(), 2);
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                id: SourceId::new(),
                value: RwLock::new(value),
            }),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> SourceId {
        self.inner.id
    }

    /// Current version; advances on every write.
    pub fn version(&self) -> u64 {
        Runtime::version(self.inner.id)
    }

    /// Get the current value, registering a dependency if called from a
    /// tracking context.
    pub fn get(&self) -> T {
        Runtime::track(self.inner.id);
        self.inner.value.read().clone()
    }

    /// Borrow the current value for the duration of `f`, with tracking.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        Runtime::track(self.inner.id);
        f(&self.inner.value.read())
    }

    /// Get the current value without establishing a dependency.
    pub fn get_untracked(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Set a new value and propagate the change.
    ///
    /// Dependent effects run before this returns.
    pub fn set(&self, value: T) {
        *self.inner.value.write() = value;
        Runtime::bump_version(self.inner.id);
        Runtime::notify_source_change(self.inner.id);
    }

    /// Number of memos and effects currently reading this signal.
    pub fn subscriber_count(&self) -> usize {
        Runtime::subscriber_count(self.inner.id)
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.inner.id)
            .field("version", &self.version())
            .field("value", &*self.inner.value.read())
            .finish()
    }
}
