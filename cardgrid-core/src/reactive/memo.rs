//! Memo Implementation
//!
//! A Memo is a cached derived value that re-evaluates only when its
//! dependencies change.
//!
//! # How Memos Work
//!
//! 1. On first access, the memo runs its computation and caches the result.
//!
//! 2. When a dependency changes, the runtime marks the memo "maybe dirty".
//!
//! 3. On next access, a maybe-dirty memo first brings its own memo
//!    dependencies up to date, then compares the versions it recorded with
//!    the current ones. Only a real change triggers a recompute.
//!
//! 4. A recompute that produces an equal value does not advance the memo's
//!    version, so downstream memos skip their work too.
//!
//! The computation runs without any memo lock held.

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::context::{Dependencies, ReactiveContext};
use super::runtime::{Reactive, ReactiveHandle, Runtime};
use super::subscriber::{SourceId, SubscriberId};

/// Dirty state for a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoState {
    /// The cached value is up-to-date.
    Clean,

    /// A dependency might have changed. Need to check.
    MaybeDirty,

    /// The memo definitely needs to recompute.
    Dirty,
}

struct MemoInner<T> {
    source_id: SourceId,
    subscriber_id: SubscriberId,
    compute: Box<dyn Fn() -> T + Send + Sync>,
    value: RwLock<Option<T>>,
    state: RwLock<MemoState>,
    dependencies: RwLock<Dependencies>,
    computations: AtomicUsize,
}

impl<T> MemoInner<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn ensure_current(&self) {
        let state = *self.state.read();
        match state {
            MemoState::Clean => {}
            MemoState::MaybeDirty => {
                let dependencies = self.dependencies.read().clone();
                if Runtime::any_changed(dependencies.iter()) {
                    self.recompute();
                } else {
                    *self.state.write() = MemoState::Clean;
                }
            }
            MemoState::Dirty => self.recompute(),
        }
    }

    fn recompute(&self) {
        Runtime::clear_dependencies(self.subscriber_id);

        let (new_value, new_deps) = {
            let _ctx = ReactiveContext::enter(self.subscriber_id);
            let value = (self.compute)();
            (value, ReactiveContext::get_dependencies())
        };
        self.computations.fetch_add(1, Ordering::Relaxed);

        let changed = self.value.read().as_ref() != Some(&new_value);
        if changed {
            *self.value.write() = Some(new_value);
            Runtime::bump_version(self.source_id);
        }
        *self.dependencies.write() = new_deps;
        *self.state.write() = MemoState::Clean;
    }
}

impl<T> Reactive for MemoInner<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    fn mark_maybe_dirty(&self) {
        let mut state = self.state.write();
        if *state == MemoState::Clean {
            *state = MemoState::MaybeDirty;
        }
    }

    fn schedule(&self) {}

    fn is_eager(&self) -> bool {
        false
    }

    fn source_id(&self) -> Option<SourceId> {
        Some(self.source_id)
    }

    fn refresh(&self) {
        self.ensure_current();
    }
}

/// A cached derived value that recomputes only when dependencies change.
///
/// The `PartialEq` bound lets the memo tell a real change from a recompute
/// that landed on the same value.
pub struct Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    inner: Arc<MemoInner<T>>,
    _handle: Arc<ReactiveHandle>,
}

impl<T> Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    /// Create a new memo with the given computation function.
    ///
    /// The computation is not run immediately. It runs on first access.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let inner = Arc::new(MemoInner {
            source_id: SourceId::new(),
            subscriber_id: SubscriberId::new(),
            compute: Box::new(compute),
            value: RwLock::new(None),
            state: RwLock::new(MemoState::Dirty),
            dependencies: RwLock::new(Dependencies::new()),
            computations: AtomicUsize::new(0),
        });
        let handle = Runtime::register(inner.clone());

        Self {
            inner,
            _handle: Arc::new(handle),
        }
    }

    /// The ID under which readers depend on this memo.
    pub fn id(&self) -> SourceId {
        self.inner.source_id
    }

    /// Get the subscriber ID for this memo.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.inner.subscriber_id
    }

    /// Get the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.ensure_current();
        Runtime::track(self.inner.source_id);
        let value = self.inner.value.read();
        f(value.as_ref().expect("clean memo should have a value"))
    }

    /// Mark the memo as potentially needing recomputation.
    pub fn mark_maybe_dirty(&self) {
        self.inner.mark_maybe_dirty();
    }

    /// Mark the memo as definitely needing recomputation.
    pub fn mark_dirty(&self) {
        *self.inner.state.write() = MemoState::Dirty;
    }

    /// Get the current dirty state.
    pub fn state(&self) -> MemoState {
        *self.inner.state.read()
    }

    /// Version of the cached value; advances only when the value changes.
    pub fn version(&self) -> u64 {
        Runtime::version(self.inner.source_id)
    }

    /// How many times the computation has run.
    pub fn computations(&self) -> usize {
        self.inner.computations.load(Ordering::Relaxed)
    }

    /// Check if the memo has a cached value.
    pub fn has_value(&self) -> bool {
        self.inner.value.read().is_some()
    }
}

impl<T> Clone for Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _handle: Arc::clone(&self._handle),
        }
    }
}

impl<T> Debug for Memo<T>
where
    T: Clone + Send + Sync + PartialEq + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("id", &self.inner.source_id)
            .field("state", &self.state())
            .field("has_value", &self.has_value())
            .field("computations", &self.computations())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
