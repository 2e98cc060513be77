//! Effect Implementation
//!
//! An Effect is a side-effecting computation that runs whenever its
//! dependencies change. Effects are how reactive state reaches the outside
//! world; in this crate the render pass of the catalog view is one.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its function immediately to establish
//!    initial dependencies (`new_lazy` defers that first run).
//!
//! 2. When a dependency changes, the runtime schedules the effect once per
//!    propagation, no matter how many of its dependencies were reached.
//!
//! 3. A scheduled effect re-validates the versions it recorded. If nothing
//!    it read has really changed (a memo recomputed to an equal value), it
//!    does not run.
//!
//! # Differences from Memo
//!
//! - Memos return a value; effects do not.
//! - Memos are lazy (compute on access); effects are eager.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::context::{Dependencies, ReactiveContext};
use super::runtime::{Reactive, ReactiveHandle, Runtime};
use super::subscriber::SubscriberId;

struct EffectInner {
    subscriber_id: SubscriberId,
    run: Box<dyn Fn() + Send + Sync>,
    dependencies: RwLock<Dependencies>,
    disposed: AtomicBool,
    running: AtomicBool,
    run_count: AtomicUsize,
}

impl EffectInner {
    fn execute(&self) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        // An effect that writes to one of its own sources would otherwise
        // recurse forever.
        if self.running.swap(true, Ordering::SeqCst) {
            trace!("effect re-entered while running, skipping");
            return;
        }

        Runtime::clear_dependencies(self.subscriber_id);
        let new_deps = {
            let _ctx = ReactiveContext::enter(self.subscriber_id);
            (self.run)();
            ReactiveContext::get_dependencies()
        };
        *self.dependencies.write() = new_deps;

        self.run_count.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Reactive for EffectInner {
    fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    fn mark_maybe_dirty(&self) {}

    fn schedule(&self) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        let dependencies = self.dependencies.read().clone();
        if Runtime::any_changed(dependencies.iter()) {
            self.execute();
        }
    }

    fn is_eager(&self) -> bool {
        true
    }
}

/// A side-effecting computation that runs when dependencies change.
///
/// ```rust,ignore
/// let count = Signal::new(0);
/// let reader = count.clone();
/// let effect = Effect::new(move || println!("count is {}", reader.get()));
/// count.set(5); // prints "count is 5"
/// ```
pub struct Effect {
    inner: Arc<EffectInner>,
    _handle: Arc<ReactiveHandle>,
}

impl Effect {
    /// Create a new effect with the given function.
    ///
    /// The function runs immediately to establish dependencies.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let effect = Self::new_lazy(run);
        effect.execute();
        effect
    }

    /// Create a new effect without running it.
    ///
    /// It has no dependencies until the first `execute`.
    pub fn new_lazy<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let inner = Arc::new(EffectInner {
            subscriber_id: SubscriberId::new(),
            run: Box::new(run),
            dependencies: RwLock::new(Dependencies::new()),
            disposed: AtomicBool::new(false),
            running: AtomicBool::new(false),
            run_count: AtomicUsize::new(0),
        });
        let handle = Runtime::register(inner.clone());

        Self {
            inner,
            _handle: Arc::new(handle),
        }
    }

    /// Get the subscriber ID for this effect.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.inner.subscriber_id
    }

    /// Run the effect function now, re-tracking its dependencies.
    pub fn execute(&self) {
        self.inner.execute();
    }

    /// Run the effect if any of its dependencies changed since it last ran.
    pub fn schedule(&self) {
        self.inner.schedule();
    }

    /// Dispose of the effect. After disposal it never runs again.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        Runtime::clear_dependencies(self.inner.subscriber_id);
    }

    /// Check if the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Get the number of times the effect has run.
    pub fn run_count(&self) -> usize {
        self.inner.run_count.load(Ordering::SeqCst)
    }

    /// Get the number of dependencies.
    pub fn dependency_count(&self) -> usize {
        self.inner.dependencies.read().len()
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _handle: Arc::clone(&self._handle),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("subscriber_id", &self.inner.subscriber_id)
            .field("run_count", &self.run_count())
            .field("dependency_count", &self.dependency_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
