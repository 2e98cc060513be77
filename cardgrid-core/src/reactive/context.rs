//! Reactive Context
//!
//! The reactive context tracks which computation is currently running.
//! When a source is read, the current computation is recorded as one of its
//! dependents.
//!
//! A thread-local stack holds one entry per running computation, so a memo
//! evaluated from inside an effect collects its own dependencies separately
//! from the effect's.

use std::cell::RefCell;

use smallvec::SmallVec;

use super::subscriber::{Dependency, SourceId, SubscriberId};

/// Dependencies gathered by one computation. Most computations read only a
/// handful of sources.
pub type Dependencies = SmallVec<[Dependency; 4]>;

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<ContextEntry>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone)]
struct ContextEntry {
    subscriber_id: SubscriberId,
    dependencies: Dependencies,
}

/// Guard that pops the context when dropped.
///
/// The stack stays balanced even if the computation panics.
pub struct ReactiveContext {
    subscriber_id: SubscriberId,
}

impl ReactiveContext {
    /// Enter a new reactive context for the given subscriber.
    ///
    /// The context is exited when the returned guard is dropped.
    pub fn enter(subscriber_id: SubscriberId) -> Self {
        CONTEXT_STACK.with(|stack| {
            stack.borrow_mut().push(ContextEntry {
                subscriber_id,
                dependencies: Dependencies::new(),
            });
        });

        Self { subscriber_id }
    }

    /// Check if there is an active reactive context.
    pub fn is_active() -> bool {
        CONTEXT_STACK.with(|stack| !stack.borrow().is_empty())
    }

    /// Get the current subscriber ID, if any.
    pub fn current_subscriber() -> Option<SubscriberId> {
        CONTEXT_STACK.with(|stack| stack.borrow().last().map(|entry| entry.subscriber_id))
    }

    /// Record that the running computation read `source` at `version`.
    ///
    /// A second read of the same source keeps the first observed version.
    pub fn track_dependency(source: SourceId, version: u64) {
        CONTEXT_STACK.with(|stack| {
            if let Some(entry) = stack.borrow_mut().last_mut() {
                if !entry.dependencies.iter().any(|dep| dep.source == source) {
                    entry.dependencies.push(Dependency { source, version });
                }
            }
        });
    }

    /// Get the dependencies collected in the current context.
    pub fn get_dependencies() -> Dependencies {
        CONTEXT_STACK.with(|stack| {
            stack
                .borrow()
                .last()
                .map(|entry| entry.dependencies.clone())
                .unwrap_or_default()
        })
    }
}

impl Drop for ReactiveContext {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();
            if let Some(entry) = popped {
                debug_assert_eq!(
                    entry.subscriber_id, self.subscriber_id,
                    "ReactiveContext mismatch: expected {:?}, got {:?}",
                    self.subscriber_id, entry.subscriber_id
                );
            }
        });
    }
}
