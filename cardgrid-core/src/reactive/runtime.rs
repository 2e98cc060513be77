//! Reactive Runtime
//!
//! The runtime connects sources (signals, memos) to the computations that
//! read them (memos, effects) and propagates changes.
//!
//! # How It Works
//!
//! 1. Memos and effects register with the runtime when created.
//!
//! 2. Reading a source inside a tracking context records an edge from the
//!    source to the running subscriber, together with the version read.
//!
//! 3. When a signal is written, the runtime walks the edges breadth-first:
//!    a. every reached subscriber is marked "maybe dirty"
//!    b. memos are sources too, so their dependents are reached as well
//!    c. effects are collected once each, in the order first reached
//!    d. after the walk, each collected effect is scheduled
//!
//! Memos stay lazy. A scheduled effect pulls the memos it reads, and a memo
//! only recomputes if a dependency's version actually moved.
//!
//! # Storage
//!
//! Registries are process-wide `DashMap`s. Entries hold weak references so
//! the runtime never keeps a dropped memo or effect alive.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, OnceLock, Weak};

use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::context::ReactiveContext;
use super::subscriber::{SourceId, SubscriberId};

/// A computation that can be notified when its dependencies change.
pub trait Reactive: Send + Sync {
    /// Get the subscriber ID for this reactive value.
    fn subscriber_id(&self) -> SubscriberId;

    /// Mark this reactive value as potentially needing update.
    fn mark_maybe_dirty(&self);

    /// Re-run if any dependency really changed (effects only).
    fn schedule(&self);

    /// Effects are eager, memos are lazy.
    fn is_eager(&self) -> bool;

    /// The source ID under which others read this value, for memos.
    fn source_id(&self) -> Option<SourceId> {
        None
    }

    /// Bring a derived value up to date before its version is inspected.
    fn refresh(&self) {}
}

/// Handle to a registered reactive value.
///
/// Dropping this handle unregisters the reactive value from the runtime.
pub struct ReactiveHandle {
    subscriber_id: SubscriberId,
    source_id: Option<SourceId>,
}

impl Drop for ReactiveHandle {
    fn drop(&mut self) {
        Runtime::unregister(self.subscriber_id, self.source_id);
    }
}

/// The global reactive runtime.
pub struct Runtime;

static REGISTRY: OnceLock<DashMap<SubscriberId, Weak<dyn Reactive>>> = OnceLock::new();
static DERIVED: OnceLock<DashMap<SourceId, Weak<dyn Reactive>>> = OnceLock::new();
static SOURCE_SUBSCRIBERS: OnceLock<DashMap<SourceId, IndexSet<SubscriberId>>> = OnceLock::new();
static VERSIONS: OnceLock<DashMap<SourceId, u64>> = OnceLock::new();

fn registry() -> &'static DashMap<SubscriberId, Weak<dyn Reactive>> {
    REGISTRY.get_or_init(DashMap::new)
}

fn derived() -> &'static DashMap<SourceId, Weak<dyn Reactive>> {
    DERIVED.get_or_init(DashMap::new)
}

fn source_subscribers() -> &'static DashMap<SourceId, IndexSet<SubscriberId>> {
    SOURCE_SUBSCRIBERS.get_or_init(DashMap::new)
}

fn versions() -> &'static DashMap<SourceId, u64> {
    VERSIONS.get_or_init(DashMap::new)
}

impl Runtime {
    /// Register a reactive value with the runtime.
    ///
    /// Returns a handle that unregisters the value when dropped.
    pub fn register(reactive: Arc<dyn Reactive>) -> ReactiveHandle {
        let subscriber_id = reactive.subscriber_id();
        let source_id = reactive.source_id();
        let weak = Arc::downgrade(&reactive);

        if let Some(source) = source_id {
            derived().insert(source, weak.clone());
        }
        registry().insert(subscriber_id, weak);

        ReactiveHandle {
            subscriber_id,
            source_id,
        }
    }

    fn unregister(subscriber_id: SubscriberId, source_id: Option<SourceId>) {
        registry().remove(&subscriber_id);
        Self::clear_dependencies(subscriber_id);
        if let Some(source) = source_id {
            derived().remove(&source);
            Self::forget_source(source);
        }
    }

    /// Drop every edge and the version counter of a source that no longer
    /// exists.
    pub fn forget_source(source: SourceId) {
        source_subscribers().remove(&source);
        versions().remove(&source);
    }

    /// Record that the current computation (if any) read `source`.
    ///
    /// Called by signals and memos on every tracked read.
    pub fn track(source: SourceId) {
        let Some(subscriber_id) = ReactiveContext::current_subscriber() else {
            return;
        };
        ReactiveContext::track_dependency(source, Self::version(source));
        Self::add_dependency(source, subscriber_id);
    }

    /// Record that a subscriber depends on a source.
    pub fn add_dependency(source: SourceId, subscriber_id: SubscriberId) {
        source_subscribers()
            .entry(source)
            .or_default()
            .insert(subscriber_id);
    }

    /// Remove all dependencies for a subscriber.
    ///
    /// Called before re-running a computation to clear stale edges.
    pub fn clear_dependencies(subscriber_id: SubscriberId) {
        for mut subscribers in source_subscribers().iter_mut() {
            subscribers.retain(|s| *s != subscriber_id);
        }
    }

    /// Number of subscribers currently attached to a source.
    pub fn subscriber_count(source: SourceId) -> usize {
        source_subscribers()
            .get(&source)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Current version of a source. Unknown sources are at version 0.
    pub fn version(source: SourceId) -> u64 {
        versions().get(&source).map(|v| *v).unwrap_or(0)
    }

    /// Advance the version of a source and return the new value.
    pub fn bump_version(source: SourceId) -> u64 {
        let mut entry = versions().entry(source).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Bring a memo up to date. Signals are always current, so this is a
    /// no-op for them.
    pub fn refresh(source: SourceId) {
        let reactive = derived().get(&source).and_then(|weak| weak.upgrade());
        if let Some(reactive) = reactive {
            reactive.refresh();
        }
    }

    /// Whether any recorded dependency has moved past the version observed
    /// when it was read.
    pub fn any_changed<'a, I>(dependencies: I) -> bool
    where
        I: IntoIterator<Item = &'a super::subscriber::Dependency>,
    {
        dependencies.into_iter().any(|dep| {
            Self::refresh(dep.source);
            Self::version(dep.source) != dep.version
        })
    }

    fn lookup(subscriber_id: SubscriberId) -> Option<Arc<dyn Reactive>> {
        registry().get(&subscriber_id).and_then(|weak| weak.upgrade())
    }

    fn subscribers_of(source: SourceId) -> Vec<SubscriberId> {
        source_subscribers()
            .get(&source)
            .map(|subs| subs.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Propagate a change of `source` to everything downstream of it.
    ///
    /// Each reachable effect is scheduled exactly once per call.
    pub fn notify_source_change(source: SourceId) {
        let mut queue = VecDeque::from([source]);
        let mut visited = HashSet::new();
        let mut effects: IndexMap<SubscriberId, Arc<dyn Reactive>> = IndexMap::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            for subscriber_id in Self::subscribers_of(current) {
                let Some(reactive) = Self::lookup(subscriber_id) else {
                    continue;
                };
                reactive.mark_maybe_dirty();
                if reactive.is_eager() {
                    effects.entry(subscriber_id).or_insert(reactive);
                } else if let Some(derived_source) = reactive.source_id() {
                    queue.push_back(derived_source);
                }
            }
        }

        trace!(source = source.raw(), effects = effects.len(), "propagating change");

        for effect in effects.into_values() {
            effect.schedule();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    struct MockReactive {
        id: SubscriberId,
        source: Option<SourceId>,
        dirty: AtomicBool,
        scheduled: AtomicI32,
        eager: bool,
    }

    impl MockReactive {
        fn new(eager: bool) -> Arc<Self> {
            Arc::new(Self {
                id: SubscriberId::new(),
                source: None,
                dirty: AtomicBool::new(false),
                scheduled: AtomicI32::new(0),
                eager,
            })
        }

        fn derived() -> Arc<Self> {
            Arc::new(Self {
                id: SubscriberId::new(),
                source: Some(SourceId::new()),
                dirty: AtomicBool::new(false),
                scheduled: AtomicI32::new(0),
                eager: false,
            })
        }
    }

    impl Reactive for MockReactive {
        fn subscriber_id(&self) -> SubscriberId {
            self.id
        }

        fn mark_maybe_dirty(&self) {
            self.dirty.store(true, Ordering::SeqCst);
        }

        fn schedule(&self) {
            self.scheduled.fetch_add(1, Ordering::SeqCst);
        }

        fn is_eager(&self) -> bool {
            self.eager
        }

        fn source_id(&self) -> Option<SourceId> {
            self.source
        }
    }

    #[test]
    fn runtime_registers_and_unregisters() {
        let reactive = MockReactive::new(false);
        let id = reactive.id;

        let handle = Runtime::register(reactive);
        assert!(registry().contains_key(&id));

        drop(handle);
        assert!(!registry().contains_key(&id));
    }

    #[test]
    fn runtime_notifies_subscribers() {
        let memo = MockReactive::new(false);
        let effect = MockReactive::new(true);
        let source = SourceId::new();

        let _memo_handle = Runtime::register(memo.clone());
        let _effect_handle = Runtime::register(effect.clone());

        Runtime::add_dependency(source, memo.id);
        Runtime::add_dependency(source, effect.id);
        Runtime::notify_source_change(source);

        assert!(memo.dirty.load(Ordering::SeqCst));
        assert!(effect.dirty.load(Ordering::SeqCst));

        // Only the eager one is scheduled.
        assert_eq!(memo.scheduled.load(Ordering::SeqCst), 0);
        assert_eq!(effect.scheduled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn effect_reached_twice_is_scheduled_once() {
        let memo = MockReactive::derived();
        let effect = MockReactive::new(true);
        let source = SourceId::new();
        let memo_source = memo.source.unwrap();

        let _memo_handle = Runtime::register(memo.clone());
        let _effect_handle = Runtime::register(effect.clone());

        // effect reads both the signal and the memo derived from it
        Runtime::add_dependency(source, memo.id);
        Runtime::add_dependency(source, effect.id);
        Runtime::add_dependency(memo_source, effect.id);

        Runtime::notify_source_change(source);
        assert_eq!(effect.scheduled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn runtime_clears_dependencies() {
        let reactive = MockReactive::new(false);
        let id = reactive.id;
        let source = SourceId::new();
        let _handle = Runtime::register(reactive.clone());

        Runtime::add_dependency(source, id);
        assert_eq!(Runtime::subscriber_count(source), 1);

        Runtime::clear_dependencies(id);
        assert_eq!(Runtime::subscriber_count(source), 0);
    }

    #[test]
    fn versions_start_at_zero_and_bump() {
        let source = SourceId::new();
        assert_eq!(Runtime::version(source), 0);
        assert_eq!(Runtime::bump_version(source), 1);
        assert_eq!(Runtime::bump_version(source), 2);
        Runtime::forget_source(source);
        assert_eq!(Runtime::version(source), 0);
    }
}
