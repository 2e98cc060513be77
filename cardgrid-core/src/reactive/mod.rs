//! Reactive Primitives
//!
//! Signals, memos and effects. The catalog keeps its view state in a signal,
//! derives the filtered result set through memos, and renders from a single
//! effect, so every state transition produces exactly one render pass.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a container for mutable state. Reading it inside a memo or
//! effect registers that computation as a dependent; writing it propagates
//! to every dependent.
//!
//! ## Memos
//!
//! A Memo is a derived value that caches its result and re-evaluates only
//! when one of its dependencies really changed.
//!
//! ## Effects
//!
//! An Effect is a side-effecting computation that re-runs whenever its
//! dependencies change, such as pushing a frame to a display.
//!
//! # Implementation Notes
//!
//! Dependencies are detected automatically through a thread-local tracking
//! context, and change detection is version based: every source carries a
//! counter, and readers remember the counter they saw.

mod context;
mod effect;
mod memo;
mod runtime;
mod signal;
mod subscriber;

pub use context::{Dependencies, ReactiveContext};
pub use effect::Effect;
pub use memo::{Memo, MemoState};
pub use runtime::{Reactive, ReactiveHandle, Runtime};
pub use signal::Signal;
pub use subscriber::{Dependency, SourceId, SubscriberId};
