//! Deferred-value runtime.
//!
//! This crate provides a deferred-value ("promise"-like) primitive driven
//! by an explicit cooperative event loop:
//! - [`DeferredValue`] - Three-state settlement container with chaining
//! - [`EventLoop`] - Single-threaded scheduler for continuation hand-off
//! - `all`/`race` - Aggregation combinators over mixed inputs
//!
//! # Overview
//!
//! A [`DeferredValue`] starts pending and settles exactly once, either
//! fulfilled with a [`core_types::Value`] or rejected with a reason.
//! Continuations attach through [`then`](DeferredValue::then),
//! [`catch`](DeferredValue::catch) and [`finally`](DeferredValue::finally);
//! each returns a chained child whose outcome derives from the parent's
//! settlement and the continuation's result. Settlement hand-off always
//! travels through the owning [`EventLoop`], so chains settle only while a
//! caller drives [`EventLoop::run_until_idle`].
//!
//! # Examples
//!
//! ```
//! use core_types::Value;
//! use deferred_runtime::{DeferredState, DeferredValue, EventLoop, Handler};
//!
//! let events = EventLoop::new();
//! let chained = DeferredValue::new(&events, |resolver| {
//!     resolver.resolve(Value::Smi(1));
//!     Ok(())
//! })
//! .then(
//!     Some(Handler::new(|value| match value {
//!         Value::Smi(n) => Ok(Value::Smi(n + 1).into()),
//!         other => Ok(other.into()),
//!     })),
//!     None,
//! );
//!
//! events.run_until_idle();
//! assert_eq!(chained.state(), DeferredState::Fulfilled(Value::Smi(2)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod combinators;
pub mod deferred;
pub mod event_loop;
mod resolution;
pub mod task_queue;

// Re-export main types at crate root
pub use combinators::AggregateArg;
pub use deferred::{DeferredState, DeferredValue, Eventual, Handler, Resolver};
pub use event_loop::EventLoop;
pub use task_queue::{Task, TaskQueue};
