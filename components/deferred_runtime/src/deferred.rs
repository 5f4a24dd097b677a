//! The deferred-value settlement machine and chaining operators.
//!
//! A [`DeferredValue`] is a three-state container: it starts pending, and
//! settles exactly once into a fulfilled value or a rejection reason.
//! Continuations registered through [`then`](DeferredValue::then) before
//! settlement wait in per-instance FIFO queues; continuations registered
//! after settlement are scheduled straight onto the owning [`EventLoop`].

use crate::event_loop::EventLoop;
use crate::resolution;
use crate::task_queue::Task;
use core_types::Value;
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

/// The state of a deferred value.
///
/// The settled payload lives inside the state: a value exists exactly when
/// the state is `Fulfilled`, a reason exactly when it is `Rejected`. Once
/// settled, a deferred value never changes state again.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredState {
    /// The initial state; neither fulfilled nor rejected.
    Pending,
    /// Settled with a value.
    Fulfilled(Value),
    /// Settled with a rejection reason.
    Rejected(Value),
}

impl DeferredState {
    /// Returns true while the value has not settled.
    pub fn is_pending(&self) -> bool {
        matches!(self, DeferredState::Pending)
    }
}

/// A value that may need further settlement: either a plain runtime value
/// or another deferred value whose eventual outcome should be adopted.
///
/// This is the element type of combinator inputs, the success payload of a
/// [`Handler`], and the input of the resolution procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum Eventual {
    /// A plain value, settled as-is.
    Value(Value),
    /// Another deferred value to adopt.
    Deferred(DeferredValue),
}

impl From<Value> for Eventual {
    fn from(value: Value) -> Self {
        Eventual::Value(value)
    }
}

impl From<DeferredValue> for Eventual {
    fn from(deferred: DeferredValue) -> Self {
        Eventual::Deferred(deferred)
    }
}

/// A one-shot continuation attached through `then`/`catch`.
///
/// The callback receives the parent's settled payload and either returns the
/// next [`Eventual`] or "throws" by returning `Err` with the thrown value,
/// which becomes the child's rejection reason.
pub struct Handler {
    callback: Box<dyn FnOnce(Value) -> Result<Eventual, Value>>,
}

impl Handler {
    /// Creates a new Handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Value) -> Result<Eventual, Value> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Substitute for an omitted fulfillment handler: passes the value
    /// through unchanged so it reaches the next link in the chain.
    pub fn identity() -> Self {
        Self::new(|value| Ok(Eventual::Value(value)))
    }

    /// Substitute for an omitted rejection handler: rethrows the reason so
    /// an unhandled rejection propagates instead of being swallowed.
    pub fn rethrow() -> Self {
        Self::new(Err)
    }

    /// Invokes the handler with the settled payload, consuming it.
    pub fn call(self, argument: Value) -> Result<Eventual, Value> {
        (self.callback)(argument)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler {{ ... }}")
    }
}

struct Inner {
    state: DeferredState,
    on_fulfilled: Vec<Task>,
    on_rejected: Vec<Task>,
    events: EventLoop,
}

/// A deferred value.
///
/// Represents the eventual completion (or failure) of an operation and its
/// resulting value. `DeferredValue` is a cheap cloneable handle; clones
/// refer to the same settlement state, and equality is handle identity.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use deferred_runtime::{DeferredState, DeferredValue, EventLoop};
///
/// let events = EventLoop::new();
/// let deferred = DeferredValue::new(&events, |resolver| {
///     resolver.resolve(Value::Smi(42));
///     Ok(())
/// });
///
/// assert_eq!(deferred.state(), DeferredState::Fulfilled(Value::Smi(42)));
/// ```
#[derive(Clone)]
pub struct DeferredValue {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for DeferredValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for DeferredValue {}

impl fmt::Debug for DeferredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredValue")
            .field("state", &self.inner.borrow().state)
            .finish_non_exhaustive()
    }
}

/// The settlement capability handed to an executor.
///
/// Both methods funnel into the one-time settle transition: whichever is
/// called first wins, and every later call on any clone is silently
/// ignored.
#[derive(Debug, Clone)]
pub struct Resolver {
    target: DeferredValue,
}

impl Resolver {
    /// Fulfills the target with `value`. No-op once settled.
    pub fn resolve(&self, value: Value) {
        self.target.fulfill(value);
    }

    /// Rejects the target with `reason`. No-op once settled.
    pub fn reject(&self, reason: Value) {
        self.target.reject_with(reason);
    }
}

impl DeferredValue {
    /// Creates a deferred value and synchronously invokes `executor` with
    /// its [`Resolver`].
    ///
    /// An executor that fails (the throw analogue: returning `Err`) rejects
    /// the instance with the returned value — unless the executor already
    /// settled it, in which case the failure is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop};
    ///
    /// let events = EventLoop::new();
    /// let failed = DeferredValue::new(&events, |_resolver| {
    ///     Err(Value::String("executor blew up".into()))
    /// });
    ///
    /// assert_eq!(
    ///     failed.state(),
    ///     DeferredState::Rejected(Value::String("executor blew up".into())),
    /// );
    /// ```
    pub fn new<F>(events: &EventLoop, executor: F) -> DeferredValue
    where
        F: FnOnce(Resolver) -> Result<(), Value>,
    {
        let deferred = DeferredValue::pending(events);
        let resolver = Resolver {
            target: deferred.clone(),
        };
        if let Err(reason) = executor(resolver) {
            deferred.reject_with(reason);
        }
        deferred
    }

    /// Wraps `value` in a deferred value.
    ///
    /// An existing deferred value is returned unchanged — no double
    /// wrapping; anything else produces a new, immediately fulfilled
    /// instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredValue, EventLoop};
    ///
    /// let events = EventLoop::new();
    /// let d = DeferredValue::resolve(&events, Value::Smi(1));
    /// assert_eq!(DeferredValue::resolve(&events, d.clone()), d);
    /// ```
    pub fn resolve(events: &EventLoop, value: impl Into<Eventual>) -> DeferredValue {
        match value.into() {
            Eventual::Deferred(existing) => existing,
            Eventual::Value(value) => {
                let deferred = DeferredValue::pending(events);
                deferred.fulfill(value);
                deferred
            }
        }
    }

    /// Returns a new deferred value immediately rejected with `reason`.
    ///
    /// The reject path never unwraps anything.
    pub fn reject(events: &EventLoop, reason: Value) -> DeferredValue {
        let deferred = DeferredValue::pending(events);
        deferred.reject_with(reason);
        deferred
    }

    /// Registers continuations for this value's settlement and returns the
    /// chained child deferred value.
    ///
    /// A missing `on_fulfilled` is substituted with [`Handler::identity`],
    /// a missing `on_rejected` with [`Handler::rethrow`]. The handler
    /// invocation and the hand-off of its result into the child run as one
    /// task on the event loop, so the child is never settled in the same
    /// synchronous run that registered it — even when this value is already
    /// settled. A handler that fails rejects the child with the thrown
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop, Handler};
    ///
    /// let events = EventLoop::new();
    /// let doubled = DeferredValue::resolve(&events, Value::Smi(21)).then(
    ///     Some(Handler::new(|value| match value {
    ///         Value::Smi(n) => Ok(Value::Smi(n * 2).into()),
    ///         other => Ok(other.into()),
    ///     })),
    ///     None,
    /// );
    ///
    /// assert!(doubled.state().is_pending());
    /// events.run_until_idle();
    /// assert_eq!(doubled.state(), DeferredState::Fulfilled(Value::Smi(42)));
    /// ```
    pub fn then(&self, on_fulfilled: Option<Handler>, on_rejected: Option<Handler>) -> DeferredValue {
        let on_fulfilled = on_fulfilled.unwrap_or_else(Handler::identity);
        let on_rejected = on_rejected.unwrap_or_else(Handler::rethrow);
        let child = DeferredValue::pending(&self.events());
        let fulfill_child = child.clone();
        let reject_child = child.clone();
        self.on_outcome(
            move |value| resolution::complete(&fulfill_child, on_fulfilled.call(value)),
            move |reason| resolution::complete(&reject_child, on_rejected.call(reason)),
        );
        child
    }

    /// Registers a rejection continuation only.
    ///
    /// Equivalent to `then(None, Some(on_rejected))`: fulfillment passes
    /// through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop, Handler};
    ///
    /// let events = EventLoop::new();
    /// let recovered = DeferredValue::reject(&events, Value::String("e".into()))
    ///     .catch(Handler::new(|_reason| Ok(Value::Smi(0).into())));
    ///
    /// events.run_until_idle();
    /// assert_eq!(recovered.state(), DeferredState::Fulfilled(Value::Smi(0)));
    /// ```
    pub fn catch(&self, on_rejected: Handler) -> DeferredValue {
        self.then(None, Some(on_rejected))
    }

    /// Runs `on_settled` exactly once when this value settles, without
    /// observing the payload, then re-delivers the original outcome.
    ///
    /// If `on_settled` returns a deferred value, the original outcome waits
    /// for it. If `on_settled` fails — or its deferred result rejects —
    /// that failure overrides the original outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let events = EventLoop::new();
    /// let seen = Rc::new(Cell::new(false));
    /// let flag = Rc::clone(&seen);
    /// let after = DeferredValue::resolve(&events, Value::Smi(7)).finally(move || {
    ///     flag.set(true);
    ///     Ok(Value::Undefined.into())
    /// });
    ///
    /// events.run_until_idle();
    /// assert!(seen.get());
    /// assert_eq!(after.state(), DeferredState::Fulfilled(Value::Smi(7)));
    /// ```
    pub fn finally<F>(&self, on_settled: F) -> DeferredValue
    where
        F: FnOnce() -> Result<Eventual, Value> + 'static,
    {
        let events = self.events();
        // Only one of the two settlement branches ever runs, so the shared
        // slot still holds the callback when either takes it.
        let on_settled = Rc::new(RefCell::new(Some(on_settled)));
        let settled_for_reject = Rc::clone(&on_settled);
        let fulfill_events = events.clone();
        let on_fulfilled = Handler::new(move |value| {
            let side = run_settled(&fulfill_events, &on_settled)?;
            let restore = Handler::new(move |_| Ok(Eventual::Value(value)));
            Ok(Eventual::Deferred(side.then(Some(restore), None)))
        });
        let on_rejected = Handler::new(move |reason| {
            let side = run_settled(&events, &settled_for_reject)?;
            let restore = Handler::new(move |_| Err(reason));
            Ok(Eventual::Deferred(side.then(Some(restore), None)))
        });
        self.then(Some(on_fulfilled), Some(on_rejected))
    }

    /// Returns a snapshot of the current state, payload included.
    pub fn state(&self) -> DeferredState {
        self.inner.borrow().state.clone()
    }

    pub(crate) fn pending(events: &EventLoop) -> DeferredValue {
        DeferredValue {
            inner: Rc::new(RefCell::new(Inner {
                state: DeferredState::Pending,
                on_fulfilled: Vec::new(),
                on_rejected: Vec::new(),
                events: events.clone(),
            })),
        }
    }

    pub(crate) fn events(&self) -> EventLoop {
        self.inner.borrow().events.clone()
    }

    pub(crate) fn fulfill(&self, value: Value) {
        self.settle(DeferredState::Fulfilled(value));
    }

    pub(crate) fn reject_with(&self, reason: Value) {
        self.settle(DeferredState::Rejected(reason));
    }

    /// Subscribes to this instance's settlement. The callback matching the
    /// eventual outcome is scheduled on the event loop; the other is
    /// dropped unrun.
    pub(crate) fn on_outcome<F, R>(&self, on_fulfilled: F, on_rejected: R)
    where
        F: FnOnce(Value) + 'static,
        R: FnOnce(Value) + 'static,
    {
        let events = self.events();
        match self.state() {
            DeferredState::Pending => {
                let parent = self.clone();
                let fulfill_events = events.clone();
                self.inner.borrow_mut().on_fulfilled.push(Task::new(move || {
                    if let DeferredState::Fulfilled(value) = parent.state() {
                        fulfill_events.defer(Task::new(move || on_fulfilled(value)));
                    }
                }));
                let parent = self.clone();
                self.inner.borrow_mut().on_rejected.push(Task::new(move || {
                    if let DeferredState::Rejected(reason) = parent.state() {
                        events.defer(Task::new(move || on_rejected(reason)));
                    }
                }));
            }
            DeferredState::Fulfilled(value) => {
                events.defer(Task::new(move || on_fulfilled(value)));
            }
            DeferredState::Rejected(reason) => {
                events.defer(Task::new(move || on_rejected(reason)));
            }
        }
    }

    /// One-time transition out of `Pending`. Stores the payload, drains the
    /// queue matching the new state in registration order, and permanently
    /// empties both queues. No-op if already settled.
    fn settle(&self, next: DeferredState) {
        let drained = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_pending() {
                return;
            }
            let fulfilled = matches!(next, DeferredState::Fulfilled(_));
            inner.state = next;
            let drained = if fulfilled {
                mem::take(&mut inner.on_fulfilled)
            } else {
                mem::take(&mut inner.on_rejected)
            };
            inner.on_fulfilled.clear();
            inner.on_rejected.clear();
            drained
        };
        // The borrow is released before continuations run: each one
        // re-enters this instance through `state()`.
        for task in drained {
            task.run();
        }
    }
}

/// Runs a `finally` callback and wraps its outcome for adoption by the
/// settlement branch that took it.
fn run_settled<F>(events: &EventLoop, slot: &Rc<RefCell<Option<F>>>) -> Result<DeferredValue, Value>
where
    F: FnOnce() -> Result<Eventual, Value> + 'static,
{
    let callback = slot.borrow_mut().take();
    let outcome = match callback {
        Some(callback) => callback()?,
        None => Eventual::Value(Value::Undefined),
    };
    Ok(DeferredValue::resolve(events, outcome))
}
