//! Aggregation combinators over collections of deferred and plain values.

use crate::deferred::{DeferredValue, Eventual};
use crate::event_loop::EventLoop;
use core_types::{JsError, Value};
use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::Rc;

/// Suffix of the rejection message for a non-iterable combinator argument.
const NOT_ITERABLE: &str = "is not iterable (cannot read property Symbol(Symbol.iterator))";

/// Argument accepted by [`DeferredValue::all`] and [`DeferredValue::race`].
///
/// The combinators take a loosely-typed argument and reject anything that
/// does not carry elements; this enum keeps that failure path representable.
/// A `Vec` of elements converts to `Items`; a plain [`Value`] converts to
/// `Items` when it is a list and to `NotIterable` otherwise.
#[derive(Debug)]
pub enum AggregateArg {
    /// A sequence of elements, each plain or deferred.
    Items(Vec<Eventual>),
    /// Anything else; the combinator rejects with a `TypeError` naming it.
    NotIterable(Value),
}

impl From<Vec<Eventual>> for AggregateArg {
    fn from(items: Vec<Eventual>) -> Self {
        AggregateArg::Items(items)
    }
}

impl From<Value> for AggregateArg {
    fn from(value: Value) -> Self {
        match value {
            Value::List(items) => {
                AggregateArg::Items(items.into_iter().map(Eventual::Value).collect())
            }
            other => AggregateArg::NotIterable(other),
        }
    }
}

fn not_iterable(argument: &Value) -> Value {
    Value::Error(JsError::type_error(format!("{argument} {NOT_ITERABLE}")))
}

impl DeferredValue {
    /// Fans every element into one deferred value.
    ///
    /// Fulfills with the results in input order once every element has
    /// fulfilled — plain elements count as settled immediately — or rejects
    /// with the first rejection from any element. An empty input fulfills
    /// immediately with an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop};
    ///
    /// let events = EventLoop::new();
    /// let combined = DeferredValue::all(
    ///     &events,
    ///     vec![
    ///         Value::Smi(1).into(),
    ///         DeferredValue::resolve(&events, Value::Smi(2)).into(),
    ///         Value::Smi(3).into(),
    ///     ],
    /// );
    ///
    /// events.run_until_idle();
    /// assert_eq!(
    ///     combined.state(),
    ///     DeferredState::Fulfilled(Value::List(vec![
    ///         Value::Smi(1),
    ///         Value::Smi(2),
    ///         Value::Smi(3),
    ///     ])),
    /// );
    /// ```
    pub fn all(events: &EventLoop, items: impl Into<AggregateArg>) -> DeferredValue {
        let deferred = DeferredValue::pending(events);
        let items = match items.into() {
            AggregateArg::Items(items) => items,
            AggregateArg::NotIterable(argument) => {
                deferred.reject_with(not_iterable(&argument));
                return deferred;
            }
        };
        if items.is_empty() {
            deferred.fulfill(Value::List(Vec::new()));
            return deferred;
        }
        let total = items.len();
        let results = Rc::new(RefCell::new(vec![Value::Undefined; total]));
        let remaining = Rc::new(Cell::new(total));
        for (index, item) in items.into_iter().enumerate() {
            let results = Rc::clone(&results);
            let remaining = Rc::clone(&remaining);
            let target = deferred.clone();
            let store = move |value: Value| {
                results.borrow_mut()[index] = value;
                remaining.set(remaining.get() - 1);
                if remaining.get() == 0 {
                    let collected = mem::take(&mut *results.borrow_mut());
                    target.fulfill(Value::List(collected));
                }
            };
            match item {
                Eventual::Value(value) => store(value),
                Eventual::Deferred(other) => {
                    let target = deferred.clone();
                    other.on_outcome(store, move |reason| target.reject_with(reason));
                }
            }
        }
        deferred
    }

    /// Settles with the outcome of the first element to settle.
    ///
    /// A plain element settles instantly and short-circuits iteration over
    /// later elements; otherwise the first deferred element to fulfill or
    /// reject decides the outcome, and later settlements are ignored. An
    /// empty input never settles.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred_runtime::{DeferredState, DeferredValue, EventLoop};
    ///
    /// let events = EventLoop::new();
    /// let first = DeferredValue::race(
    ///     &events,
    ///     vec![Value::Smi(1).into(), Value::Smi(2).into()],
    /// );
    ///
    /// events.run_until_idle();
    /// assert_eq!(first.state(), DeferredState::Fulfilled(Value::Smi(1)));
    /// ```
    pub fn race(events: &EventLoop, items: impl Into<AggregateArg>) -> DeferredValue {
        let deferred = DeferredValue::pending(events);
        let items = match items.into() {
            AggregateArg::Items(items) => items,
            AggregateArg::NotIterable(argument) => {
                deferred.reject_with(not_iterable(&argument));
                return deferred;
            }
        };
        for item in items {
            match item {
                Eventual::Value(value) => {
                    deferred.fulfill(value);
                    break;
                }
                Eventual::Deferred(other) => {
                    let win = deferred.clone();
                    let lose = deferred.clone();
                    other.on_outcome(
                        move |value| win.fulfill(value),
                        move |reason| lose.reject_with(reason),
                    );
                }
            }
        }
        deferred
    }
}
