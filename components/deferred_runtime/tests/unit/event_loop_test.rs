//! Unit tests for tick-granular scheduling of settlement hand-off.

use core_types::Value;
use deferred_runtime::{DeferredState, DeferredValue, EventLoop, Handler, Task};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn then_child_settles_exactly_one_tick_later() {
    let events = EventLoop::new();
    let child = DeferredValue::resolve(&events, Value::Smi(1)).then(None, None);

    assert!(child.state().is_pending());
    assert!(events.run_next());
    assert_eq!(child.state(), DeferredState::Fulfilled(Value::Smi(1)));
}

#[test]
fn each_chain_link_takes_its_own_tick() {
    let events = EventLoop::new();
    let first = DeferredValue::resolve(&events, Value::Smi(1)).then(None, None);
    let second = first.then(None, None);

    assert!(events.run_next());
    assert_eq!(first.state(), DeferredState::Fulfilled(Value::Smi(1)));
    assert!(second.state().is_pending());

    assert!(events.run_next());
    assert_eq!(second.state(), DeferredState::Fulfilled(Value::Smi(1)));
    assert!(!events.run_next());
}

#[test]
fn deferred_tasks_interleave_with_settlement_in_fifo_order() {
    let events = EventLoop::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&order);
    DeferredValue::resolve(&events, Value::Undefined).then(
        Some(Handler::new(move |value| {
            log.borrow_mut().push("handler");
            Ok(value.into())
        })),
        None,
    );

    let log = Rc::clone(&order);
    events.defer(Task::new(move || log.borrow_mut().push("task")));

    events.run_until_idle();
    assert_eq!(*order.borrow(), vec!["handler", "task"]);
}

#[test]
fn loop_is_idle_after_a_chain_completes() {
    let events = EventLoop::new();
    let done = DeferredValue::resolve(&events, Value::Smi(1))
        .then(None, None)
        .then(None, None)
        .then(None, None);

    events.run_until_idle();
    assert!(events.is_idle());
    assert_eq!(done.state(), DeferredState::Fulfilled(Value::Smi(1)));
}
