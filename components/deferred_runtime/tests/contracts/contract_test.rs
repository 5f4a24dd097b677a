//! Contract tests for the deferred_runtime component
//!
//! These tests verify the public API surface: signatures, return types and
//! the identity semantics callers rely on.

use core_types::Value;
use deferred_runtime::{
    AggregateArg, DeferredState, DeferredValue, EventLoop, Eventual, Handler, Task, TaskQueue,
};

mod event_loop_contract {
    use super::*;

    #[test]
    fn event_loop_new_returns_self() {
        let events = EventLoop::new();
        let _ = events;
    }

    #[test]
    fn event_loop_default_matches_new() {
        let events = EventLoop::default();
        assert!(events.is_idle());
    }

    #[test]
    fn event_loop_clones_share_one_queue() {
        let events = EventLoop::new();
        let handle = events.clone();
        handle.defer(Task::new(|| {}));
        assert_eq!(events.pending_tasks(), 1);
        events.run_until_idle();
        assert!(handle.is_idle());
    }

    #[test]
    fn task_queue_is_constructible_standalone() {
        let mut queue = TaskQueue::new();
        queue.enqueue(Task::new(|| {}));
        assert_eq!(queue.len(), 1);
        assert!(queue.dequeue().is_some());
        assert!(queue.is_empty());
    }
}

mod deferred_contract {
    use super::*;

    #[test]
    fn new_returns_a_deferred_value() {
        let events = EventLoop::new();
        let deferred: DeferredValue = DeferredValue::new(&events, |_resolver| Ok(()));
        assert!(matches!(deferred.state(), DeferredState::Pending));
    }

    #[test]
    fn state_returns_a_snapshot_with_payload() {
        let events = EventLoop::new();
        let deferred = DeferredValue::resolve(&events, Value::Smi(3));
        let snapshot: DeferredState = deferred.state();
        assert_eq!(snapshot, DeferredState::Fulfilled(Value::Smi(3)));
    }

    #[test]
    fn chaining_operators_return_deferred_values() {
        let events = EventLoop::new();
        let deferred = DeferredValue::resolve(&events, Value::Smi(1));
        let _then: DeferredValue = deferred.then(None, None);
        let _catch: DeferredValue = deferred.catch(Handler::rethrow());
        let _finally: DeferredValue = deferred.finally(|| Ok(Value::Undefined.into()));
    }

    #[test]
    fn equality_is_handle_identity() {
        let events = EventLoop::new();
        let deferred = DeferredValue::new(&events, |_resolver| Ok(()));
        assert_eq!(deferred, deferred.clone());
        let other = DeferredValue::new(&events, |_resolver| Ok(()));
        assert_ne!(deferred, other);
    }

    #[test]
    fn statics_return_deferred_values() {
        let events = EventLoop::new();
        let _resolved: DeferredValue = DeferredValue::resolve(&events, Value::Smi(1));
        let _rejected: DeferredValue = DeferredValue::reject(&events, Value::Smi(1));
        let _all: DeferredValue = DeferredValue::all(&events, Vec::new());
        let _race: DeferredValue = DeferredValue::race(&events, Vec::new());
    }
}

mod handler_contract {
    use super::*;

    #[test]
    fn handler_call_consumes_and_returns_an_outcome() {
        let handler = Handler::new(|value| Ok(Eventual::Value(value)));
        assert_eq!(
            handler.call(Value::Smi(2)),
            Ok(Eventual::Value(Value::Smi(2)))
        );
    }

    #[test]
    fn substitutes_exist_for_omitted_callbacks() {
        assert!(Handler::identity().call(Value::Null).is_ok());
        assert!(Handler::rethrow().call(Value::Null).is_err());
    }
}

mod eventual_contract {
    use super::*;

    #[test]
    fn values_and_deferreds_convert_into_eventual() {
        let events = EventLoop::new();
        let plain: Eventual = Value::Smi(1).into();
        assert!(matches!(plain, Eventual::Value(_)));
        let deferred: Eventual = DeferredValue::resolve(&events, Value::Smi(1)).into();
        assert!(matches!(deferred, Eventual::Deferred(_)));
    }

    #[test]
    fn aggregate_arg_classifies_values() {
        let items: AggregateArg = Value::List(vec![Value::Smi(1)]).into();
        assert!(matches!(items, AggregateArg::Items(_)));
        let invalid: AggregateArg = Value::Smi(1).into();
        assert!(matches!(invalid, AggregateArg::NotIterable(_)));
    }
}
