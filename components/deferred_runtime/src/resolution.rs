//! The resolution procedure.
//!
//! Decides how a continuation's outcome settles the chained child: adopt
//! another deferred value, reject a self-reference cycle, or settle with
//! the plain value. This is the only place foreign outcomes are unwrapped;
//! `then` and the static constructors never unwrap on their own.

use crate::deferred::{DeferredValue, Eventual};
use core_types::{JsError, Value};

/// Rejection message for a continuation that returns its own child.
pub(crate) const CHAINING_CYCLE: &str = "Chaining cycle detected for promise #<Promise>";

/// Applies a continuation outcome to `child`: thrown reasons reject it,
/// returned values go through [`resolve_into`].
pub(crate) fn complete(child: &DeferredValue, outcome: Result<Eventual, Value>) {
    match outcome {
        Ok(eventual) => resolve_into(child, eventual),
        Err(reason) => child.reject_with(reason),
    }
}

/// Settles `child` from `eventual`.
///
/// Adoption is recursive: when the adopted value fulfills, its payload is
/// fed back through this procedure, so arbitrarily deep chains flatten.
/// The recursion is bounded by identity equality — a value can never adopt
/// itself.
pub(crate) fn resolve_into(child: &DeferredValue, eventual: Eventual) {
    match eventual {
        Eventual::Deferred(ref other) if other == child => {
            child.reject_with(Value::Error(JsError::type_error(CHAINING_CYCLE)));
        }
        Eventual::Deferred(other) => {
            let adopt = child.clone();
            let propagate = child.clone();
            other.on_outcome(
                move |value| resolve_into(&adopt, Eventual::Value(value)),
                move |reason| propagate.reject_with(reason),
            );
        }
        Eventual::Value(value) => child.fulfill(value),
    }
}
