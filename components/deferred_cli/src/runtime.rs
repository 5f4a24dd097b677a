//! Scenario execution for the CLI.
//!
//! Each scenario builds a chain or combinator on a fresh event loop, drives
//! the loop until idle, and reports the settled value.

use crate::error::{CliError, CliResult};
use core_types::Value;
use deferred_runtime::{DeferredState, DeferredValue, EventLoop, Handler, Task};

/// Names of the available scenarios, in display order.
pub const SCENARIOS: &[&str] = &["chain", "recovery", "cleanup", "all", "race"];

/// Facade that owns an event loop and runs named scenarios on it.
#[derive(Debug, Default)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a runtime with an empty event loop.
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
        }
    }

    /// Runs a named scenario to completion.
    ///
    /// Drives the event loop until idle and reports the scenario's settled
    /// value, or the rejection reason as an error.
    pub fn run_scenario(&self, name: &str) -> CliResult<Value> {
        let deferred = match name {
            "chain" => self.chain(),
            "recovery" => self.recovery(),
            "cleanup" => self.cleanup(),
            "all" => self.fan_in(),
            "race" => self.first_wins(),
            other => return Err(CliError::UnknownScenario(other.to_string())),
        };
        self.events.run_until_idle();
        match deferred.state() {
            DeferredState::Fulfilled(value) => Ok(value),
            DeferredState::Rejected(reason) => Err(CliError::Rejected(reason)),
            DeferredState::Pending => Err(CliError::NeverSettled),
        }
    }

    /// A two-link string-building chain over an immediately resolved value.
    fn chain(&self) -> DeferredValue {
        DeferredValue::resolve(&self.events, Value::String("deferred".into()))
            .then(
                Some(Handler::new(|value| {
                    Ok(Value::String(format!("{value} values")).into())
                })),
                None,
            )
            .then(
                Some(Handler::new(|value| {
                    Ok(Value::String(format!("{value} settle in order")).into())
                })),
                None,
            )
    }

    /// A rejection recovered through `catch`.
    fn recovery(&self) -> DeferredValue {
        DeferredValue::reject(&self.events, Value::String("boom".into())).catch(Handler::new(
            |reason| Ok(Value::String(format!("recovered from {reason}")).into()),
        ))
    }

    /// A `finally` that runs without touching the settled value.
    fn cleanup(&self) -> DeferredValue {
        DeferredValue::resolve(&self.events, Value::Smi(7))
            .finally(|| Ok(Value::Undefined.into()))
    }

    /// `all` over a mix of plain values and a deferred that settles later.
    fn fan_in(&self) -> DeferredValue {
        let scheduler = self.events.clone();
        let slow = DeferredValue::new(&self.events, move |resolver| {
            scheduler.defer(Task::new(move || resolver.resolve(Value::Smi(2))));
            Ok(())
        });
        DeferredValue::all(
            &self.events,
            vec![Value::Smi(1).into(), slow.into(), Value::Smi(3).into()],
        )
    }

    /// `race` where an instant plain value beats a never-settling deferred.
    fn first_wins(&self) -> DeferredValue {
        let never = DeferredValue::new(&self.events, |_resolver| Ok(()));
        DeferredValue::race(
            &self.events,
            vec![never.into(), Value::String("instant".into()).into()],
        )
    }
}
