//! Event loop implementation.
//!
//! This module provides the cooperative event loop that executes deferred
//! tasks. Settlement hand-off between a deferred value and its chained
//! children always travels through this loop, which is what keeps `then`
//! from settling its child in the same synchronous run that created it.

use crate::task_queue::{Task, TaskQueue};
use std::cell::RefCell;
use std::rc::Rc;

/// The cooperative event loop driving deferred-value settlement.
///
/// Cloning an `EventLoop` yields another handle to the same queue; every
/// deferred value holds one so that continuation hand-off can be scheduled
/// without an ambient timer. Execution is single-threaded: tasks run only
/// while a caller drives [`run_until_idle`](Self::run_until_idle) or
/// [`run_next`](Self::run_next).
///
/// # Examples
///
/// ```
/// use deferred_runtime::{EventLoop, Task};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let events = EventLoop::new();
/// let counter = Rc::new(Cell::new(0));
///
/// let c = Rc::clone(&counter);
/// events.defer(Task::new(move || c.set(c.get() + 1)));
///
/// events.run_until_idle();
/// assert_eq!(counter.get(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    deferred: Rc<RefCell<TaskQueue>>,
}

impl EventLoop {
    /// Creates a new EventLoop with an empty queue.
    pub fn new() -> Self {
        Self {
            deferred: Rc::new(RefCell::new(TaskQueue::new())),
        }
    }

    /// Pushes a task for execution after the current synchronous run.
    pub fn defer(&self, task: Task) {
        self.deferred.borrow_mut().enqueue(task);
    }

    /// Executes at most one task.
    ///
    /// Returns whether a task ran. The queue borrow is released before the
    /// task executes, so tasks may defer further tasks.
    pub fn run_next(&self) -> bool {
        let next = self.deferred.borrow_mut().dequeue();
        match next {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Drains the queue in FIFO order until it is empty.
    ///
    /// Tasks enqueued by running tasks are also processed before this
    /// method returns.
    pub fn run_until_idle(&self) {
        while self.run_next() {}
    }

    /// Returns true if no tasks are waiting.
    pub fn is_idle(&self) -> bool {
        self.deferred.borrow().is_empty()
    }

    /// Returns the number of tasks waiting to run.
    pub fn pending_tasks(&self) -> usize {
        self.deferred.borrow().len()
    }
}
