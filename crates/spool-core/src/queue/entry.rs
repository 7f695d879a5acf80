//! Per-task queue entry.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One task's queue plus its drain guard.
///
/// The queue lock is taken per append/take step, never for a whole drain,
/// so a traversal in progress still sees values appended behind its cursor.
pub(crate) struct TaskEntry<T> {
    values: Mutex<VecDeque<T>>,

    /// Set while a drain task owns the traversal. Never cleared: the entry
    /// is removed wholesale when the drain completes.
    draining: AtomicBool,
}

impl<T> TaskEntry<T> {
    pub(crate) fn new() -> Self {
        Self {
            values: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
        }
    }

    /// Append values at the tail, returning `(length before, appended count)`.
    pub(crate) fn append(&self, values: impl IntoIterator<Item = T>) -> (usize, usize) {
        let mut queue = self.values.lock().unwrap();
        let already = queue.len();
        let mut newness = 0;
        for value in values {
            queue.push_back(value);
            newness += 1;
        }
        (already, newness)
    }

    /// Take the current front value, if any.
    pub(crate) fn take_next(&self) -> Option<T> {
        self.values.lock().unwrap().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    /// Claim the traversal. Returns false if a drain already holds it.
    pub(crate) fn claim_drain(&self) -> bool {
        !self.draining.swap(true, Ordering::AcqRel)
    }
}
