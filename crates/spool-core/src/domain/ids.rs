//! Strongly-typed task identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Externally chosen integer key identifying one queue.
///
/// Uniqueness is the caller's responsibility; no format validation is done.
/// The newtype exists so a TaskId cannot be confused with other integers
/// (counts, lengths) at compile time.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(i64);

impl TaskId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_task_prefix() {
        assert_eq!(TaskId::new(42).to_string(), "task-42");
        assert_eq!(TaskId::new(-1).to_string(), "task--1");
    }

    #[test]
    fn from_i64_roundtrips() {
        let id: TaskId = 7.into();
        assert_eq!(id.as_i64(), 7);
        assert_eq!(id, TaskId::new(7));
    }
}
