//! Enqueue receipt.

use serde::{Deserialize, Serialize};

use super::TaskId;

/// Snapshot returned from every enqueue call.
///
/// `already` is the queue length immediately before the call; `newness` is
/// the number of values appended by the call. Their sum is the queue length
/// right after the call (absent concurrent mutation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effected {
    pub task_id: TaskId,

    /// Queue length immediately before this call.
    pub already: usize,

    /// Number of values appended by this call (0 for an empty enqueue).
    pub newness: usize,
}
