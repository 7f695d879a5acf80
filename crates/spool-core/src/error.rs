use thiserror::Error;

use crate::domain::TaskId;

#[derive(Debug, Error)]
pub enum SpoolError {
    /// A drain is already traversing this task's queue. Two drains over the
    /// same queue would interleave non-deterministically, so the second one
    /// is rejected up front.
    #[error("drain already active for {0}")]
    DrainAlreadyActive(TaskId),

    /// The configured pacing interval is negative.
    #[error("negative drain interval: {0}")]
    InvalidInterval(chrono::Duration),

    /// Reported by a sink implementation. The drain engine logs this and
    /// keeps traversing; it never aborts on a sink failure.
    #[error("sink failed: {0}")]
    Sink(String),
}
