//! spool-core
//!
//! Keyed in-memory queueing with a paced, divertible drain.
//!
//! Producers append opaque values under an integer [`TaskId`]; a single
//! consumer later drains that task's queue as an ordered stream. While the
//! cancellation token stays live, values are delivered to the consumer at the
//! configured pace; once it fires, every remaining value is handed to the
//! configured [`Sink`] instead, and the traversal runs to completion.
//!
//! # Module layout
//! - **domain**: core types (TaskId, Effected, DrainItem)
//! - **ports**: abstraction seams (Sink)
//! - **queue**: the registry ([`Spool`]) and the drain engine
//! - **error**: error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod queue;

pub use domain::{DrainItem, Effected, TaskId};
pub use error::SpoolError;
pub use ports::{Sink, VecSink};
pub use queue::{DrainConfig, DrainStream, Spool};
