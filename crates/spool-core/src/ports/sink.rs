//! Sink port: single-value consumption used during diversion.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SpoolError;

/// Destination for values diverted away from the consumer stream after
/// cancellation fires.
///
/// Consumes exactly one value per invocation. The drain engine does not
/// retry: an `Err` is logged and the traversal continues with the next
/// value, since diversion exists specifically to salvage what remains.
#[async_trait]
pub trait Sink<T>: Send + Sync {
    async fn consume(&self, value: T) -> Result<(), SpoolError>;
}

/// Sink that records every value it receives, in arrival order.
///
/// Used by tests and the demo binary to observe what got diverted.
pub struct VecSink<T> {
    values: Mutex<Vec<T>>,
}

impl<T> VecSink<T> {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(Vec::new()),
        }
    }

    /// Values received so far.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for VecSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Send> Sink<T> for VecSink<T> {
    async fn consume(&self, value: T) -> Result<(), SpoolError> {
        self.values.lock().unwrap().push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn vec_sink_records_in_arrival_order() {
        let sink = VecSink::new();
        sink.consume("a").await.unwrap();
        sink.consume("b").await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.values(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn empty_sink_reports_empty() {
        let sink: VecSink<u32> = VecSink::default();
        assert!(sink.is_empty());
        assert!(sink.values().is_empty());
    }
}
