//! Drain configuration.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::error::SpoolError;
use crate::ports::Sink;

/// Options controlling one drain operation.
///
/// An explicit record with named fields and documented defaults; every
/// setter is chainable.
///
/// Defaults: `interval` zero (no pacing), no sink (diverted values are
/// dropped silently), no completion marker.
pub struct DrainConfig<T> {
    /// Pacing delay applied before processing each value, including the
    /// first. Signed so a caller-supplied negative value is rejected as
    /// [`SpoolError::InvalidInterval`] instead of silently clamped.
    pub interval: Duration,

    /// Destination for values diverted after cancellation fires.
    pub sink: Option<Arc<dyn Sink<T>>>,

    /// Emit a terminal [`DrainItem::Completed`](crate::DrainItem::Completed)
    /// before closing the stream.
    pub notify_on_completion: bool,
}

impl<T> DrainConfig<T> {
    pub fn new() -> Self {
        Self {
            interval: Duration::zero(),
            sink: None,
            notify_on_completion: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn Sink<T>>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn notify_on_completion(mut self, notify: bool) -> Self {
        self.notify_on_completion = notify;
        self
    }

    /// Validate the pacing interval and convert it for the timer.
    pub(crate) fn validated_interval(&self) -> Result<StdDuration, SpoolError> {
        self.interval
            .to_std()
            .map_err(|_| SpoolError::InvalidInterval(self.interval))
    }
}

impl<T> Default for DrainConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DrainConfig<T> {
    fn clone(&self) -> Self {
        Self {
            interval: self.interval,
            sink: self.sink.clone(),
            notify_on_completion: self.notify_on_completion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::VecSink;

    #[test]
    fn defaults_are_zero_interval_no_sink_no_marker() {
        let config: DrainConfig<u8> = DrainConfig::default();
        assert_eq!(config.interval, Duration::zero());
        assert!(config.sink.is_none());
        assert!(!config.notify_on_completion);
        assert_eq!(config.validated_interval().unwrap(), StdDuration::ZERO);
    }

    #[test]
    fn setters_chain() {
        let config: DrainConfig<u8> = DrainConfig::new()
            .with_interval(Duration::milliseconds(300))
            .with_sink(Arc::new(VecSink::new()))
            .notify_on_completion(true);

        assert_eq!(
            config.validated_interval().unwrap(),
            StdDuration::from_millis(300)
        );
        assert!(config.sink.is_some());
        assert!(config.notify_on_completion);
    }

    #[test]
    fn negative_interval_is_rejected() {
        let config: DrainConfig<u8> =
            DrainConfig::new().with_interval(Duration::milliseconds(-5));
        let err = config.validated_interval().unwrap_err();
        assert!(matches!(err, SpoolError::InvalidInterval(_)));
    }
}
