//! Drain engine: paced traversal with sticky diversion on cancellation.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_stream::Stream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::config::DrainConfig;
use super::entry::TaskEntry;
use super::{EntryMap, Spool};
use crate::domain::{DrainItem, TaskId};
use crate::error::SpoolError;
use crate::ports::Sink;

/// Consumer handle for one drain. Finite and not restartable: once it ends,
/// the task's queue entry is gone.
pub struct DrainStream<T> {
    rx: mpsc::Receiver<DrainItem<T>>,
}

impl<T> DrainStream<T> {
    /// Next item, or `None` once the drain has completed and closed the
    /// stream. By the time `None` is observed, the queue entry has already
    /// been deleted from the registry.
    pub async fn recv(&mut self) -> Option<DrainItem<T>> {
        self.rx.recv().await
    }
}

impl<T> fmt::Debug for DrainStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrainStream").field("rx", &self.rx).finish()
    }
}

impl<T> Stream for DrainStream<T> {
    type Item = DrainItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T: Send + 'static> Spool<T> {
    /// Drain the task's queue as an ordered stream.
    ///
    /// Returns the stream handle immediately; the traversal runs as a
    /// spawned task (callers must be inside a tokio runtime). Values are
    /// visited in enqueue order over the live queue, so values appended
    /// while the drain runs are still observed, as long as they land before
    /// the traversal reaches the end.
    ///
    /// While `cancel` has not fired, each value is delivered to the stream
    /// after `config.interval` of pacing. From the first moment the token is
    /// observed fired, every remaining value goes to `config.sink` instead
    /// (or is dropped if no sink is configured); the traversal never
    /// reverts. On completion the queue entry is deleted.
    ///
    /// # Errors
    /// - [`SpoolError::InvalidInterval`] for a negative pacing interval.
    /// - [`SpoolError::DrainAlreadyActive`] if another drain holds this
    ///   task's traversal; the in-progress drain is unaffected.
    ///
    /// Draining an absent task is not an error: the stream is empty and
    /// closed from the start.
    pub fn drain(
        &self,
        cancel: CancellationToken,
        task_id: TaskId,
        config: DrainConfig<T>,
    ) -> Result<DrainStream<T>, SpoolError> {
        let interval = config.validated_interval()?;

        // Capacity 1: the stream send is the one back-pressure point, so the
        // engine stays at most one value ahead of the consumer.
        let (tx, rx) = mpsc::channel(1);

        let Some(entry) = self.entry(task_id) else {
            // Absent task: tx drops here, closing the stream immediately.
            return Ok(DrainStream { rx });
        };
        if !entry.claim_drain() {
            return Err(SpoolError::DrainAlreadyActive(task_id));
        }
        if self.log_lifecycle {
            info!(%task_id, interval_ms = interval.as_millis() as u64, "drain started");
        }

        let worker = DrainWorker {
            task_id,
            entry,
            entries: Arc::clone(&self.entries),
            interval,
            sink: config.sink,
            notify_on_completion: config.notify_on_completion,
            log_lifecycle: self.log_lifecycle,
        };
        tokio::spawn(worker.run(cancel, tx));

        Ok(DrainStream { rx })
    }
}

/// State owned by one spawned drain task.
struct DrainWorker<T> {
    task_id: TaskId,
    entry: Arc<TaskEntry<T>>,
    entries: EntryMap<T>,
    interval: Duration,
    sink: Option<Arc<dyn Sink<T>>>,
    notify_on_completion: bool,
    log_lifecycle: bool,
}

impl<T: Send + 'static> DrainWorker<T> {
    async fn run(self, cancel: CancellationToken, tx: mpsc::Sender<DrainItem<T>>) {
        let mut delivered = 0usize;
        let mut diverted = 0usize;
        let mut diverting = false;
        let mut consumer_gone = false;

        while let Some(value) = self.entry.take_next() {
            if !self.interval.is_zero() {
                sleep(self.interval).await;
            }

            // Sticky: once observed fired, never re-checked back to false.
            if !diverting && cancel.is_cancelled() {
                diverting = true;
                if self.log_lifecycle {
                    info!(task_id = %self.task_id, "cancellation observed, diverting remainder");
                }
            }

            if diverting {
                diverted += 1;
                match &self.sink {
                    Some(sink) => {
                        if let Err(err) = sink.consume(value).await {
                            // A failing sink must not abort the traversal;
                            // the remaining values still need a destination.
                            warn!(task_id = %self.task_id, %err, "sink failed, continuing");
                        } else if self.log_lifecycle {
                            info!(task_id = %self.task_id, "value diverted to sink");
                        }
                    }
                    // No sink configured: the value is dropped. Documented
                    // policy, not an accident.
                    None => {}
                }
            } else if tx.send(DrainItem::Value(value)).await.is_ok() {
                delivered += 1;
            } else {
                // Consumer dropped the stream handle; nothing can receive
                // the remainder, so stop and clean up.
                consumer_gone = true;
                break;
            }
        }

        if self.notify_on_completion && !consumer_gone {
            let _ = tx.send(DrainItem::Completed).await;
        }

        // Delete before the stream closes: when the consumer sees the end,
        // `exists` is already false.
        self.entries.lock().unwrap().remove(&self.task_id);
        if self.log_lifecycle {
            info!(task_id = %self.task_id, delivered, diverted, "drain completed, queue deleted");
        }
    }
}
