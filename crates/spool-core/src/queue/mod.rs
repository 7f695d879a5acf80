//! Queue module: the registry and the drain engine.

mod config;
mod drain;
mod entry;

pub use self::config::DrainConfig;
pub use self::drain::DrainStream;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::domain::{Effected, TaskId};
use self::entry::TaskEntry;

/// The registry map. Shared with drain tasks so they can remove their entry
/// on completion.
pub(crate) type EntryMap<T> = Arc<Mutex<HashMap<TaskId, Arc<TaskEntry<T>>>>>;

/// Keyed in-memory queue registry.
///
/// Producers call [`Spool::enqueue`]; a consumer calls [`Spool::drain`]
/// (see `drain.rs`) to stream one task's values out.
///
/// Locking is two-level: the outer map lock is held only for
/// lookup/create/delete, and each task carries its own queue lock taken per
/// append/take step. Enqueues on distinct TaskIds therefore do not contend
/// beyond the brief map access, and a drain in progress still observes
/// values appended behind its cursor.
pub struct Spool<T> {
    pub(crate) entries: EntryMap<T>,
    pub(crate) log_lifecycle: bool,
}

impl<T> Spool<T> {
    /// Registry with lifecycle logging disabled.
    pub fn new() -> Self {
        Self::with_lifecycle_logging(false)
    }

    /// Registry that emits `tracing` events at lifecycle points
    /// (queue created, drain started/completed, value diverted, queue deleted).
    pub fn with_logging() -> Self {
        Self::with_lifecycle_logging(true)
    }

    fn with_lifecycle_logging(log_lifecycle: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            log_lifecycle,
        }
    }

    /// Append `values` to the task's queue, creating the queue on first use.
    ///
    /// Always succeeds. Values are appended in iteration order. An empty
    /// `values` is a no-op that still materializes the queue entry and
    /// returns `newness = 0`.
    pub fn enqueue(&self, task_id: TaskId, values: impl IntoIterator<Item = T>) -> Effected {
        let (entry, created) = {
            let mut entries = self.entries.lock().unwrap();
            match entries.entry(task_id) {
                Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
                Entry::Vacant(vacant) => {
                    (Arc::clone(vacant.insert(Arc::new(TaskEntry::new()))), true)
                }
            }
        };
        if created && self.log_lifecycle {
            info!(%task_id, "queue created");
        }

        let (already, newness) = entry.append(values);
        Effected {
            task_id,
            already,
            newness,
        }
    }

    /// True iff a queue entry is currently present, including mid-drain.
    pub fn exists(&self, task_id: TaskId) -> bool {
        self.entries.lock().unwrap().contains_key(&task_id)
    }

    /// Number of values currently pending for the task, or 0 if absent.
    ///
    /// Mid-drain this counts only values the traversal has not yet taken:
    /// it shrinks as the drain progresses and grows with fresh appends.
    pub fn len(&self, task_id: TaskId) -> usize {
        self.entry(task_id).map_or(0, |entry| entry.len())
    }

    /// Live entry accessor used by the drain engine.
    pub(crate) fn entry(&self, task_id: TaskId) -> Option<Arc<TaskEntry<T>>> {
        self.entries.lock().unwrap().get(&task_id).map(Arc::clone)
    }
}

impl<T> Default for Spool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn enqueue_creates_queue_and_counts() {
        let spool = Spool::new();
        let id = TaskId::new(1);

        assert!(!spool.exists(id));
        assert_eq!(spool.len(id), 0);

        let effected = spool.enqueue(id, ["a", "b", "c"]);
        assert_eq!(effected.task_id, id);
        assert_eq!(effected.already, 0);
        assert_eq!(effected.newness, 3);

        assert!(spool.exists(id));
        assert_eq!(spool.len(id), 3);
    }

    #[test]
    fn already_reflects_length_before_each_call() {
        let spool = Spool::new();
        let id = TaskId::new(2);

        spool.enqueue(id, 0..5);
        let effected = spool.enqueue(id, 0..5);

        assert_eq!(effected.already, 5);
        assert_eq!(effected.newness, 5);
        assert_eq!(spool.len(id), 10);
    }

    #[test]
    fn empty_enqueue_is_a_noop_but_materializes_the_entry() {
        let spool: Spool<u8> = Spool::new();
        let id = TaskId::new(3);

        let effected = spool.enqueue(id, []);
        assert_eq!(effected.already, 0);
        assert_eq!(effected.newness, 0);
        assert!(spool.exists(id));
        assert_eq!(spool.len(id), 0);
    }

    #[rstest]
    #[case::one_batch(&[4], 4)]
    #[case::two_batches(&[2, 3], 5)]
    #[case::many_batches(&[1, 0, 2, 7], 10)]
    fn length_is_cumulative_over_calls(#[case] batches: &[usize], #[case] expected: usize) {
        let spool = Spool::new();
        let id = TaskId::new(4);

        for &batch in batches {
            spool.enqueue(id, vec!["x"; batch]);
        }
        assert_eq!(spool.len(id), expected);
    }

    #[test]
    fn distinct_task_ids_are_independent() {
        let spool = Spool::new();
        spool.enqueue(TaskId::new(10), ["a"]);
        spool.enqueue(TaskId::new(20), ["b", "c"]);

        assert_eq!(spool.len(TaskId::new(10)), 1);
        assert_eq!(spool.len(TaskId::new(20)), 2);
        assert!(!spool.exists(TaskId::new(30)));
    }

    #[test]
    fn registries_are_independent_instances() {
        let left = Spool::new();
        let right: Spool<i32> = Spool::new();
        let id = TaskId::new(5);

        left.enqueue(id, [1]);
        assert!(left.exists(id));
        assert!(!right.exists(id));
    }

    #[tokio::test]
    async fn concurrent_enqueues_on_distinct_ids_land_in_full() {
        let spool = Arc::new(Spool::new());

        let mut joins = Vec::new();
        for task in 0..8i64 {
            let spool = Arc::clone(&spool);
            joins.push(tokio::spawn(async move {
                for batch in 0..10 {
                    spool.enqueue(TaskId::new(task), vec![batch; 5]);
                }
            }));
        }
        for join in joins {
            join.await.unwrap();
        }

        for task in 0..8i64 {
            assert_eq!(spool.len(TaskId::new(task)), 50);
        }
    }
}
