//! Drain stream item.

/// One entry of a drain stream.
///
/// The terminal marker is a distinct variant rather than a sentinel payload,
/// so consumers can never mistake it for producer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainItem<T> {
    /// A payload delivered to the consumer.
    Value(T),

    /// Terminal marker, emitted once (and last) when the drain was
    /// configured with `notify_on_completion`.
    Completed,
}

impl<T> DrainItem<T> {
    /// Unwrap a payload, discarding a marker.
    pub fn into_value(self) -> Option<T> {
        match self {
            DrainItem::Value(value) => Some(value),
            DrainItem::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DrainItem::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_value_discards_marker() {
        assert_eq!(DrainItem::Value(9).into_value(), Some(9));
        assert_eq!(DrainItem::<i32>::Completed.into_value(), None);
    }

    #[test]
    fn is_completed_only_for_marker() {
        assert!(DrainItem::<i32>::Completed.is_completed());
        assert!(!DrainItem::Value(1).is_completed());
    }
}
