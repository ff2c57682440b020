//! Error types for ring queue operations.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when creating or handling a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingQueueError {
    /// The backing slot array could not be allocated.
    #[error("failed to allocate ring queue storage for {capacity} slots")]
    Allocation { capacity: usize },

    /// The queue holds opaque values and cannot be duplicated.
    #[error("ring queue cannot be cloned")]
    NotCloneable,

    /// The queue holds opaque values and cannot be serialized.
    #[error("ring queue cannot be serialized")]
    NotSerializable,
}

impl RingQueueError {
    /// Returns `true` if no queue exists after this error.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }
}

/// Returned by [`RingQueue::try_push`](crate::RingQueue::try_push) when the
/// queue is full. Carries the rejected value back to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
pub enum PushError<T> {
    #[error("ring queue is full")]
    Full(T),
}

impl<T> PushError<T> {
    /// Recovers the value that could not be pushed.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) => value,
        }
    }
}

// Manual impl so `T` does not need to be `Debug`.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
        }
    }
}
