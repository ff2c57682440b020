//! Host-object boundary for embedding the queue in a scripting runtime.
//!
//! A [`HostQueue`] is what a runtime binding holds on to: it takes the
//! runtime's signed integer capacity, can be destroyed explicitly (any number
//! of times), and refuses to be cloned or serialized because its elements are
//! opaque to it.

use crate::{Config, RingQueue, RingQueueError};
use tracing::{debug, warn};

/// A [`RingQueue`] wrapped with host-object lifecycle semantics.
///
/// After [`destroy`](HostQueue::destroy) the handle stays valid but behaves
/// like an empty queue that rejects every push.
///
/// `HostQueue` deliberately has no `Clone` impl; [`HostQueue::try_clone`]
/// exists for bindings that must answer a clone request at runtime.
#[derive(Debug)]
pub struct HostQueue<T> {
    queue: Option<RingQueue<T>>,
}

impl<T> HostQueue<T> {
    /// Builds a queue from a host-supplied capacity. Negative or zero values
    /// use [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY).
    pub fn new(capacity: i64) -> Result<Self, RingQueueError> {
        Self::with_config(Config::from_requested(capacity)?)
    }

    pub fn with_config(config: Config) -> Result<Self, RingQueueError> {
        let queue = RingQueue::with_config(config)?;
        Ok(Self { queue: Some(queue) })
    }

    /// Appends `value`; `false` if the queue is full or destroyed.
    pub fn push(&mut self, value: T) -> bool {
        match self.live_mut("push") {
            Some(queue) => queue.push(value),
            None => false,
        }
    }

    /// Removes the front element; `None` if the queue is empty or destroyed.
    pub fn pop(&mut self) -> Option<T> {
        self.live_mut("pop")?.pop()
    }

    pub fn count(&self) -> usize {
        self.queue.as_ref().map_or(0, RingQueue::len)
    }

    pub fn is_full(&self) -> bool {
        self.queue.as_ref().is_some_and(RingQueue::is_full)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.as_ref().is_none_or(RingQueue::is_empty)
    }

    /// Capacity of the live queue, 0 once destroyed.
    pub fn capacity(&self) -> usize {
        self.queue.as_ref().map_or(0, RingQueue::capacity)
    }

    pub fn is_destroyed(&self) -> bool {
        self.queue.is_none()
    }

    /// Releases the slot array together with every resident element.
    ///
    /// Calling this again is a no-op.
    pub fn destroy(&mut self) {
        if let Some(queue) = self.queue.take() {
            debug!(
                capacity = queue.capacity(),
                residents = queue.len(),
                "destroying host queue"
            );
        }
    }

    /// Clone requests are always rejected.
    pub fn try_clone(&self) -> Result<Self, RingQueueError> {
        Err(RingQueueError::NotCloneable)
    }

    /// Borrows the underlying queue, if still alive.
    pub fn as_queue(&self) -> Option<&RingQueue<T>> {
        self.queue.as_ref()
    }

    fn live_mut(&mut self, op: &'static str) -> Option<&mut RingQueue<T>> {
        if self.queue.is_none() {
            warn!(op, "operation on destroyed host queue");
        }
        self.queue.as_mut()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for HostQueue<T> {
    /// Always fails: the queue's elements are opaque and cannot be written out.
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(serde::ser::Error::custom(RingQueueError::NotSerializable))
    }
}
