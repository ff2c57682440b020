use crate::invariants::{
    debug_assert_bounded_count, debug_assert_cursor_in_range, debug_assert_full_flag,
    debug_assert_slot_occupied, debug_assert_slot_vacant,
};
use crate::{Config, Metrics, PushError, RingQueueError};
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, error, trace, warn};

// =============================================================================
// SLOT LAYOUT
// =============================================================================
//
// `head` is the next slot to pop, `tail` the next slot to push into. Both are
// wrapped indices in `[0, capacity)`, so `head == tail` is ambiguous: the ring
// is either empty or completely full. The `full` flag resolves it:
//
//   head == tail && !full  -> empty
//   head == tail &&  full  -> capacity elements
//   otherwise              -> (tail - head) mod capacity elements
//
// `full` is only ever set by a push that makes `tail` catch up with `head`,
// and any pop clears it.
//
// Slots in the live range hold `Some(value)`, every other slot is `None`. A pop
// `take()`s the slot, so the queue never keeps a value it has handed out.
//
// =============================================================================

/// A fixed-capacity circular FIFO queue.
///
/// Push and pop are O(1) and never allocate; the slot array is allocated once
/// at construction. A push on a full queue is rejected rather than
/// overwriting the oldest element.
///
/// # Thread safety
///
/// `RingQueue` has no internal synchronization. Mutators take `&mut self`, so
/// sharing one queue between threads requires the caller to wrap it (for
/// example in a `Mutex`).
///
/// # Example
///
/// ```
/// use ringqueue::RingQueue;
///
/// let mut queue = RingQueue::new(2).unwrap();
/// assert!(queue.push("a"));
/// assert!(queue.push("b"));
/// assert!(!queue.push("c")); // full, "c" is dropped
///
/// assert_eq!(queue.pop(), Some("a"));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct RingQueue<T> {
    /// Read cursor
    head: usize,
    /// Write cursor
    tail: usize,
    /// Disambiguates `head == tail`
    full: bool,
    config: Config,
    metrics: Metrics,
    /// Fixed-size slot array. `Box<[_]>` because it never grows or shrinks.
    buffer: Box<[Option<T>]>,
}

impl<T> RingQueue<T> {
    /// Creates a queue with `capacity` slots and metrics disabled.
    ///
    /// A zero capacity falls back to [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY).
    pub fn new(capacity: usize) -> Result<Self, RingQueueError> {
        if capacity == 0 {
            warn!(
                default = crate::DEFAULT_CAPACITY,
                "zero ring queue capacity, using default"
            );
        }
        Self::with_config(Config::default().with_capacity(capacity))
    }

    /// Creates a queue with the given configuration.
    ///
    /// The slot array is reserved up front; if that fails no queue is built
    /// and [`RingQueueError::Allocation`] is returned.
    pub fn with_config(config: Config) -> Result<Self, RingQueueError> {
        let capacity = config.capacity();

        let mut buffer = Vec::new();
        if let Err(err) = buffer.try_reserve_exact(capacity) {
            error!(capacity, %err, "failed to allocate ring queue storage");
            return Err(RingQueueError::Allocation { capacity });
        }
        buffer.resize_with(capacity, || None);

        debug!(
            capacity,
            metrics = config.enable_metrics,
            "ring queue created"
        );

        Ok(Self {
            head: 0,
            tail: 0,
            full: false,
            config,
            metrics: Metrics::new(),
            buffer: buffer.into_boxed_slice(),
        })
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of elements currently in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else if self.tail >= self.head {
            self.tail - self.head
        } else {
            self.tail + self.capacity() - self.head
        }
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Returns true if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.full
    }

    /// Returns true if the queue holds `capacity` elements.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Get a snapshot of metrics (all zero unless enabled).
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    #[inline]
    fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    // ---------------------------------------------------------------------
    // PRODUCER API
    // ---------------------------------------------------------------------

    /// Appends `value` at the back. Returns `false` (dropping `value`) if the
    /// queue is full.
    #[inline]
    pub fn push(&mut self, value: T) -> bool {
        self.try_push(value).is_ok()
    }

    /// Appends `value` at the back, handing it back inside the error if the
    /// queue is full.
    pub fn try_push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.full {
            if self.config.enable_metrics {
                self.metrics.rejected_pushes += 1;
            }
            return Err(PushError::Full(value));
        }

        debug_assert_slot_vacant!(self.buffer[self.tail], self.tail);
        self.buffer[self.tail] = Some(value);
        self.tail = self.next_index(self.tail);
        self.full = self.tail == self.head;

        debug_assert_cursor_in_range!("tail", self.tail, self.capacity());
        debug_assert_full_flag!(self.full, self.head, self.tail);
        debug_assert_bounded_count!(self.len(), self.capacity());

        if self.config.enable_metrics {
            self.metrics.pushed += 1;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // CONSUMER API
    // ---------------------------------------------------------------------

    /// Removes and returns the front element, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            if self.config.enable_metrics {
                self.metrics.empty_pops += 1;
            }
            return None;
        }

        let value = self.buffer[self.head].take();
        debug_assert_slot_occupied!(value, self.head);
        self.head = self.next_index(self.head);
        // A pop always frees a slot, so head == tail now means empty.
        self.full = false;

        debug_assert_cursor_in_range!("head", self.head, self.capacity());

        if self.config.enable_metrics {
            self.metrics.popped += 1;
        }
        value
    }

    /// Returns a reference to the front element without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.buffer[self.head].as_ref()
    }

    /// Pops every element, passing ownership of each to `handler`.
    ///
    /// Returns the number of elements consumed.
    pub fn consume_batch<F>(&mut self, handler: F) -> usize
    where
        F: FnMut(T),
    {
        self.consume_up_to(usize::MAX, handler)
    }

    /// Pops at most `max` elements in FIFO order, passing ownership of each to
    /// `handler`.
    ///
    /// The head advances per element, so a panicking handler leaves the queue
    /// consistent with whatever was consumed before it.
    pub fn consume_up_to<F>(&mut self, max: usize, mut handler: F) -> usize
    where
        F: FnMut(T),
    {
        let to_consume = self.len().min(max);
        for _ in 0..to_consume {
            match self.pop() {
                Some(item) => handler(item),
                None => break,
            }
        }
        to_consume
    }

    /// Drops every element and resets both cursors.
    pub fn clear(&mut self) {
        let mut idx = self.head;
        for _ in 0..self.len() {
            self.buffer[idx] = None;
            idx = self.next_index(idx);
        }
        self.head = 0;
        self.tail = 0;
        self.full = false;
    }

    /// Removes elements in FIFO order through an iterator.
    ///
    /// Elements not yielded are still removed when the iterator is dropped.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { queue: self }
    }

    /// Iterates over the elements front to back without removing them.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: &self.buffer,
            pos: self.head,
            remaining: self.len(),
        }
    }
}

impl<T> Drop for RingQueue<T> {
    fn drop(&mut self) {
        // Residents are dropped together with `buffer`.
        if !self.is_empty() {
            trace!(residents = self.len(), "dropping ring queue with resident elements");
        }
    }
}

impl<T> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("full", &self.full)
            .finish_non_exhaustive()
    }
}

impl<T> Extend<T> for RingQueue<T> {
    /// Pushes until the queue is full; the rest of `iter` is dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if !self.push(item) {
                break;
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a RingQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// ITERATORS
// =============================================================================

/// Borrowing front-to-back iterator, see [`RingQueue::iter`].
pub struct Iter<'a, T> {
    buffer: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.buffer[self.pos].as_ref();
        self.pos = (self.pos + 1) % self.buffer.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Draining iterator, see [`RingQueue::drain`].
pub struct Drain<'a, T> {
    queue: &'a mut RingQueue<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_new_is_empty() {
        for capacity in [1, 2, 7, 64] {
            let queue = RingQueue::<u64>::new(capacity).unwrap();
            assert_eq!(queue.capacity(), capacity);
            assert_eq!(queue.len(), 0);
            assert!(queue.is_empty());
            assert!(!queue.is_full());
        }
    }

    #[test]
    fn test_zero_capacity_uses_default() {
        let queue = RingQueue::<u64>::new(0).unwrap();
        assert_eq!(queue.capacity(), crate::DEFAULT_CAPACITY);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_allocation_failure() {
        let err = RingQueue::<u64>::new(usize::MAX).unwrap_err();
        assert_eq!(err, RingQueueError::Allocation { capacity: usize::MAX });
    }

    #[test]
    fn test_push_until_full() {
        let mut queue = RingQueue::new(4).unwrap();
        for i in 0..4 {
            assert!(queue.push(i));
        }
        assert!(queue.is_full());
        assert_eq!(queue.len(), 4);

        // Rejected push leaves state untouched
        assert!(!queue.push(99));
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_try_push_returns_value() {
        let mut queue = RingQueue::new(1).unwrap();
        queue.try_push(String::from("first")).unwrap();
        let err = queue.try_push(String::from("second")).unwrap_err();
        assert_eq!(err.into_inner(), "second");
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut queue = RingQueue::<u64>::new(3).unwrap();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
        assert!(queue.push(1));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_wrap_around() {
        let mut queue = RingQueue::new(4).unwrap();
        for i in 1..=4 {
            assert!(queue.push(i));
        }
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert!(queue.push(5));
        assert!(queue.push(6));
        assert!(queue.is_full());

        let values: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(values, vec![3, 4, 5, 6]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_len_across_wrap() {
        let mut queue = RingQueue::new(3).unwrap();
        for round in 0..10 {
            assert!(queue.push(round));
            assert!(queue.push(round));
            assert_eq!(queue.len(), 2);
            assert_eq!(queue.remaining(), 1);
            queue.pop();
            assert_eq!(queue.len(), 1);
            queue.pop();
            assert_eq!(queue.len(), 0);
        }
    }

    #[test]
    fn test_capacity_one() {
        let mut queue = RingQueue::new(1).unwrap();
        assert!(queue.push('x'));
        assert!(queue.is_full());
        assert!(!queue.is_empty());
        assert!(!queue.push('y'));
        assert_eq!(queue.pop(), Some('x'));
        assert!(queue.is_empty());
        assert!(!queue.is_full());
    }

    #[test]
    fn test_peek() {
        let mut queue = RingQueue::new(2).unwrap();
        assert_eq!(queue.peek(), None);
        queue.push(10);
        queue.push(20);
        assert_eq!(queue.peek(), Some(&10));
        queue.pop();
        assert_eq!(queue.peek(), Some(&20));
    }

    #[test]
    fn test_consume_up_to_and_batch() {
        let mut queue = RingQueue::new(8).unwrap();
        queue.extend(0..6);

        let mut sum = 0;
        assert_eq!(queue.consume_up_to(4, |v| sum += v), 4);
        assert_eq!(sum, 6); // 0 + 1 + 2 + 3

        queue.extend(10..14);
        let mut values = Vec::new();
        assert_eq!(queue.consume_batch(|v| values.push(v)), 6);
        assert_eq!(values, vec![4, 5, 10, 11, 12, 13]);
        assert_eq!(queue.consume_batch(|_| {}), 0);
    }

    #[test]
    fn test_extend_stops_when_full() {
        let mut queue = RingQueue::new(3).unwrap();
        queue.extend(0..10);
        assert!(queue.is_full());
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_drain_partial_removes_everything() {
        let mut queue = RingQueue::new(4).unwrap();
        queue.extend(["a", "b", "c"]);
        {
            let mut drain = queue.drain();
            assert_eq!(drain.len(), 3);
            assert_eq!(drain.next(), Some("a"));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_drops_residents() {
        let tracker = Rc::new(());
        let mut queue = RingQueue::new(4).unwrap();
        for _ in 0..3 {
            queue.push(Rc::clone(&tracker));
        }
        queue.pop();
        assert_eq!(Rc::strong_count(&tracker), 3);

        queue.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
        assert!(queue.is_empty());
        assert!(queue.push(Rc::clone(&tracker)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drop_releases_residents() {
        let tracker = Rc::new(());
        {
            let mut queue = RingQueue::new(4).unwrap();
            queue.extend(std::iter::repeat_with(|| Rc::clone(&tracker)).take(4));
            assert_eq!(Rc::strong_count(&tracker), 5);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_rejected_push_releases_value() {
        let tracker = Rc::new(());
        let mut queue = RingQueue::new(1).unwrap();
        assert!(queue.push(Rc::clone(&tracker)));
        assert!(!queue.push(Rc::clone(&tracker)));
        assert_eq!(Rc::strong_count(&tracker), 2);
    }

    #[test]
    fn test_popped_value_not_retained() {
        let tracker = Rc::new(());
        let mut queue = RingQueue::new(2).unwrap();
        queue.push(Rc::clone(&tracker));
        let popped = queue.pop().unwrap();
        assert_eq!(Rc::strong_count(&tracker), 2);
        drop(popped);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_metrics() {
        let mut queue = RingQueue::with_config(Config::new(2, true)).unwrap();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        queue.pop();
        queue.pop();
        queue.pop();

        let metrics = queue.metrics();
        assert_eq!(metrics.pushed, 2);
        assert_eq!(metrics.rejected_pushes, 1);
        assert_eq!(metrics.popped, 2);
        assert_eq!(metrics.empty_pops, 1);
        assert_eq!(metrics.in_flight(), 0);
    }

    #[test]
    fn test_metrics_disabled() {
        let mut queue = RingQueue::new(2).unwrap();
        queue.push(1);
        queue.pop();
        assert_eq!(queue.metrics(), Metrics::default());
    }

    #[test]
    fn test_debug_output() {
        let mut queue = RingQueue::new(4).unwrap();
        queue.push(1u8);
        let out = format!("{:?}", queue);
        assert!(out.starts_with("RingQueue { capacity: 4, len: 1"));
    }
}
