//! RingQueue - Fixed-Capacity Circular FIFO Queue
//!
//! A bounded queue over a fixed-size slot array with wrapped `head`/`tail`
//! cursors and a `full` flag that tells the two `head == tail` states apart.
//!
//! # Key Features
//!
//! - O(1) push, pop and length queries, no allocation after construction
//! - Push on a full queue is rejected, never overwrites
//! - Values are moved in and out; residents are dropped with the queue
//! - [`HostQueue`] for runtime bindings: signed capacity, idempotent destroy,
//!   clone/serialize rejection
//!
//! The queue is not thread-safe: it has no internal locking and mutators take
//! `&mut self`. Wrap it yourself if it has to be shared.
//!
//! # Example
//!
//! ```
//! use ringqueue::{Config, RingQueue};
//!
//! let mut queue = RingQueue::with_config(Config::new(4, true)).unwrap();
//!
//! for i in 0..4 {
//!     assert!(queue.push(i));
//! }
//! assert!(queue.is_full());
//! assert!(!queue.push(4));
//!
//! let drained: Vec<u32> = queue.drain().collect();
//! assert_eq!(drained, vec![0, 1, 2, 3]);
//! assert_eq!(queue.metrics().rejected_pushes, 1);
//! ```

mod config;
mod error;
mod host;
mod invariants;
mod metrics;
mod ring;

pub use config::{Config, DEFAULT_CAPACITY, LARGE_CONFIG, SMALL_CONFIG};
pub use error::{PushError, RingQueueError};
pub use host::HostQueue;
pub use metrics::Metrics;
pub use ring::{Drain, Iter, RingQueue};
