use crate::RingQueueError;
use tracing::warn;

/// Capacity used when the requested one is zero or negative.
pub const DEFAULT_CAPACITY: usize = 64;

/// Configuration for [`RingQueue`](crate::RingQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots (never zero, see [`Config::capacity`])
    capacity: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration. A zero capacity falls back to
    /// [`DEFAULT_CAPACITY`].
    pub const fn new(capacity: usize, enable_metrics: bool) -> Self {
        Self {
            capacity: normalize(capacity),
            enable_metrics,
        }
    }

    /// Resolves a signed capacity as supplied by a host runtime.
    ///
    /// Negative and zero values are coerced to [`DEFAULT_CAPACITY`]. A value
    /// that does not fit in `usize` can never be allocated and is reported as
    /// [`RingQueueError::Allocation`].
    pub fn from_requested(requested: i64) -> Result<Self, RingQueueError> {
        if requested <= 0 {
            warn!(
                requested,
                default = DEFAULT_CAPACITY,
                "invalid ring queue capacity, using default"
            );
            return Ok(Self::default());
        }

        let capacity = usize::try_from(requested).map_err(|_| RingQueueError::Allocation {
            capacity: usize::MAX,
        })?;
        Ok(Self::new(capacity, false))
    }

    /// Returns the capacity of the queue.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets the capacity (zero falls back to [`DEFAULT_CAPACITY`]).
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = normalize(capacity);
        self
    }

    /// Enables or disables metrics collection.
    pub const fn with_metrics(mut self, enable_metrics: bool) -> Self {
        self.enable_metrics = enable_metrics;
        self
    }
}

const fn normalize(capacity: usize) -> usize {
    if capacity == 0 {
        DEFAULT_CAPACITY
    } else {
        capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            enable_metrics: false,
        }
    }
}

/// Small queue (16 slots), e.g. per-connection scratch queues
pub const SMALL_CONFIG: Config = Config::new(16, false);

/// Large queue (64K slots) with metrics enabled
pub const LARGE_CONFIG: Config = Config::new(1 << 16, true);
