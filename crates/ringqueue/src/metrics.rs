/// Optional counters for monitoring queue usage.
///
/// Only updated when [`Config::enable_metrics`](crate::Config) is set;
/// otherwise every field stays zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub pushed: u64,
    pub popped: u64,
    pub rejected_pushes: u64,
    pub empty_pops: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements pushed but not yet popped (dropped residents still count).
    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.pushed.saturating_sub(self.popped)
    }
}
