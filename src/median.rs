use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// When the parity toggle goes back to "unpaired"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityScope {
    /// At the start of every file, while the samples keep accumulating
    #[default]
    PerFile,
    /// Never; the toggle then always agrees with the sample size parity
    Corpus,
}

/// Running median over a stream of per-line token counts.
///
/// Samples are kept sorted ascending; a new count is placed with a binary
/// search instead of re-sorting the whole sample. The even/odd formula is
/// picked by an explicit toggle that starts unpaired and flips after every
/// observation. It is never derived from `samples.len()`, so after a
/// [`start_segment`](Self::start_segment) the two can disagree.
#[derive(Debug, Default)]
pub struct MedianTracker {
    samples: Vec<u64>,
    history: Vec<f64>,
    paired: bool,
}

impl MedianTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation and returns the median including it
    pub fn observe(&mut self, count: u64) -> f64 {
        // Samples before this observation
        let seen = self.samples.len();
        let at = self.samples.partition_point(|&s| s <= count);
        self.samples.insert(at, count);

        let median = if seen == 0 {
            count as f64
        } else if self.paired {
            let lower = (seen - 1) / 2;
            (self.samples[lower] as f64 + self.samples[lower + 1] as f64) / 2.0
        } else {
            self.samples[seen / 2] as f64
        };

        self.paired = !self.paired;
        self.history.push(median);
        median
    }

    /// Resets the parity toggle to unpaired. Samples and history are kept
    pub fn start_segment(&mut self) {
        self.paired = false;
    }

    /// Every median computed so far, in observation order
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn current(&self) -> Option<f64> {
        self.history.last().copied()
    }

    /// Observed counts, ascending
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
