//! Test RNG: scripted retry jitter.

use relay_core::rng::DeterministicRng;

/// Always answers the lower bound, so 5xx retries wait the minimum jitter.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed list of jitter values, ignoring the requested bounds.
///
/// # Panics
///
/// Panics when asked for more values than it was given.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Creates an RNG that yields `values` in order.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let value = self.values[self.index];
        self.index += 1;
        value
    }
}
