use std::time::Instant;

use tdigest::TDigest;

/// Accumulates per-query prediction durations and reports latency
/// percentiles for the offline evaluation binary.
pub struct Stopwatch {
    start_time: Instant,
    query_durations_micros: Vec<f64>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch {
            start_time: Instant::now(),
            query_durations_micros: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn stop(&mut self) {
        let duration = self.start_time.elapsed();
        self.query_durations_micros.push(duration.as_micros() as f64);
    }

    pub fn get_n(&self) -> usize {
        self.query_durations_micros.len()
    }

    /// `quantile` is a fraction, e.g. 0.95 for the 95th percentile.
    pub fn get_percentile_in_micros(&self, quantile: f64) -> f64 {
        let t_digest = TDigest::new_with_size(100);
        let sorted_digest = t_digest.merge_unsorted(self.query_durations_micros.clone());
        sorted_digest.estimate_quantile(quantile)
    }
}
