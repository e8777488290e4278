//! Aggregate statistics over completed samples.

use des_process::Sample;

/// Count, mean, extremes and nearest-rank percentiles of elapsed times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean:  f64,
    pub min:   f64,
    pub max:   f64,
    pub p50:   f64,
    pub p90:   f64,
    pub p95:   f64,
}

impl Summary {
    /// `None` when `samples` is empty.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        Self::from_elapsed(samples.iter().map(|s| s.elapsed))
    }

    pub fn from_elapsed(elapsed: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = elapsed.into_iter().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        Some(Self {
            count,
            mean,
            min: sorted[0],
            max: sorted[count - 1],
            p50: nearest_rank(&sorted, 50.0),
            p90: nearest_rank(&sorted, 90.0),
            p95: nearest_rank(&sorted, 95.0),
        })
    }
}

/// The smallest value with at least `pct` percent of the data at or below it.
/// `sorted` must be non-empty and ascending.
fn nearest_rank(sorted: &[f64], pct: f64) -> f64 {
    let rank = (pct / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
