//! End-of-run response-time summary.

use std::fmt;

/// Mean and standard deviation of task response time for one run (or the
/// average over replicate runs).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimResult {
    /// E[T]: mean response time.
    pub et:        f64,
    /// σ[T]: population standard deviation of response time.
    pub std_t:     f64,
    /// Number of response times the summary was computed from.
    pub num_tasks: usize,
}

impl SimResult {
    /// Summarise a list of response times.  An empty list yields zeros.
    pub fn from_response_times(times: &[f64]) -> Self {
        let n = times.len();
        if n == 0 {
            return Self::default();
        }
        let mean = times.iter().sum::<f64>() / n as f64;
        let var = times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        Self { et: mean, std_t: var.sqrt(), num_tasks: n }
    }

    /// Average `et` and `std_t` across replicate runs; `num_tasks` is summed.
    ///
    /// Returns `None` for an empty slice.
    pub fn average(results: &[SimResult]) -> Option<SimResult> {
        if results.is_empty() {
            return None;
        }
        let n = results.len() as f64;
        Some(SimResult {
            et:        results.iter().map(|r| r.et).sum::<f64>() / n,
            std_t:     results.iter().map(|r| r.std_t).sum::<f64>() / n,
            num_tasks: results.iter().map(|r| r.num_tasks).sum(),
        })
    }
}

impl fmt::Display for SimResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E[T]={:.4} σ[T]={:.4} (n={})", self.et, self.std_t, self.num_tasks)
    }
}
