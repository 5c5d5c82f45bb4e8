//! Bounded FIFO windows and the statistics derived from them.

use std::collections::{VecDeque, vec_deque};

use crate::{AgentError, AgentResult};

/// Fixed-capacity FIFO: pushing into a full window evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct BoundedWindow<T> {
    items:    VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedWindow<T> {
    /// Create an empty window.  `capacity` must be at least 1.
    pub fn new(capacity: usize) -> AgentResult<Self> {
        if capacity == 0 {
            return Err(AgentError::Config("window length must be at least 1".into()));
        }
        Ok(Self { items: VecDeque::with_capacity(capacity), capacity })
    }

    /// Append `item`, returning the evicted oldest entry if the window was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

// ── WindowStats ───────────────────────────────────────────────────────────────

/// Sufficient statistics of a window of observations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStats {
    pub count: usize,
    pub mean:  f64,
    /// Unbiased sample variance; `0.0` when `count < 2`.
    pub var:   f64,
}

impl WindowStats {
    /// Two-pass mean / variance over `values`.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let iter = values.into_iter();
        let (count, sum) = iter.clone().fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
        if count == 0 {
            return Self::default();
        }
        let mean = sum / count as f64;
        let var = if count < 2 {
            0.0
        } else {
            iter.map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        };
        Self { count, mean, var }
    }
}

/// Nearest-rank empirical quantile: the smallest value `q` in `values` with
/// at least a fraction `p` of the values ≤ `q`.
///
/// Returns `None` for an empty input.
pub fn empirical_quantile<I>(values: I, p: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let rank = ((p * n as f64).ceil() as usize).clamp(1, n);
    Some(sorted[rank - 1])
}
