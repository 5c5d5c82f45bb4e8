//! Random variables for inter-arrival times, service times, and noise.
//!
//! The simulator only relies on [`RandomVariable::sample`]; the concrete
//! distributions here cover what the experiments use.  Every constructor
//! validates its parameters so a bad configuration fails before a run
//! starts rather than producing NaN durations halfway through.

use std::fmt;

use rand::distributions::WeightedIndex;
use rand_distr::{Distribution, Exp};

use crate::{CoreError, CoreResult, SimRng};

/// A source of i.i.d. samples.
///
/// Implementations are immutable and draw from the caller's stream, so one
/// instance can be shared (behind an `Arc`) by replicate runs on different
/// threads without correlating them.
pub trait RandomVariable: fmt::Debug + Send + Sync {
    /// Draw one sample.
    fn sample(&self, rng: &mut SimRng) -> f64;
}

// ── Constant ──────────────────────────────────────────────────────────────────

/// Degenerate distribution: always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(f64);

impl Constant {
    pub fn new(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidParameter {
                distribution: "Constant",
                reason:       format!("value must be finite, got {value}"),
            });
        }
        Ok(Constant(value))
    }
}

impl RandomVariable for Constant {
    #[inline]
    fn sample(&self, _rng: &mut SimRng) -> f64 {
        self.0
    }
}

// ── Exponential ───────────────────────────────────────────────────────────────

/// Exponential distribution with rate `λ` (mean `1/λ`).
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    dist: Exp<f64>,
}

impl Exponential {
    pub fn new(rate: f64) -> CoreResult<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(CoreError::InvalidParameter {
                distribution: "Exponential",
                reason:       format!("rate must be positive and finite, got {rate}"),
            });
        }
        let dist = Exp::new(rate).map_err(|e| CoreError::InvalidParameter {
            distribution: "Exponential",
            reason:       e.to_string(),
        })?;
        Ok(Self { dist })
    }
}

impl RandomVariable for Exponential {
    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        self.dist.sample(rng.inner())
    }
}

// ── DiscreteUniform ───────────────────────────────────────────────────────────

/// Uniform over the integers `min..=max`, returned as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteUniform {
    min: i64,
    max: i64,
}

impl DiscreteUniform {
    pub fn new(min: i64, max: i64) -> CoreResult<Self> {
        if min > max {
            return Err(CoreError::InvalidParameter {
                distribution: "DiscreteUniform",
                reason:       format!("min ({min}) exceeds max ({max})"),
            });
        }
        Ok(Self { min, max })
    }
}

impl RandomVariable for DiscreteUniform {
    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        rng.gen_range(self.min..=self.max) as f64
    }
}

// ── CustomDiscrete ────────────────────────────────────────────────────────────

/// Finite distribution over non-negative `values`, picked with relative
/// `weights`.
///
/// Used as the multiplicative noise source for noisy least-work-left routing.
#[derive(Debug, Clone)]
pub struct CustomDiscrete {
    values: Vec<f64>,
    index:  WeightedIndex<f64>,
}

impl CustomDiscrete {
    pub fn new(values: Vec<f64>, weights: Vec<f64>) -> CoreResult<Self> {
        if values.is_empty() || values.len() != weights.len() {
            return Err(CoreError::InvalidParameter {
                distribution: "CustomDiscrete",
                reason:       format!(
                    "need one weight per value, got {} values and {} weights",
                    values.len(),
                    weights.len(),
                ),
            });
        }
        if let Some(v) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(CoreError::InvalidParameter {
                distribution: "CustomDiscrete",
                reason:       format!("values must be finite and non-negative, got {v}"),
            });
        }
        let index = WeightedIndex::new(&weights).map_err(|e| CoreError::InvalidParameter {
            distribution: "CustomDiscrete",
            reason:       e.to_string(),
        })?;
        Ok(Self { values, index })
    }

    /// Equal weight on every value.
    pub fn uniform(values: Vec<f64>) -> CoreResult<Self> {
        let weights = vec![1.0; values.len()];
        Self::new(values, weights)
    }
}

impl RandomVariable for CustomDiscrete {
    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        self.values[self.index.sample(rng.inner())]
    }
}
