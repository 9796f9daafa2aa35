//! Per-field elevation range.
//!
//! The range is the reduce half of every coloring pass: it must be known
//! before any pixel can be classified, so it is computed once per field and
//! passed explicitly to the map stages.

use crate::decode::{ElevationField, ElevationSample};
use rayon::prelude::*;

/// Minimum samples to benefit from a parallel reduction.
const PARALLEL_THRESHOLD: usize = 65_536; // 256x256 or larger

/// Minimum and maximum over the valid samples of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
}

impl RangeStats {
    /// Scan a field once, skipping NO_DATA.
    ///
    /// Returns `None` when the field holds no valid sample (the empty-range
    /// condition). Callers render such fields fully transparent.
    pub fn compute(field: &ElevationField) -> Option<Self> {
        Self::from_samples(field.samples())
    }

    /// Same as [`RangeStats::compute`] over a bare sample slice.
    pub fn from_samples(samples: &[ElevationSample]) -> Option<Self> {
        let (min, max) = if samples.len() >= PARALLEL_THRESHOLD {
            samples
                .par_iter()
                .fold(|| (f64::INFINITY, f64::NEG_INFINITY), accumulate)
                .reduce(|| (f64::INFINITY, f64::NEG_INFINITY), merge)
        } else {
            samples
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), accumulate)
        };

        if min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Range of the same field after every sample is multiplied by `factor`.
    ///
    /// A negative factor swaps the ends.
    pub fn scaled(&self, factor: f64) -> Self {
        let (a, b) = (self.min * factor, self.max * factor);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Position of `value` within the range, in [0, 1].
    ///
    /// A degenerate range (min == max) maps everything to 0.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

#[inline]
fn accumulate((min, max): (f64, f64), sample: &ElevationSample) -> (f64, f64) {
    match sample {
        Some(z) => (min.min(*z), max.max(*z)),
        None => (min, max),
    }
}

#[inline]
fn merge(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0.min(b.0), a.1.max(b.1))
}
