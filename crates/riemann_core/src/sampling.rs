//! Discretizing a function over a symmetric domain
//!
//! Samples run from `-range` to `+range` in increments of `step`. Each
//! abscissa is computed from its integer index so long domains do not drift.

use serde::{Serialize, Deserialize};

use crate::PlotError;

/// Upper bound on samples per plot
pub const MAX_SAMPLES: usize = 1_000_000;

/// Fraction of `step` under which an abscissa counts as the origin
const ZERO_TOLERANCE: f64 = 1e-4;

/// A sampled point `(x, f(x))`; `y` may be non-finite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Finite at vertex precision
    ///
    /// Values past `f32::MAX` are finite as f64 but overflow once placed
    /// in a vertex, so they count as non-finite here.
    #[inline]
    pub fn is_finite(&self) -> bool {
        (self.x as f32).is_finite() && (self.y as f32).is_finite()
    }
}

/// Sampling domain `[-range, range]` with spacing `step`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleDomain {
    pub range: f64,
    pub step: f64,
}

impl Default for SampleDomain {
    fn default() -> Self {
        Self {
            range: 32.0,
            step: 0.01,
        }
    }
}

impl SampleDomain {
    pub fn new(range: f64, step: f64) -> Self {
        Self { range, step }
    }

    /// Number of grid points from `-range` to `range` inclusive
    ///
    /// Includes the origin, which [`graph`] skips.
    pub fn point_count(&self) -> usize {
        // Small slack so 2*range/step landing just under an integer still counts
        ((2.0 * self.range / self.step) + 1e-9).floor() as usize + 1
    }

    /// Abscissa of grid point `i`
    #[inline]
    pub fn x_at(&self, i: usize) -> f64 {
        -self.range + i as f64 * self.step
    }

    /// Check that the domain is usable
    pub fn validate(&self) -> Result<(), PlotError> {
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(PlotError::InvalidDomain(format!(
                "range must be positive and finite, got {}",
                self.range
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(PlotError::InvalidDomain(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        let count = 2.0 * self.range / self.step;
        if count >= MAX_SAMPLES as f64 {
            return Err(PlotError::TooManySamples {
                count: count.min(usize::MAX as f64) as usize,
                max: MAX_SAMPLES,
            });
        }
        Ok(())
    }

    /// Whether `x` is the origin on this grid
    #[inline]
    fn is_origin(&self, x: f64) -> bool {
        x.abs() < self.step * ZERO_TOLERANCE
    }
}

/// Sample `f` over `domain`, skipping the origin
pub fn graph<F>(mut f: F, domain: &SampleDomain) -> Result<Vec<Sample>, PlotError>
where
    F: FnMut(f64) -> f64,
{
    domain.validate()?;

    let count = domain.point_count();
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let x = domain.x_at(i);
        if domain.is_origin(x) {
            continue;
        }
        samples.push(Sample::new(x, f(x)));
    }
    Ok(samples)
}
