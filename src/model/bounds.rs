use super::params::Parameters;
use crate::{
    data::Sample,
    error::{Axis, RegressionErr, Result},
};

/// Per-axis min/max of a dataset, used for min-max normalization.
///
/// Built once from the full dataset before training and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl NormalizationBounds {
    /// Creates bounds from explicit values.
    ///
    /// # Errors
    /// Returns `DegenerateRange` if either range is zero.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };

        bounds.validate()?;
        Ok(bounds)
    }

    /// Computes the bounds of `samples`.
    ///
    /// # Errors
    /// Returns `EmptyDataset` if there are no samples and `DegenerateRange`
    /// if every x (or every y) is the same.
    pub fn from_samples(samples: &[Sample]) -> Result<Self> {
        let Some(first) = samples.first() else {
            return Err(RegressionErr::EmptyDataset);
        };

        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };

        let bounds = samples.iter().fold(init, |b, s| Self {
            min_x: b.min_x.min(s.x),
            max_x: b.max_x.max(s.x),
            min_y: b.min_y.min(s.y),
            max_y: b.max_y.max(s.y),
        });

        bounds.validate()?;
        Ok(bounds)
    }

    /// Both ranges must be finite and strictly positive. A spread that
    /// overflows `f64` is as unusable as an empty one.
    fn validate(&self) -> Result<()> {
        if !usable_range(self.range_x()) {
            return Err(RegressionErr::DegenerateRange { axis: Axis::X });
        }

        if !usable_range(self.range_y()) {
            return Err(RegressionErr::DegenerateRange { axis: Axis::Y });
        }

        Ok(())
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    pub fn range_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn range_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[inline]
fn usable_range(range: f64) -> bool {
    range.is_finite() && range > 0.0
}

/// Maps every sample into `[0, 1] x [0, 1]`:
/// `((x - min_x) / range_x, (y - min_y) / range_y)`.
///
/// # Errors
/// Returns `DegenerateRange` if either range of `bounds` is zero.
pub fn normalize(samples: &[Sample], bounds: &NormalizationBounds) -> Result<Vec<Sample>> {
    bounds.validate()?;

    let (range_x, range_y) = (bounds.range_x(), bounds.range_y());
    let normalized = samples
        .iter()
        .map(|s| Sample {
            x: (s.x - bounds.min_x) / range_x,
            y: (s.y - bounds.min_y) / range_y,
        })
        .collect();

    Ok(normalized)
}

/// Maps parameters fitted on normalized data back to the original units.
///
/// Substituting the normalization into `y_n = t0_n + t1_n * x_n` and solving
/// for `y` gives:
///
/// - theta_1 = t1_n * range_y / range_x
/// - theta_0 = min_y + t0_n * range_y - t1_n * min_x * range_y / range_x
///
/// # Errors
/// Returns `DegenerateRange` if either range of `bounds` is zero.
pub fn denormalize_parameters(
    normalized: Parameters,
    bounds: &NormalizationBounds,
) -> Result<Parameters> {
    bounds.validate()?;

    let Parameters { theta_0, theta_1 } = normalized;
    let (range_x, range_y) = (bounds.range_x(), bounds.range_y());

    let slope = theta_1 * range_y / range_x;
    let intercept = bounds.min_y + theta_0 * range_y - theta_1 * bounds.min_x * range_y / range_x;

    Ok(Parameters::new(intercept, slope))
}
