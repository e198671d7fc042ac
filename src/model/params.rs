/// Intercept and slope of the linear model `y = theta_0 + theta_1 * x`.
///
/// The same type is used in normalized space while training and in the
/// original units once de-scaled; which frame a value lives in is decided
/// by whoever produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parameters {
    pub theta_0: f64,
    pub theta_1: f64,
}

impl Parameters {
    pub fn new(theta_0: f64, theta_1: f64) -> Self {
        Self { theta_0, theta_1 }
    }

    /// The untrained model, both thetas at zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// y = theta_0 + theta_1 * x
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        predict(self.theta_0, self.theta_1, x)
    }
}

/// Evaluates the affine model at `x`. No domain check is made on `x`,
/// extrapolating outside the observed range is allowed.
#[inline]
pub fn predict(theta_0: f64, theta_1: f64, x: f64) -> f64 {
    theta_0 + theta_1 * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_is_affine() {
        let p = Parameters::new(8499.6, -0.0214);
        assert!((p.predict(0.0) - 8499.6).abs() < 1e-12);
        assert!((p.predict(100_000.0) - (8499.6 - 2140.0)).abs() < 1e-9);
    }

    #[test]
    fn untrained_model_predicts_zero() {
        let p = Parameters::zero();
        for x in [-1e6, 0.0, 42.0, 3.5e9] {
            assert_eq!(p.predict(x), 0.0);
        }
    }

    #[test]
    fn extrapolation_is_not_clamped() {
        assert_eq!(predict(1.0, 2.0, -10.0), -19.0);
    }
}
