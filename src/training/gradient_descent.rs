use crate::{data::Sample, model::Parameters};

/// Gradient of the half mean squared error with respect to each theta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gradient {
    pub d_theta_0: f64,
    pub d_theta_1: f64,
}

/// Everything one full pass over the dataset produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochOutcome {
    pub gradient: Gradient,
    /// Mean squared error of the parameters the gradient was taken at.
    pub mse: f64,
}

/// Computes the batch gradient and the MSE at `params`.
///
/// Every sample contributes: `residual_i = theta_0 + theta_1 * x_i - y_i`,
/// `d_theta_0 = mean(residual_i)`, `d_theta_1 = mean(residual_i * x_i)` and
/// `mse = mean(residual_i^2)`.
///
/// `samples` must not be empty.
pub fn evaluate(params: Parameters, samples: &[Sample]) -> EpochOutcome {
    debug_assert!(!samples.is_empty(), "batch must be non-empty");

    let mut sum_0 = 0.0_f64;
    let mut sum_1 = 0.0_f64;
    let mut sum_sq = 0.0_f64;

    for s in samples {
        let residual = params.predict(s.x) - s.y;
        sum_0 += residual;
        sum_1 += residual * s.x;
        sum_sq += residual * residual;
    }

    let n = samples.len() as f64;

    EpochOutcome {
        gradient: Gradient {
            d_theta_0: sum_0 / n,
            d_theta_1: sum_1 / n,
        },
        mse: sum_sq / n,
    }
}

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Takes a step in the opposite direction of the gradient, with a length
    /// of `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters the gradient was taken at.
    /// * `grad` - The gradient used for taking the step.
    ///
    /// # Returns
    /// The updated parameters.
    pub fn update_params(&self, params: Parameters, grad: Gradient) -> Parameters {
        let lr = self.learning_rate;

        Parameters {
            theta_0: params.theta_0 - lr * grad.d_theta_0,
            theta_1: params.theta_1 - lr * grad.d_theta_1,
        }
    }

    /// Runs one epoch: evaluates the whole batch, then updates both thetas
    /// at once.
    ///
    /// # Returns
    /// The new parameters and the MSE of the parameters before the update.
    pub fn epoch(&self, params: Parameters, samples: &[Sample]) -> (Parameters, f64) {
        let EpochOutcome { gradient, mse } = evaluate(params, samples);
        (self.update_params(params, gradient), mse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn gradient_matches_expected_simple_case() {
        // y = 2x + 1 with thetas at the origin.
        let s = samples(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
        let out = evaluate(Parameters::zero(), &s);

        // residuals: [-3, -5, -7]
        assert!((out.gradient.d_theta_0 - (-5.0)).abs() < 1e-12);
        assert!((out.gradient.d_theta_1 - (-34.0 / 3.0)).abs() < 1e-12);
        assert!((out.mse - (83.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn perfect_fit_has_zero_gradient() {
        let s = samples(&[(0.0, 1.0), (0.5, 2.0), (1.0, 3.0)]);
        let out = evaluate(Parameters::new(1.0, 2.0), &s);

        assert_eq!(out.gradient, Gradient::default());
        assert_eq!(out.mse, 0.0);
    }

    #[test]
    fn update_steps_against_the_gradient() {
        let gd = GradientDescent::new(0.5);
        let grad = Gradient {
            d_theta_0: 2.0,
            d_theta_1: -4.0,
        };

        let p = gd.update_params(Parameters::new(1.0, 1.0), grad);
        assert_eq!(p, Parameters::new(0.0, 3.0));
    }

    #[test]
    fn one_epoch_in_isolation() {
        let s = samples(&[(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]);
        let gd = GradientDescent::new(0.1);

        let (p, mse) = gd.epoch(Parameters::zero(), &s);

        // residuals: [0, -0.5, -1]
        assert!((p.theta_0 - 0.05).abs() < 1e-12);
        assert!((p.theta_1 - 0.1 * 1.25 / 3.0).abs() < 1e-12);
        assert!((mse - 1.25 / 3.0).abs() < 1e-12);
    }
}
