use indicatif::ProgressBar;
use log::{debug, info};

use super::{gradient_descent::GradientDescent, trace::ErrorTrace};
use crate::{
    config::TrainingConfig,
    data::{Dataset, Sample},
    error::{RegressionErr, Result},
    model::{denormalize_parameters, normalize, NormalizationBounds, Parameters},
};

/// Every how many epochs the normalized parameters are logged.
pub const DEBUG_EVERY: usize = 1000;

/// Where a `Trainer` is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// Bounds and config are set, thetas are still at the origin.
    Uninitialized,
    /// At least one epoch ran, but fewer than configured.
    Training,
    /// Every configured epoch ran.
    Converged,
}

/// Batch gradient descent over a normalized copy of a dataset.
///
/// Owns its samples, parameters and trace exclusively; nothing outlives a
/// single run. The loop always runs exactly `config.epochs()` epochs, there
/// is no early exit on small errors.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    optimizer: GradientDescent,
    bounds: NormalizationBounds,
    samples: Vec<Sample>,
    params: Parameters,
    trace: ErrorTrace,
}

impl Trainer {
    /// Creates a new `Trainer`, normalizing `dataset` up front.
    ///
    /// # Arguments
    /// * `dataset` - The raw samples to fit.
    /// * `config` - The learning rate and epoch count of the run.
    ///
    /// # Errors
    /// `EmptyDataset` when there are no samples, `DegenerateRange` when every
    /// x or every y is the same. Both are raised before any gradient step.
    pub fn new(dataset: &Dataset, config: TrainingConfig) -> Result<Self> {
        let bounds = NormalizationBounds::from_samples(dataset.samples())?;
        let samples = normalize(dataset.samples(), &bounds)?;

        Ok(Self {
            optimizer: GradientDescent::new(config.learning_rate()),
            trace: ErrorTrace::with_capacity(config.epochs()),
            params: Parameters::zero(),
            config,
            bounds,
            samples,
        })
    }

    pub fn state(&self) -> TrainingState {
        match self.trace.len() {
            0 => TrainingState::Uninitialized,
            n if n < self.config.epochs() => TrainingState::Training,
            _ => TrainingState::Converged,
        }
    }

    /// Number of epochs run so far.
    #[inline]
    pub fn epoch(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &NormalizationBounds {
        &self.bounds
    }

    /// The current thetas, in normalized space.
    #[inline]
    pub fn normalized_parameters(&self) -> Parameters {
        self.params
    }

    #[inline]
    pub fn trace(&self) -> &ErrorTrace {
        &self.trace
    }

    /// Runs a single epoch.
    ///
    /// # Returns
    /// The MSE recorded for the epoch, or `None` if every configured epoch
    /// already ran.
    pub fn step(&mut self) -> Option<f64> {
        if self.state() == TrainingState::Converged {
            return None;
        }

        let epoch = self.trace.len();
        let (params, mse) = self.optimizer.epoch(self.params, &self.samples);
        self.params = params;
        self.trace.push(mse);

        if epoch % DEBUG_EVERY == 0 || epoch + 1 == self.config.epochs() {
            debug!(
                "epoch {epoch}: theta_0={} theta_1={} mse={mse}",
                params.theta_0, params.theta_1
            );
        }

        Some(mse)
    }

    /// Runs the remaining epochs and maps the thetas back to the original
    /// units.
    ///
    /// # Errors
    /// `Diverged` if the thetas are no longer finite once every epoch ran.
    pub fn run(self) -> Result<TrainedModel> {
        self.run_with_progress(ProgressBar::hidden())
    }

    /// Same as `run`, advancing `progress` by one on every epoch.
    ///
    /// The bar's length is set to the configured epoch count and the bar is
    /// finished when the loop ends, diverged or not.
    pub fn run_with_progress(mut self, progress: ProgressBar) -> Result<TrainedModel> {
        info!(
            "training for {} epochs with learning rate {}",
            self.config.epochs(),
            self.config.learning_rate()
        );

        progress.set_length(self.config.epochs() as u64);
        progress.set_position(self.epoch() as u64);

        while self.step().is_some() {
            progress.inc(1);
        }
        progress.finish();

        let normalized = self.params;
        info!(
            "training completed: theta_0={} theta_1={} (normalized)",
            normalized.theta_0, normalized.theta_1
        );

        let parameters = denormalize_parameters(normalized, &self.bounds)?;
        if !(parameters.theta_0.is_finite() && parameters.theta_1.is_finite()) {
            return Err(RegressionErr::Diverged {
                learning_rate: self.config.learning_rate(),
            });
        }

        Ok(TrainedModel {
            parameters,
            bounds: self.bounds,
            trace: self.trace,
        })
    }
}

/// The outcome of a finished run, with parameters in the original units.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    parameters: Parameters,
    bounds: NormalizationBounds,
    trace: ErrorTrace,
}

impl TrainedModel {
    #[inline]
    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    #[inline]
    pub fn bounds(&self) -> &NormalizationBounds {
        &self.bounds
    }

    #[inline]
    pub fn trace(&self) -> &ErrorTrace {
        &self.trace
    }

    /// Predicts a price for `x`, in the original units.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.parameters.predict(x)
    }
}

/// Fits `dataset` with a fresh `Trainer`.
pub fn train(dataset: &Dataset, config: TrainingConfig) -> Result<TrainedModel> {
    Trainer::new(dataset, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::evaluate;

    fn line() -> Dataset {
        Dataset::from_pairs([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
    }

    #[test]
    fn state_transitions() {
        let config = TrainingConfig::new(0.1, 2).unwrap();
        let mut trainer = Trainer::new(&line(), config).unwrap();

        assert_eq!(trainer.state(), TrainingState::Uninitialized);
        assert_eq!(trainer.normalized_parameters(), Parameters::zero());

        assert!(trainer.step().is_some());
        assert_eq!(trainer.state(), TrainingState::Training);

        assert!(trainer.step().is_some());
        assert_eq!(trainer.state(), TrainingState::Converged);

        assert!(trainer.step().is_none());
        assert_eq!(trainer.epoch(), 2);
    }

    #[test]
    fn one_trace_entry_per_epoch() {
        let config = TrainingConfig::new(0.1, 25).unwrap();
        let model = train(&line(), config).unwrap();

        assert_eq!(model.trace().len(), 25);
        assert_eq!(model.trace().first().unwrap().epoch, 0);
        assert_eq!(model.trace().last().unwrap().epoch, 24);
    }

    #[test]
    fn runs_every_epoch_even_after_a_perfect_fit() {
        let ds = Dataset::from_pairs([(0.0, 1.0), (1.0, 0.0)]);
        let config = TrainingConfig::new(1.0, 500).unwrap();
        let model = train(&ds, config).unwrap();

        assert!(model.trace().last().unwrap().mse < 1e-20);
        assert_eq!(model.trace().len(), 500);
    }

    #[test]
    fn degenerate_dataset_fails_before_any_step() {
        let ds = Dataset::from_pairs([(5.0, 1.0), (5.0, 2.0)]);
        let config = TrainingConfig::new(0.1, 1000).unwrap();

        assert!(matches!(
            Trainer::new(&ds, config),
            Err(RegressionErr::DegenerateRange { .. })
        ));
    }

    #[test]
    fn overflowing_range_fails_before_any_step() {
        let ds = Dataset::from_pairs([(-1e308, 0.0), (0.0, 1.0), (1e308, 2.0)]);
        let config = TrainingConfig::new(0.1, 100).unwrap();

        assert!(matches!(
            train(&ds, config),
            Err(RegressionErr::DegenerateRange { .. })
        ));
    }

    #[test]
    fn too_large_learning_rate_is_reported_as_divergence() {
        let config = TrainingConfig::new(100.0, 1000).unwrap();

        match train(&line(), config) {
            Err(RegressionErr::Diverged { learning_rate }) => assert_eq!(learning_rate, 100.0),
            other => panic!("expected a divergence, got {other:?}"),
        }
    }

    #[test]
    fn progress_advances_once_per_epoch() {
        let config = TrainingConfig::new(0.1, 40).unwrap();
        let progress = ProgressBar::hidden();

        let mut trainer = Trainer::new(&line(), config).unwrap();
        trainer.step();
        trainer.run_with_progress(progress.clone()).unwrap();

        assert_eq!(progress.length(), Some(40));
        assert_eq!(progress.position(), 40);
        assert!(progress.is_finished());
    }

    #[test]
    fn first_trace_entry_is_the_untrained_model() {
        let config = TrainingConfig::new(0.1, 5).unwrap();
        let trainer = Trainer::new(&line(), config).unwrap();
        let untrained = evaluate(Parameters::zero(), &trainer.samples).mse;

        let model = trainer.run().unwrap();
        assert_eq!(model.trace().first().unwrap().mse, untrained);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let config = TrainingConfig::new(0.1, 10).unwrap();
        assert!(matches!(
            train(&Dataset::default(), config),
            Err(RegressionErr::EmptyDataset)
        ));
    }

    #[test]
    fn runs_are_deterministic() {
        let ds = Dataset::from_pairs([(10.0, 3.0), (20.0, 7.0), (35.0, 8.0), (50.0, 15.0)]);
        let config = TrainingConfig::new(0.3, 200).unwrap();

        let a = train(&ds, config).unwrap();
        let b = train(&ds, config).unwrap();

        assert_eq!(a.parameters(), b.parameters());
        assert_eq!(a.trace(), b.trace());
    }
}
