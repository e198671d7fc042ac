use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{RegressionErr, Result};

/// Where both entry points look for the trained parameters by default.
pub const DEFAULT_THETAS_PATH: &str = "thetas.csv";

/// Immutable hyper-parameters of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    learning_rate: f64,
    epochs: NonZeroUsize,
}

impl TrainingConfig {
    /// Creates a new training configuration.
    ///
    /// # Args
    /// * `learning_rate` - Step length of every gradient descent update.
    /// * `epochs` - Exact number of full passes over the dataset.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the learning rate is not a finite positive
    /// number or `epochs` is zero.
    pub fn new(learning_rate: f64, epochs: usize) -> Result<Self> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(RegressionErr::InvalidConfig(format!(
                "learning rate must be a finite positive number, got {learning_rate}"
            )));
        }

        let epochs = NonZeroUsize::new(epochs)
            .ok_or_else(|| RegressionErr::InvalidConfig("epochs must be greater than 0".into()))?;

        Ok(Self {
            learning_rate,
            epochs,
        })
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[inline]
    pub fn epochs(&self) -> usize {
        self.epochs.get()
    }
}

/// Inputs of the training entry point.
///
/// Every field has a default so a settings file only needs the values it
/// changes; command line flags are applied on top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainSettings {
    pub learning_rate: f64,
    pub epochs: usize,
    pub dataset: PathBuf,
    pub thetas: PathBuf,
    pub report: PathBuf,
    pub trace: Option<PathBuf>,
    pub debug: bool,
}

impl Default for TrainSettings {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 10_000,
            dataset: PathBuf::from("data.csv"),
            thetas: PathBuf::from(DEFAULT_THETAS_PATH),
            report: PathBuf::from("report.svg"),
            trace: None,
            debug: false,
        }
    }
}

impl TrainSettings {
    /// Loads settings from a JSON file, missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the file can't be read or isn't valid.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RegressionErr::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;

        Self::from_json_str(&content)
    }

    /// Parses settings from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| RegressionErr::InvalidConfig(format!("invalid JSON: {e}")))
    }

    /// Validates the hyper-parameters part of the settings.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        TrainingConfig::new(self.learning_rate, self.epochs)
    }
}
