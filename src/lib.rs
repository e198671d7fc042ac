//! Single-variable linear regression (price as a function of mileage)
//! fitted with batch gradient descent on min-max normalized data.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod report;
pub mod store;
pub mod training;

pub use config::{TrainSettings, TrainingConfig};
pub use data::{load_dataset, Dataset, Sample};
pub use error::{Axis, RegressionErr, Result};
pub use model::{denormalize_parameters, normalize, predict, NormalizationBounds, Parameters};
pub use report::render_report;
pub use store::{load_parameters, save_parameters, LoadedParameters};
pub use training::{train, ErrorTrace, TrainedModel, Trainer, TrainingState};
