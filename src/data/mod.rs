pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, Sample};
pub use loader::{load_dataset, read_dataset};
