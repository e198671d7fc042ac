pub mod bounds;
pub mod params;

pub use bounds::{denormalize_parameters, normalize, NormalizationBounds};
pub use params::{predict, Parameters};
