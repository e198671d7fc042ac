mod gradient_descent;
mod trace;
mod trainer;

pub use gradient_descent::{evaluate, EpochOutcome, Gradient, GradientDescent};
pub use trace::{ErrorTrace, TraceEntry};
pub use trainer::{train, TrainedModel, Trainer, TrainingState, DEBUG_EVERY};
