use std::{error::Error, fmt, path::PathBuf};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The axis of a sample, used to point at the offending column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Failures of loading, training, persisting and reporting a regression.
#[derive(Debug)]
pub enum RegressionErr {
    /// The dataset file is missing, unreadable or not valid CSV.
    DatasetRead { path: PathBuf, source: csv::Error },
    /// A CSV stream that isn't bound to a file is malformed.
    Csv(csv::Error),
    /// A dataset field could not be parsed as a finite number.
    InvalidField { line: u64, field: String },
    /// No valid sample was left after parsing.
    EmptyDataset,
    /// The min-max range of `axis` is zero or overflows `f64`.
    DegenerateRange { axis: Axis },
    /// A training or settings value is out of its domain.
    InvalidConfig(String),
    /// The thetas stopped being finite numbers, usually from a learning
    /// rate that is too large for the data.
    Diverged { learning_rate: f64 },
    /// The parameter file could not be read. Only ever reported through
    /// `LoadedParameters::Defaulted`.
    ParameterRead { path: PathBuf, reason: String },
    /// The parameter file could not be written.
    ParameterWrite { path: PathBuf, source: csv::Error },
    /// The report could not be rendered.
    Reporting(String),
}

impl fmt::Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::DatasetRead { path, source } => {
                write!(f, "cannot read dataset '{}': {source}", path.display())
            }
            RegressionErr::Csv(e) => write!(f, "malformed csv: {e}"),
            RegressionErr::InvalidField { line, field } => {
                write!(f, "dataset line {line}: cannot parse '{field}' as a number")
            }
            RegressionErr::EmptyDataset => write!(f, "dataset has no valid samples"),
            RegressionErr::DegenerateRange { axis } => write!(
                f,
                "the {axis} range of the dataset is zero or overflows, cannot normalize it"
            ),
            RegressionErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            RegressionErr::Diverged { learning_rate } => write!(
                f,
                "training diverged with learning rate {learning_rate}, try a smaller one"
            ),
            RegressionErr::ParameterRead { path, reason } => {
                write!(f, "cannot read parameters from '{}': {reason}", path.display())
            }
            RegressionErr::ParameterWrite { path, source } => {
                write!(f, "cannot write parameters to '{}': {source}", path.display())
            }
            RegressionErr::Reporting(msg) => write!(f, "cannot render report: {msg}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::DatasetRead { source, .. } => Some(source),
            RegressionErr::Csv(e) => Some(e),
            RegressionErr::ParameterWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for RegressionErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
