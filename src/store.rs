use std::{fs::File, path::Path};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{RegressionErr, Result},
    model::Parameters,
};

/// One row of the parameter file, under the `theta_0,theta_1` header.
#[derive(Debug, Serialize, Deserialize)]
struct ThetaRecord {
    theta_0: f64,
    theta_1: f64,
}

/// The result of reading a parameter file.
///
/// Reading never fails: a missing or corrupt file falls back to the
/// untrained model, but the caller can tell the two apart.
#[derive(Debug)]
pub enum LoadedParameters {
    /// The file was read successfully.
    Loaded(Parameters),
    /// The file could not be used; the reason is kept for reporting.
    Defaulted(RegressionErr),
}

impl LoadedParameters {
    /// The parameters to predict with, `(0, 0)` when defaulted.
    pub fn parameters(&self) -> Parameters {
        match self {
            LoadedParameters::Loaded(p) => *p,
            LoadedParameters::Defaulted(_) => Parameters::zero(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, LoadedParameters::Defaulted(_))
    }
}

/// Writes `params` as a `theta_0,theta_1` header followed by one data row.
///
/// # Errors
/// Returns `ParameterWrite` if the file can't be created or written.
pub fn save_parameters<P: AsRef<Path>>(path: P, params: Parameters) -> Result<()> {
    let path = path.as_ref();
    info!("saving parameters to [{}]", path.display());

    let write_err = |source| RegressionErr::ParameterWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::Writer::from_path(path).map_err(write_err)?;
    wtr.serialize(ThetaRecord {
        theta_0: params.theta_0,
        theta_1: params.theta_1,
    })
    .map_err(write_err)?;
    wtr.flush().map_err(|e| write_err(e.into()))?;

    Ok(())
}

/// Reads the parameters written by `save_parameters`.
///
/// A missing, unreadable or malformed file yields
/// `LoadedParameters::Defaulted` with the untrained `(0, 0)` model.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> LoadedParameters {
    let path = path.as_ref();
    info!("reading parameters from [{}]", path.display());

    match read_parameters(path) {
        Ok(params) => {
            info!(
                "parameters read: theta_0={} theta_1={}",
                params.theta_0, params.theta_1
            );
            LoadedParameters::Loaded(params)
        }
        Err(reason) => {
            let err = RegressionErr::ParameterRead {
                path: path.to_path_buf(),
                reason,
            };
            warn!("{err}, falling back to an untrained model");
            LoadedParameters::Defaulted(err)
        }
    }
}

fn read_parameters(path: &Path) -> std::result::Result<Parameters, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let record = rdr
        .deserialize::<ThetaRecord>()
        .next()
        .ok_or("no parameter row after the header")?
        .map_err(|e| e.to_string())?;

    if !(record.theta_0.is_finite() && record.theta_1.is_finite()) {
        return Err("parameters are not finite".into());
    }

    Ok(Parameters::new(record.theta_0, record.theta_1))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("ft_lr_store_{}_{name}.csv", process::id()))
    }

    #[test]
    fn written_file_has_header_and_one_row() {
        let path = temp_path("format");
        save_parameters(&path, Parameters::new(8499.5, -0.0214)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, ["theta_0,theta_1", "8499.5,-0.0214"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn reads_files_without_trailing_newline() {
        let path = temp_path("no_newline");
        fs::write(&path, "theta_0,theta_1\n1.5,-2.25").unwrap();

        let loaded = load_parameters(&path);
        assert!(!loaded.is_defaulted());
        assert_eq!(loaded.parameters(), Parameters::new(1.5, -2.25));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_defaults_to_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "theta_0,theta_1\nabc,1\n").unwrap();

        let loaded = load_parameters(&path);
        assert!(matches!(
            loaded,
            LoadedParameters::Defaulted(RegressionErr::ParameterRead { .. })
        ));
        assert_eq!(loaded.parameters(), Parameters::zero());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn header_only_file_defaults_to_zero() {
        let path = temp_path("header_only");
        fs::write(&path, "theta_0,theta_1\n").unwrap();

        assert!(load_parameters(&path).is_defaulted());

        fs::remove_file(&path).unwrap();
    }
}
