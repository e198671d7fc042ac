use std::{fs::File, io, path::Path};

use log::{debug, info};

use super::dataset::{Dataset, Sample};
use crate::error::{RegressionErr, Result};

const FIELDS_PER_ROW: usize = 2;

/// Loads a `x,y` dataset from a CSV file.
///
/// # Args
/// * `path` - Path of the CSV file. Its first row is a header and is ignored.
///
/// # Returns
/// The samples in file order.
///
/// # Errors
/// Returns `DatasetRead` if the file can't be opened or isn't valid CSV and
/// `InvalidField` if a value isn't a finite number.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    info!("reading dataset from [{}]", path.display());

    let file = File::open(path).map_err(|e| RegressionErr::DatasetRead {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;

    let dataset = read_dataset(file).map_err(|e| match e {
        RegressionErr::Csv(source) => RegressionErr::DatasetRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!("read {} samples from [{}]", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses a `x,y` dataset from any reader.
///
/// Rows that don't have exactly two fields are skipped.
pub fn read_dataset<R: io::Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != FIELDS_PER_ROW {
            debug!(
                "skipping line {line}: expected {FIELDS_PER_ROW} fields, got {}",
                record.len()
            );
            continue;
        }

        let x = parse_field(&record[0], line)?;
        let y = parse_field(&record[1], line)?;
        samples.push(Sample::new(x, y));
    }

    Ok(Dataset::new(samples))
}

fn parse_field(field: &str, line: u64) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RegressionErr::InvalidField {
            line,
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_ignored_and_rows_are_parsed_in_order() {
        let csv = "km,price\n240000,3650\n139800,3800\n150500,3650\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.samples()[0], Sample::new(240000.0, 3650.0));
        assert_eq!(ds.samples()[2], Sample::new(150500.0, 3650.0));
    }

    #[test]
    fn rows_without_two_fields_are_skipped() {
        let csv = "km,price\n1,2\n3\n4,5,6\n\n7,8";
        let ds = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(ds.samples(), &[Sample::new(1.0, 2.0), Sample::new(7.0, 8.0)]);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let csv = "km,price\n 1.5 , 2.5 \n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.samples(), &[Sample::new(1.5, 2.5)]);
    }

    #[test]
    fn malformed_number_fails_the_whole_load() {
        let csv = "km,price\n1,2\nabc,3\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();

        match err {
            RegressionErr::InvalidField { line, field } => {
                assert_eq!(line, 3);
                assert_eq!(field, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let csv = "km,price\n1,NaN\n";
        assert!(matches!(
            read_dataset(csv.as_bytes()),
            Err(RegressionErr::InvalidField { .. })
        ));
    }

    #[test]
    fn header_only_file_yields_an_empty_dataset() {
        let ds = read_dataset("km,price\n".as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_file_is_a_dataset_read_error() {
        let path = std::env::temp_dir().join("ft_linear_regression_missing_dataset.csv");
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, RegressionErr::DatasetRead { .. }));
    }
}
