//! Dataset loading and feature/target splitting

use crate::error::{IntentError, Result};
use ndarray::Array1;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Name of the label column in training data
pub const LABEL_COLUMN: &str = "Revenue";

/// Loader for delimited session datasets
pub struct DataLoader {
    infer_schema_length: Option<usize>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: Some(1000),
        }
    }

    /// Load a CSV file with a header row into memory.
    ///
    /// The whole file is read in one synchronous pass; there is no streaming.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            IntentError::DataError(format!("cannot open {}: {}", path.display(), e))
        })?;

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .into_reader_with_file_handle(file);

        reader.finish().map_err(|e| {
            IntentError::DataError(format!("cannot parse {}: {}", path.display(), e))
        })
    }
}

/// Split a full table into (features table, label vector).
///
/// The label column is dropped from the features and coerced to {0,1}; every
/// other column passes through unchanged, in its original order.
pub fn split_features_target(df: &DataFrame) -> Result<(DataFrame, Array1<f64>)> {
    let label = df
        .column(LABEL_COLUMN)
        .map_err(|_| IntentError::SchemaError(format!("label column {} not found", LABEL_COLUMN)))?;

    let y = coerce_label(label.as_materialized_series())?;
    let features = df.drop(LABEL_COLUMN)?;

    Ok((features, y))
}

/// Coerce a boolean-like label series to a {0,1} vector
fn coerce_label(series: &Series) -> Result<Array1<f64>> {
    let values: Vec<f64> = match series.dtype() {
        DataType::Boolean => {
            let ca = series.bool().map_err(|e| IntentError::DataError(e.to_string()))?;
            ca.into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.map(|b| if b { 1.0 } else { 0.0 }).ok_or_else(|| {
                        IntentError::DataError(format!("null label at row {}", i))
                    })
                })
                .collect::<Result<Vec<f64>>>()?
        }
        DataType::String => {
            let ca = series.str().map_err(|e| IntentError::DataError(e.to_string()))?;
            ca.into_iter()
                .enumerate()
                .map(|(i, v)| match v.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
                    Some("true") | Some("1") => Ok(1.0),
                    Some("false") | Some("0") => Ok(0.0),
                    Some(other) => Err(IntentError::DataError(format!(
                        "unrecognized label value {:?} at row {}",
                        other, i
                    ))),
                    None => Err(IntentError::DataError(format!("null label at row {}", i))),
                })
                .collect::<Result<Vec<f64>>>()?
        }
        _ => {
            let casted = series
                .cast(&DataType::Float64)
                .map_err(|e| IntentError::DataError(e.to_string()))?;
            let ca = casted.f64().map_err(|e| IntentError::DataError(e.to_string()))?;
            ca.into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.ok_or_else(|| IntentError::DataError(format!("null label at row {}", i)))
                })
                .collect::<Result<Vec<f64>>>()?
        }
    };

    Ok(Array1::from_vec(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Administrative,Month,Revenue").unwrap();
        writeln!(file, "1,Feb,TRUE").unwrap();
        writeln!(file, "2,Mar,FALSE").unwrap();

        let df = DataLoader::new().load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DataLoader::new().load_csv("no/such/file.csv").unwrap_err();
        match err {
            IntentError::DataError(msg) => assert!(msg.contains("cannot open")),
            other => panic!("expected DataError, got {:?}", other),
        }
    }

    #[test]
    fn test_split_features_target() {
        let df = df!(
            "Administrative" => &[1i64, 2, 3],
            "Month" => &["Feb", "Mar", "Feb"],
            "Revenue" => &[true, false, true]
        )
        .unwrap();

        let (features, y) = split_features_target(&df).unwrap();

        assert_eq!(features.width(), 2);
        assert!(features.column("Revenue").is_err());
        assert_eq!(y.to_vec(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_split_missing_label() {
        let df = df!("Administrative" => &[1i64, 2]).unwrap();

        let err = split_features_target(&df).unwrap_err();
        match err {
            IntentError::SchemaError(msg) => assert!(msg.contains("Revenue")),
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_string_label_coercion() {
        let df = df!(
            "f" => &[1i64, 2],
            "Revenue" => &["TRUE", "FALSE"]
        )
        .unwrap();

        // String labels only appear when schema inference is disabled upstream,
        // but coercion still has to handle them.
        let (_, y) = split_features_target(&df).unwrap();
        assert_eq!(y.to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_file_is_not_csv() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8, 159, 146, 150]).unwrap();

        let result = DataLoader::new().load_csv(file.path());
        assert!(result.is_err());
    }
}
