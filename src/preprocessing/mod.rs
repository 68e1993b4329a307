//! Column-wise preprocessing
//!
//! Numeric columns pass through unchanged (cast to f64); categorical and
//! boolean columns are one-hot encoded with unknown-category tolerance.

mod encoder;
mod pipeline;

pub use encoder::OneHotEncoder;
pub use pipeline::SessionPreprocessor;

use crate::error::{IntentError, Result};
use polars::prelude::*;

/// Read a column's values as category strings.
///
/// Boolean columns stringify as "true"/"false"; everything else is cast to
/// string. Nulls are rejected.
pub(crate) fn category_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| IntentError::SchemaError(format!("missing required feature {}", name)))?;
    let series = column.as_materialized_series();

    match series.dtype() {
        DataType::Boolean => {
            let ca = series.bool().map_err(|e| IntentError::DataError(e.to_string()))?;
            ca.into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.map(|b| b.to_string()).ok_or_else(|| {
                        IntentError::ValidationError(format!("null value in column {} at row {}", name, i))
                    })
                })
                .collect()
        }
        _ => {
            let casted = series
                .cast(&DataType::String)
                .map_err(|e| IntentError::DataError(e.to_string()))?;
            let ca = casted.str().map_err(|e| IntentError::DataError(e.to_string()))?;
            ca.into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.map(|s| s.to_string()).ok_or_else(|| {
                        IntentError::ValidationError(format!("null value in column {} at row {}", name, i))
                    })
                })
                .collect()
        }
    }
}

/// Read a column's values as f64
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| IntentError::SchemaError(format!("missing required feature {}", name)))?;

    let casted = column
        .cast(&DataType::Float64)
        .map_err(|e| IntentError::DataError(format!("column {} is not numeric: {}", name, e)))?;
    let ca = casted.f64().map_err(|e| IntentError::DataError(e.to_string()))?;

    ca.into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| {
                IntentError::ValidationError(format!("null value in column {} at row {}", name, i))
            })
        })
        .collect()
}
