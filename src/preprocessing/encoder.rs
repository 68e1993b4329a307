//! One-hot encoding for categorical columns

use crate::error::{IntentError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::category_values;

/// Categories observed for one column during fit, in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ColumnCategories {
    column: String,
    values: Vec<String>,
}

/// One-hot encoder with unknown-category tolerance.
///
/// Each fitted column expands into one indicator column per distinct observed
/// value. A value never seen during fit maps to an all-zero indicator block,
/// never an error, so inference cannot fail on a category combination absent
/// from the training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<ColumnCategories>,
    is_fitted: bool,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            is_fitted: false,
        }
    }

    /// Record the distinct values of each column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.categories.clear();

        for col_name in columns {
            let values = category_values(df, col_name)?;

            let mut seen: Vec<String> = Vec::new();
            for v in values {
                if !seen.contains(&v) {
                    seen.push(v);
                }
            }

            self.categories.push(ColumnCategories {
                column: col_name.to_string(),
                values: seen,
            });
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Expand the fitted columns of `df` into an indicator matrix
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(IntentError::ModelNotFitted);
        }

        let n_rows = df.height();
        let mut encoded = Array2::zeros((n_rows, self.output_width()));

        let mut offset = 0;
        for col in &self.categories {
            let values = category_values(df, &col.column)?;
            for (row, value) in values.iter().enumerate() {
                if let Some(pos) = col.values.iter().position(|v| v == value) {
                    encoded[[row, offset + pos]] = 1.0;
                }
                // Unknown category: leave the block at zero
            }
            offset += col.values.len();
        }

        Ok(encoded)
    }

    /// Total number of indicator columns
    pub fn output_width(&self) -> usize {
        self.categories.iter().map(|c| c.values.len()).sum()
    }

    /// Indicator column names, `column_value` style
    pub fn output_columns(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.values.iter().map(move |v| format!("{}_{}", c.column, v)))
            .collect()
    }
}
