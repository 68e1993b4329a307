//! The fitted preprocessing transform for session tables

use crate::error::{IntentError, Result};
use crate::schema::FeatureSchema;
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::{numeric_values, OneHotEncoder};

/// Column-wise preprocessor for session feature tables.
///
/// Fitting derives the feature schema from the training table's dtypes and
/// records the observed categories; transforming produces the encoded feature
/// matrix with numeric columns first (schema order), then one indicator block
/// per categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPreprocessor {
    schema: FeatureSchema,
    encoder: OneHotEncoder,
    is_fitted: bool,
}

impl SessionPreprocessor {
    pub fn new() -> Self {
        Self {
            schema: FeatureSchema::from_dataframe(&DataFrame::empty()),
            encoder: OneHotEncoder::new(),
            is_fitted: false,
        }
    }

    /// Derive the schema and fit the encoder on the training table
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        if df.width() == 0 {
            return Err(IntentError::ValidationError(
                "cannot fit a preprocessor on an empty table".to_string(),
            ));
        }

        self.schema = FeatureSchema::from_dataframe(df);

        let categorical = self.schema.categorical_columns();
        let cols: Vec<&str> = categorical.iter().map(|s| s.as_str()).collect();
        self.encoder.fit(df, &cols)?;

        self.is_fitted = true;
        Ok(self)
    }

    /// Encode a features table into a matrix
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(IntentError::ModelNotFitted);
        }

        let n_rows = df.height();
        let numeric = self.schema.numeric_columns();
        let width = numeric.len() + self.encoder.output_width();
        let mut matrix = Array2::zeros((n_rows, width));

        for (j, name) in numeric.iter().enumerate() {
            let values = numeric_values(df, name)?;
            for (i, v) in values.into_iter().enumerate() {
                matrix[[i, j]] = v;
            }
        }

        let encoded = self.encoder.transform(df)?;
        for i in 0..n_rows {
            for j in 0..encoded.ncols() {
                matrix[[i, numeric.len() + j]] = encoded[[i, j]];
            }
        }

        Ok(matrix)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Names of the encoded output columns, in matrix order
    pub fn output_columns(&self) -> Vec<String> {
        let mut names = self.schema.numeric_columns();
        names.extend(self.encoder.output_columns());
        names
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}

impl Default for SessionPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> DataFrame {
        df!(
            "Administrative" => &[1i64, 2, 0],
            "BounceRates" => &[0.1, 0.0, 0.2],
            "Month" => &["Feb", "Mar", "Feb"],
            "Weekend" => &[true, false, false]
        )
        .unwrap()
    }

    #[test]
    fn test_fit_transform_layout() {
        let mut pre = SessionPreprocessor::new();
        let matrix = pre.fit_transform(&sessions()).unwrap();

        // 2 numeric + 2 months + 2 weekend flags
        assert_eq!(matrix.shape(), &[3, 6]);
        assert_eq!(
            pre.output_columns(),
            vec![
                "Administrative",
                "BounceRates",
                "Month_Feb",
                "Month_Mar",
                "Weekend_true",
                "Weekend_false"
            ]
        );

        // First row: numeric passthrough then indicators for Feb and true
        assert_eq!(matrix.row(0).to_vec(), vec![1.0, 0.1, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_transform_single_row_with_unknown_category() {
        let mut pre = SessionPreprocessor::new();
        pre.fit(&sessions()).unwrap();

        let row = df!(
            "Administrative" => &[5i64],
            "BounceRates" => &[0.4],
            "Month" => &["June"],
            "Weekend" => &[true]
        )
        .unwrap();

        let matrix = pre.transform(&row).unwrap();
        assert_eq!(matrix.row(0).to_vec(), vec![5.0, 0.4, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_transform_missing_column_fails() {
        let mut pre = SessionPreprocessor::new();
        pre.fit(&sessions()).unwrap();

        let row = df!(
            "Administrative" => &[5i64],
            "BounceRates" => &[0.4],
            "Month" => &["Feb"]
        )
        .unwrap();

        assert!(pre.transform(&row).is_err());
    }
}
