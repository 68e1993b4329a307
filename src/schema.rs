//! Feature schema: the declared numeric/categorical partition of session columns
//!
//! The partition is decided once, from the training table's dtypes, and is
//! serialized inside the artifact. Inference reconstructs typed rows from it
//! instead of re-inferring column kinds from a single session.

use crate::error::{IntentError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Passed through unchanged (cast to f64)
    Numeric,
    /// One-hot encoded
    Categorical,
}

/// A single declared feature column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureField {
    pub name: String,
    pub kind: FeatureKind,
}

/// Ordered list of (name, kind) pairs covering every feature column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    fields: Vec<FeatureField>,
}

impl FeatureSchema {
    /// Partition the columns of a features table by dtype.
    ///
    /// Integer and floating-point columns are numeric; string and boolean
    /// columns (and anything else) are categorical. Original column order is
    /// preserved.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let fields = df
            .get_columns()
            .iter()
            .map(|col| {
                let kind = match col.dtype() {
                    DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
                    | DataType::Float32
                    | DataType::Float64 => FeatureKind::Numeric,
                    _ => FeatureKind::Categorical,
                };
                FeatureField {
                    name: col.name().to_string(),
                    kind,
                }
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[FeatureField] {
        &self.fields
    }

    /// Names of numeric columns, in schema order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.kind == FeatureKind::Numeric)
            .map(|f| f.name.clone())
            .collect()
    }

    /// Names of categorical columns, in schema order
    pub fn categorical_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.kind == FeatureKind::Categorical)
            .map(|f| f.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a single-row features table from a session mapping.
    ///
    /// Every schema column must be present in the mapping (missing key is a
    /// SchemaError naming the feature); keys outside the schema are ignored.
    pub fn session_to_dataframe(&self, session: &HashMap<String, FeatureValue>) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let value = session.get(&field.name).ok_or_else(|| {
                IntentError::SchemaError(format!("missing required feature {}", field.name))
            })?;

            let series = match field.kind {
                FeatureKind::Numeric => {
                    let v = value.as_numeric().ok_or_else(|| {
                        IntentError::ValidationError(format!(
                            "feature {} expects a numeric value",
                            field.name
                        ))
                    })?;
                    Series::new(field.name.as_str().into(), &[v])
                }
                FeatureKind::Categorical => {
                    let s = value.as_category();
                    Series::new(field.name.as_str().into(), &[s.as_str()])
                }
            };

            columns.push(series.into());
        }

        DataFrame::new(columns).map_err(|e| IntentError::DataError(e.to_string()))
    }
}

/// A typed feature value supplied by a caller at inference time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value, if it has one
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Categorical view of the value.
    ///
    /// Booleans encode as "true"/"false" to match how polars boolean columns
    /// are stringified during encoder fitting; whole numbers drop the
    /// fractional part so a categorical code 3 round-trips as "3".
    pub fn as_category(&self) -> String {
        match self {
            FeatureValue::Flag(b) => b.to_string(),
            FeatureValue::Number(v) if v.fract() == 0.0 => format!("{}", *v as i64),
            FeatureValue::Number(v) => v.to_string(),
            FeatureValue::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "Administrative" => &[1i64, 2, 3],
            "BounceRates" => &[0.1, 0.2, 0.3],
            "Month" => &["Feb", "Mar", "Feb"],
            "Weekend" => &[true, false, true]
        )
        .unwrap()
    }

    #[test]
    fn test_partition_by_dtype() {
        let schema = FeatureSchema::from_dataframe(&sample_df());

        assert_eq!(schema.numeric_columns(), vec!["Administrative", "BounceRates"]);
        assert_eq!(schema.categorical_columns(), vec!["Month", "Weekend"]);
        assert_eq!(schema.len(), 4);
    }

    #[test]
    fn test_session_to_dataframe() {
        let schema = FeatureSchema::from_dataframe(&sample_df());

        let mut session = HashMap::new();
        session.insert("Administrative".to_string(), FeatureValue::Number(2.0));
        session.insert("BounceRates".to_string(), FeatureValue::Number(0.05));
        session.insert("Month".to_string(), FeatureValue::Text("June".to_string()));
        session.insert("Weekend".to_string(), FeatureValue::Flag(true));
        // Extra keys are ignored
        session.insert("Unknown".to_string(), FeatureValue::Number(9.0));

        let row = schema.session_to_dataframe(&session).unwrap();
        assert_eq!(row.height(), 1);
        assert_eq!(row.width(), 4);
        assert_eq!(
            row.get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
            vec!["Administrative", "BounceRates", "Month", "Weekend"]
        );
    }

    #[test]
    fn test_missing_feature_is_schema_error() {
        let schema = FeatureSchema::from_dataframe(&sample_df());

        let mut session = HashMap::new();
        session.insert("Administrative".to_string(), FeatureValue::Number(2.0));

        let err = schema.session_to_dataframe(&session).unwrap_err();
        match err {
            IntentError::SchemaError(msg) => assert!(msg.contains("missing required feature")),
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_value_as_category() {
        assert_eq!(FeatureValue::Flag(true).as_category(), "true");
        assert_eq!(FeatureValue::Number(3.0).as_category(), "3");
        assert_eq!(FeatureValue::Text("June".into()).as_category(), "June");
    }

    #[test]
    fn test_feature_value_untagged_deserialization() {
        let v: FeatureValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FeatureValue::Flag(true));
        let v: FeatureValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, FeatureValue::Number(1.5));
        let v: FeatureValue = serde_json::from_str("\"June\"").unwrap();
        assert_eq!(v, FeatureValue::Text("June".to_string()));
    }
}
