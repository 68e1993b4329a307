//! The composed preprocess-then-classify pipeline

use crate::error::Result;
use crate::preprocessing::SessionPreprocessor;
use crate::schema::FeatureSchema;
use crate::training::RandomForestClassifier;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Decision threshold on the positive-class probability
pub const DECISION_THRESHOLD: f64 = 0.5;

/// A fitted pipeline composing two explicit stages — the preprocessing
/// transform and the classifier — behind one interface. Callers hand in raw
/// feature rows; the encoded matrix never leaves the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPipeline {
    preprocessor: SessionPreprocessor,
    classifier: RandomForestClassifier,
}

impl IntentPipeline {
    pub fn new(preprocessor: SessionPreprocessor, classifier: RandomForestClassifier) -> Self {
        Self {
            preprocessor,
            classifier,
        }
    }

    /// Probability of a purchase for each raw feature row
    pub fn positive_probabilities(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let encoded = self.preprocessor.transform(df)?;
        self.classifier.positive_proba(&encoded)
    }

    /// Class probabilities for each raw feature row, one column per class
    pub fn predict_proba(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let encoded = self.preprocessor.transform(df)?;
        self.classifier.predict_proba(&encoded)
    }

    /// Predicted class per row: 1 exactly when the purchase probability
    /// reaches the decision threshold
    pub fn predict(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let proba = self.positive_probabilities(df)?;
        Ok(proba.mapv(|p| if p >= DECISION_THRESHOLD { 1.0 } else { 0.0 }))
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.preprocessor.schema()
    }

    pub fn classifier(&self) -> &RandomForestClassifier {
        &self.classifier
    }

    /// (encoded column name, importance) pairs, descending
    pub fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        let importances = self.classifier.feature_importances()?;
        let names = self.preprocessor.output_columns();

        let mut pairs: Vec<(String, f64)> = names
            .into_iter()
            .zip(importances.iter().copied())
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Some(pairs)
    }
}
