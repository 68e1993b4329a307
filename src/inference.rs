//! Single-session inference over a loaded artifact

use crate::artifact::ArtifactBundle;
use crate::error::Result;
use crate::pipeline::DECISION_THRESHOLD;
use crate::schema::FeatureValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// A session described as feature name → value
pub type SessionFeatures = HashMap<String, FeatureValue>;

/// Outcome of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 when the probability reaches the decision threshold
    pub class: u8,
    /// Probability that the session ends in a purchase
    pub probability: f64,
}

/// Inference service over an immutable, loaded bundle.
///
/// Constructed once per process; after construction every call is a read-only
/// pass over the bundle, so the service can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct InferenceService {
    bundle: ArtifactBundle,
}

impl InferenceService {
    /// Load the artifact from disk and build the service
    pub fn from_artifact(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bundle = ArtifactBundle::load(path)?;
        info!(
            artifact = %path.display(),
            numeric = bundle.numeric_features.len(),
            categorical = bundle.categorical_features.len(),
            trees = bundle.pipeline.classifier().n_trees(),
            "model loaded"
        );
        Ok(Self { bundle })
    }

    pub fn new(bundle: ArtifactBundle) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Predict the purchase intent of one session.
    ///
    /// Every schema feature must be present in the mapping (missing key is a
    /// SchemaError naming the feature); extra keys are ignored. A categorical
    /// value never seen during training is tolerated, not an error.
    pub fn predict(&self, session: &SessionFeatures) -> Result<Prediction> {
        let row = self.bundle.pipeline.schema().session_to_dataframe(session)?;
        let proba = self.bundle.pipeline.positive_probabilities(&row)?;
        let probability = proba[0];

        Ok(Prediction {
            class: u8::from(probability >= DECISION_THRESHOLD),
            probability,
        })
    }
}
