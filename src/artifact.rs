//! Persistence of the trained pipeline bundle

use crate::error::{IntentError, Result};
use crate::pipeline::IntentPipeline;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The single serialized bundle: the fitted pipeline plus the column lists
/// that record the numeric/categorical partition decided at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub pipeline: IntentPipeline,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
}

impl ArtifactBundle {
    /// Bundle a fitted pipeline with its schema's column lists
    pub fn from_pipeline(pipeline: IntentPipeline) -> Self {
        let numeric_features = pipeline.schema().numeric_columns();
        let categorical_features = pipeline.schema().categorical_columns();
        Self {
            pipeline,
            numeric_features,
            categorical_features,
        }
    }

    /// Serialize to a single JSON file.
    ///
    /// Writes to a sibling temp path, flushes, then renames into place so a
    /// concurrent reader never observes a half-written artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    IntentError::SerializationError(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let json = serde_json::to_string(self)?;

        let tmp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path).map_err(|e| {
                IntentError::SerializationError(format!(
                    "cannot create {}: {}",
                    tmp_path.display(),
                    e
                ))
            })?;
            file.write_all(json.as_bytes()).map_err(|e| {
                IntentError::SerializationError(format!("cannot write artifact: {}", e))
            })?;
            file.sync_all().map_err(|e| {
                IntentError::SerializationError(format!("cannot flush artifact: {}", e))
            })?;
        }

        std::fs::rename(&tmp_path, path).map_err(|e| {
            IntentError::SerializationError(format!(
                "cannot move artifact into place at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Deserialize a bundle from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                IntentError::ArtifactNotFound(path.display().to_string())
            }
            _ => IntentError::ArtifactCorrupt(format!("{}: {}", path.display(), e)),
        })?;

        serde_json::from_str(&json)
            .map_err(|e| IntentError::ArtifactCorrupt(format!("{}: {}", path.display(), e)))
    }
}
