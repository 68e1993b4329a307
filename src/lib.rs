//! shopintent — purchase-intent analysis for online shopping sessions
//!
//! Trains a tabular classifier that predicts whether a browsing session ends
//! in a purchase, persists the fitted pipeline as a single artifact, and
//! serves single-session predictions.
//!
//! # Modules
//!
//! - [`data`] - Dataset loading and feature/target splitting
//! - [`schema`] - The declared numeric/categorical feature schema
//! - [`preprocessing`] - Numeric passthrough + one-hot encoding
//! - [`training`] - Stratified split, random forest, evaluation, trainer
//! - [`pipeline`] - The composed preprocess-then-classify pipeline
//! - [`artifact`] - Persistence of the trained bundle
//! - [`inference`] - Single-session inference service
//! - [`server`] - Thin JSON API over the inference service
//! - [`cli`] - Command-line interface

pub mod error;

pub mod artifact;
pub mod cli;
pub mod data;
pub mod inference;
pub mod pipeline;
pub mod preprocessing;
pub mod schema;
pub mod server;
pub mod training;

pub use artifact::ArtifactBundle;
pub use error::{IntentError, Result};
pub use inference::{InferenceService, Prediction, SessionFeatures};
pub use pipeline::IntentPipeline;
pub use schema::{FeatureKind, FeatureSchema, FeatureValue};
