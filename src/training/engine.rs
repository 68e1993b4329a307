//! Training orchestration: split, fit, evaluate

use crate::data::split_features_target;
use crate::error::{IntentError, Result};
use crate::pipeline::IntentPipeline;
use crate::preprocessing::SessionPreprocessor;
use super::metrics::{roc_auc_score, ClassificationReport};
use super::random_forest::RandomForestClassifier;
use super::split::stratified_train_test_split;
use ndarray::Array1;
use polars::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

/// Training configuration
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
    /// Seed for the stratified shuffle and the forest
    pub seed: u64,
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Depth cap per tree (unlimited when None)
    pub max_depth: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            n_trees: 200,
            max_depth: None,
        }
    }
}

/// Held-out evaluation results.
///
/// Either field may be absent: evaluation failures are logged, not fatal, and
/// the fitted pipeline is returned regardless.
#[derive(Debug, Clone)]
pub struct EvaluationSummary {
    pub report: Option<ClassificationReport>,
    pub auc: Option<f64>,
    pub n_train: usize,
    pub n_test: usize,
}

/// A fitted pipeline plus its evaluation
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub pipeline: IntentPipeline,
    pub evaluation: EvaluationSummary,
    pub training_time_secs: f64,
}

/// One-shot trainer for the purchase-intent pipeline
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Train on a full table (features plus `Revenue` label).
    ///
    /// Performs the stratified split, fits the preprocessor and forest on the
    /// training rows only, and evaluates on the held-out rows. Any error
    /// before the fit aborts the run; evaluation errors are logged and the
    /// fitted pipeline is still returned.
    pub fn train(&self, df: &DataFrame) -> Result<TrainingOutcome> {
        let start = Instant::now();

        let (features, y) = split_features_target(df)?;

        let split = stratified_train_test_split(&y, self.config.test_size, self.config.seed)?;
        let df_train = take_rows(&features, &split.train_indices)?;
        let df_test = take_rows(&features, &split.test_indices)?;
        let y_train = select_labels(&y, &split.train_indices);
        let y_test = select_labels(&y, &split.test_indices);

        info!(
            n_train = split.train_indices.len(),
            n_test = split.test_indices.len(),
            "fitting pipeline on stratified split"
        );

        let mut preprocessor = SessionPreprocessor::new();
        let x_train = preprocessor.fit_transform(&df_train)?;

        let mut classifier = RandomForestClassifier::new(self.config.n_trees)
            .with_random_state(self.config.seed);
        if let Some(d) = self.config.max_depth {
            classifier = classifier.with_max_depth(d);
        }
        classifier.fit(&x_train, &y_train)?;

        let evaluation = self.evaluate(&preprocessor, &classifier, &df_test, &y_test, &split);

        let pipeline = IntentPipeline::new(preprocessor, classifier);

        Ok(TrainingOutcome {
            pipeline,
            evaluation,
            training_time_secs: start.elapsed().as_secs_f64(),
        })
    }

    fn evaluate(
        &self,
        preprocessor: &SessionPreprocessor,
        classifier: &RandomForestClassifier,
        df_test: &DataFrame,
        y_test: &Array1<f64>,
        split: &super::split::TrainTestSplit,
    ) -> EvaluationSummary {
        let mut summary = EvaluationSummary {
            report: None,
            auc: None,
            n_train: split.train_indices.len(),
            n_test: split.test_indices.len(),
        };

        let x_test = match preprocessor.transform(df_test) {
            Ok(x) => x,
            Err(e) => {
                warn!(error = %e, "evaluation skipped: could not transform the test split");
                return summary;
            }
        };

        match classifier
            .predict(&x_test)
            .and_then(|y_pred| ClassificationReport::compute(y_test, &y_pred))
        {
            Ok(report) => {
                info!(accuracy = report.accuracy, "held-out evaluation complete");
                summary.report = Some(report);
            }
            Err(e) => warn!(error = %e, "evaluation failed; model is kept"),
        }

        match classifier
            .positive_proba(&x_test)
            .and_then(|scores| roc_auc_score(y_test, &scores))
        {
            Ok(auc) => {
                info!(auc, "ROC-AUC computed");
                summary.auc = Some(auc);
            }
            Err(e) => warn!(error = %e, "skipping ROC-AUC"),
        }

        summary
    }
}

fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    );
    df.take(&idx).map_err(|e| IntentError::DataError(e.to_string()))
}

fn select_labels(y: &Array1<f64>, indices: &[usize]) -> Array1<f64> {
    Array1::from_vec(indices.iter().map(|&i| y[i]).collect())
}
