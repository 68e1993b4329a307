//! Model training
//!
//! Stratified splitting, the decision-tree/random-forest classifier, held-out
//! evaluation metrics, and the one-shot trainer that ties them together.

mod decision_tree;
mod engine;
mod metrics;
mod random_forest;
mod split;

pub use decision_tree::{Criterion, DecisionTree, TreeNode};
pub use engine::{EvaluationSummary, Trainer, TrainingConfig, TrainingOutcome};
pub use metrics::{roc_auc_score, ClassMetrics, ClassificationReport};
pub use random_forest::{MaxFeatures, RandomForestClassifier};
pub use split::{stratified_train_test_split, TrainTestSplit};
