//! Evaluation metrics: per-class classification report and ROC-AUC

use crate::error::{IntentError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: i64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class classification report over a held-out split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub n_samples: usize,
}

impl ClassificationReport {
    /// Compute the report from true and predicted labels
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(IntentError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        if y_true.is_empty() {
            return Err(IntentError::ValidationError(
                "cannot evaluate on an empty test split".to_string(),
            ));
        }

        let mut labels: Vec<i64> = y_true
            .iter()
            .chain(y_pred.iter())
            .map(|v| v.round() as i64)
            .collect();
        labels.sort_unstable();
        labels.dedup();

        let n = y_true.len();
        let mut per_class = Vec::with_capacity(labels.len());

        for &label in &labels {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            let mut support = 0usize;

            for (t, p) in y_true.iter().zip(y_pred.iter()) {
                let t = t.round() as i64;
                let p = p.round() as i64;
                if t == label {
                    support += 1;
                }
                match (t == label, p == label) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }

            let precision = if tp + fp > 0 {
                tp as f64 / (tp + fp) as f64
            } else {
                0.0
            };
            let recall = if tp + fn_ > 0 {
                tp as f64 / (tp + fn_) as f64
            } else {
                0.0
            };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            per_class.push(ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support,
            });
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t.round() as i64 == p.round() as i64)
            .count();

        Ok(Self {
            per_class,
            accuracy: correct as f64 / n as f64,
            n_samples: n,
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>10} {:>8} {:>8} {:>8}",
            "class", "precision", "recall", "f1", "support"
        )?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>8} {:>10.2} {:>8.2} {:>8.2} {:>8}",
                m.label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(
            f,
            "{:>8} {:>10} {:>8} {:>8.2} {:>8}",
            "accuracy", "", "", self.accuracy, self.n_samples
        )
    }
}

/// Area under the ROC curve via the rank-sum formulation, with tied scores
/// receiving their average rank.
///
/// Undefined (error) when the labels contain a single class.
pub fn roc_auc_score(y_true: &Array1<f64>, y_score: &Array1<f64>) -> Result<f64> {
    if y_true.len() != y_score.len() {
        return Err(IntentError::ShapeError {
            expected: format!("{} scores", y_true.len()),
            actual: format!("{} scores", y_score.len()),
        });
    }

    let n = y_true.len();
    let n_pos = y_true.iter().filter(|&&v| v.round() as i64 == 1).count();
    let n_neg = n - n_pos;

    if n_pos == 0 || n_neg == 0 {
        return Err(IntentError::ValidationError(
            "AUC is undefined for a single-class test split".to_string(),
        ));
    }

    // Rank all scores ascending, averaging ranks across ties
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        y_score[a]
            .partial_cmp(&y_score[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && y_score[order[j + 1]] == y_score[order[i]] {
            j += 1;
        }
        // Average of 1-based ranks i+1..=j+1
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let sum_pos_ranks: f64 = y_true
        .iter()
        .enumerate()
        .filter(|(_, &v)| v.round() as i64 == 1)
        .map(|(i, _)| ranks[i])
        .sum();

    let auc = (sum_pos_ranks - (n_pos * (n_pos + 1)) as f64 / 2.0) / (n_pos * n_neg) as f64;
    Ok(auc)
}
