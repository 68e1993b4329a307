//! Random forest classifier

use crate::error::{IntentError, Result};
use super::decision_tree::{Criterion, DecisionTree};
use ndarray::{Array1, Array2, Axis};
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for the number of features sampled per split
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of the feature count
    Sqrt,
    /// Log2 of the feature count
    Log2,
    /// Fixed number
    Fixed(usize),
    /// All features
    All,
}

/// Random forest classifier: seeded bootstrap samples, Gini trees built in
/// parallel, majority voting with vote-fraction probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub criterion: Criterion,
    pub random_state: Option<u64>,
    n_features: usize,
    classes: Vec<f64>,
    feature_importances: Option<Array1<f64>>,
}

impl Default for RandomForestClassifier {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RandomForestClassifier {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            criterion: Criterion::Gini,
            random_state: None,
            n_features: 0,
            classes: Vec::new(),
            feature_importances: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    fn features_per_split(&self, n_features: usize) -> usize {
        match self.max_features {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().ceil() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().ceil() as usize,
            MaxFeatures::Fixed(n) => n.min(n_features),
            MaxFeatures::All => n_features,
        }
        .max(1)
    }

    /// Fit the forest to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(IntentError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 || n_features == 0 {
            return Err(IntentError::ValidationError(
                "cannot fit a forest without samples and features".to_string(),
            ));
        }

        self.n_features = n_features;
        let max_features = self.features_per_split(n_features);

        let mut classes: Vec<f64> = y.iter().copied().collect();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup();
        self.classes = classes;

        let base_seed = self.random_state.unwrap_or(42);

        let trees: Result<Vec<DecisionTree>> = (0..self.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let seed = base_seed.wrapping_add(tree_idx as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                // Bootstrap sample with replacement
                let sample_indices: Vec<usize> = (0..n_samples)
                    .map(|_| (rng.next_u64() as usize) % n_samples)
                    .collect();

                let x_boot = x.select(Axis(0), &sample_indices);
                let y_boot: Array1<f64> =
                    Array1::from_vec(sample_indices.iter().map(|&i| y[i]).collect());

                let mut tree = DecisionTree::new()
                    .with_min_samples_split(self.min_samples_split)
                    .with_min_samples_leaf(self.min_samples_leaf)
                    .with_criterion(self.criterion)
                    .with_random_state(seed);
                if let Some(d) = self.max_depth {
                    tree = tree.with_max_depth(d);
                }
                tree.max_features = Some(max_features);

                tree.fit(&x_boot, &y_boot)?;
                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        self.compute_feature_importances();

        Ok(self)
    }

    fn compute_feature_importances(&mut self) {
        if self.trees.is_empty() {
            return;
        }

        let mut total = vec![0.0; self.n_features];
        for tree in &self.trees {
            if let Some(imp) = tree.feature_importances() {
                for (i, &val) in imp.iter().enumerate() {
                    total[i] += val;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        for imp in &mut total {
            *imp /= n_trees;
        }
        let sum: f64 = total.iter().sum();
        if sum > 0.0 {
            for imp in &mut total {
                *imp /= sum;
            }
        }

        self.feature_importances = Some(Array1::from_vec(total));
    }

    /// Predict the majority-vote class of each row
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;

        let predictions: Vec<f64> = proba
            .axis_iter(Axis(0))
            .map(|row| {
                let best = row
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.classes[best]
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }

    /// Predict class probabilities as vote fractions, one column per class in
    /// ascending class order
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if self.trees.is_empty() {
            return Err(IntentError::ModelNotFitted);
        }

        let all_predictions: Vec<Array1<f64>> = self
            .trees
            .par_iter()
            .map(|tree| tree.predict(x))
            .collect::<Result<Vec<_>>>()?;

        let n_samples = x.nrows();
        let n_classes = self.classes.len();
        let class_index: HashMap<i64, usize> = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, &c)| (c.round() as i64, i))
            .collect();

        let mut proba = Array2::zeros((n_samples, n_classes));
        for preds in &all_predictions {
            for (i, &p) in preds.iter().enumerate() {
                if let Some(&j) = class_index.get(&(p.round() as i64)) {
                    proba[[i, j]] += 1.0;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        proba.mapv_inplace(|v| v / n_trees);

        Ok(proba)
    }

    /// Probability of the positive class (label 1) for each row.
    ///
    /// Zero when class 1 was absent from the training labels.
    pub fn positive_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;

        match self.classes.iter().position(|&c| c.round() as i64 == 1) {
            Some(j) => Ok(proba.column(j).to_owned()),
            None => Ok(Array1::zeros(x.nrows())),
        }
    }

    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn training_data() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [0.0, 0.1],
            [0.1, 0.0],
            [0.2, 0.2],
            [0.1, 0.1],
            [1.0, 1.0],
            [1.1, 0.9],
            [0.9, 1.1],
            [1.0, 0.9],
        ];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_fit_predict() {
        let (x, y) = training_data();
        let mut forest = RandomForestClassifier::new(25).with_random_state(42);
        forest.fit(&x, &y).unwrap();

        let predictions = forest.predict(&x).unwrap();
        let accuracy = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, a)| (*p - *a).abs() < 0.5)
            .count() as f64
            / y.len() as f64;

        assert!(accuracy >= 0.9, "accuracy too low: {}", accuracy);
    }

    #[test]
    fn test_predict_proba_rows_sum_to_one() {
        let (x, y) = training_data();
        let mut forest = RandomForestClassifier::new(25).with_random_state(42);
        forest.fit(&x, &y).unwrap();

        let proba = forest.predict_proba(&x).unwrap();
        assert_eq!(proba.ncols(), 2);
        for row in proba.axis_iter(Axis(0)) {
            let sum: f64 = row.sum();
            assert!((sum - 1.0).abs() < 1e-9, "row sum: {}", sum);
        }
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let (x, y) = training_data();

        let mut a = RandomForestClassifier::new(25).with_random_state(7);
        a.fit(&x, &y).unwrap();
        let mut b = RandomForestClassifier::new(25).with_random_state(7);
        b.fit(&x, &y).unwrap();

        let pa = a.positive_proba(&x).unwrap();
        let pb = b.positive_proba(&x).unwrap();
        assert_eq!(pa.to_vec(), pb.to_vec());
    }

    #[test]
    fn test_positive_proba_without_positive_class() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![0.0, 0.0, 0.0, 0.0];

        let mut forest = RandomForestClassifier::new(5).with_random_state(42);
        forest.fit(&x, &y).unwrap();

        let proba = forest.positive_proba(&x).unwrap();
        assert!(proba.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let forest = RandomForestClassifier::new(5);
        let x = array![[0.0, 1.0]];
        assert!(matches!(
            forest.predict(&x),
            Err(IntentError::ModelNotFitted)
        ));
    }
}
