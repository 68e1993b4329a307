//! Stratified train/test splitting

use crate::error::{IntentError, Result};
use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Row indices of a single train/test split
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Produce a stratified train/test split of the label vector.
///
/// Samples are grouped by class, shuffled with a seeded RNG, and each class
/// contributes `test_size` of its members to the test set (rounded, at least
/// one when the class has more than one member). Both splits therefore
/// preserve the class balance of `y`.
pub fn stratified_train_test_split(
    y: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(IntentError::ValidationError(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }
    if y.is_empty() {
        return Err(IntentError::ValidationError(
            "cannot split an empty label vector".to_string(),
        ));
    }

    let mut class_indices: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, &val) in y.iter().enumerate() {
        class_indices.entry(val.round() as i64).or_default().push(idx);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Deterministic iteration order over classes
    let mut classes: Vec<i64> = class_indices.keys().copied().collect();
    classes.sort_unstable();

    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for class in classes {
        let mut indices = class_indices.remove(&class).unwrap_or_default();
        indices.shuffle(&mut rng);

        let mut n_test = (indices.len() as f64 * test_size).round() as usize;
        if n_test == 0 && indices.len() > 1 {
            n_test = 1;
        }
        if n_test >= indices.len() {
            n_test = indices.len() - 1;
        }

        test_indices.extend_from_slice(&indices[..n_test]);
        train_indices.extend_from_slice(&indices[n_test..]);
    }

    if train_indices.is_empty() || test_indices.is_empty() {
        return Err(IntentError::ValidationError(format!(
            "split produced an empty side ({} train / {} test)",
            train_indices.len(),
            test_indices.len()
        )));
    }

    train_indices.sort_unstable();
    test_indices.sort_unstable();

    Ok(TrainTestSplit {
        train_indices,
        test_indices,
    })
}
