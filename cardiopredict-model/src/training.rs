//! Offline training pipeline: split, scale, fit, evaluate.

use tracing::info;

use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::logistic::LogisticRegression;
use crate::metrics::{accuracy, precision, recall};
use crate::scaler::StandardScaler;

/// Held-out fraction of the dataset.
pub const TEST_RATIO: f64 = 0.2;

/// Seed for the stratified split, so runs are reproducible.
pub const SPLIT_SEED: u64 = 42;

/// Everything the training run produces.
pub struct TrainedArtifacts {
    pub model: LogisticRegression,
    pub scaler: StandardScaler,
    pub feature_names: Vec<String>,
    pub test_accuracy: f64,
}

/// Fit the scaler and classifier on the training fold and evaluate on the
/// held-out fold. The scaler is fitted on training data only.
pub fn train(dataset: &Dataset) -> Result<TrainedArtifacts, ModelError> {
    let (train_set, test_set) = dataset.train_test_split(TEST_RATIO, SPLIT_SEED);
    info!(
        train = train_set.n_samples(),
        test = test_set.n_samples(),
        features = dataset.n_features(),
        "dataset split"
    );

    let scaler = StandardScaler::fit(&train_set.x)?;
    let x_train = scaler.transform_matrix(&train_set.x)?;
    let x_test = scaler.transform_matrix(&test_set.x)?;

    let mut model = LogisticRegression::default();
    model.fit(&x_train, &train_set.y)?;

    let predictions = model.predict(&x_test)?;
    let test_accuracy = accuracy(&test_set.y, &predictions);
    info!(
        accuracy = test_accuracy,
        precision = precision(&test_set.y, &predictions),
        recall = recall(&test_set.y, &predictions),
        "held-out evaluation"
    );

    Ok(TrainedArtifacts {
        model,
        scaler,
        feature_names: dataset.feature_names.clone(),
        test_accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    // Two well-separated clusters, one per class.
    fn toy_dataset() -> Dataset {
        let n = 40;
        let mut x = Array2::<f64>::zeros((n, 2));
        let mut y = Array1::<f64>::zeros(n);
        for i in 0..n {
            let class = i % 2;
            let offset = if class == 1 { 10.0 } else { 0.0 };
            x[[i, 0]] = offset + (i % 5) as f64 * 0.1;
            x[[i, 1]] = offset + (i % 7) as f64 * 0.1;
            y[i] = class as f64;
        }
        Dataset {
            x,
            y,
            feature_names: vec!["f0".to_string(), "f1".to_string()],
        }
    }

    #[test]
    fn test_train_fits_separable_clusters() {
        let trained = train(&toy_dataset()).unwrap();
        assert!(trained.model.is_fitted());
        assert_eq!(trained.feature_names, vec!["f0", "f1"]);
        assert!(
            trained.test_accuracy > 0.9,
            "separable clusters should classify cleanly, got {}",
            trained.test_accuracy
        );
    }
}
