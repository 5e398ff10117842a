//! Logistic regression for binary classification.
//!
//! This is the same model family the offline training script fits: batch
//! gradient descent on log loss over standardized features.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifacts::Classifier;
use crate::error::ModelError;

/// Logistic regression binary classifier.
///
/// Unfitted until [`LogisticRegression::fit`] succeeds or the model is
/// built with [`LogisticRegression::from_parameters`] / deserialized from
/// a trained artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Fitted coefficients, one per feature
    coefficients: Option<Array1<f64>>,
    /// Intercept term
    intercept: Option<f64>,
    /// Gradient descent learning rate
    learning_rate: f64,
    /// Maximum training iterations
    max_iter: usize,
    /// Convergence tolerance on the change in log loss
    tolerance: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(0.1, 1000, 1e-6)
    }
}

impl LogisticRegression {
    /// Create an unfitted model with the given hyperparameters.
    pub fn new(learning_rate: f64, max_iter: usize, tolerance: f64) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            learning_rate,
            max_iter,
            tolerance,
        }
    }

    /// Build a fitted model from known parameters.
    pub fn from_parameters(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients: Some(coefficients),
            intercept: Some(intercept),
            ..Self::default()
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some() && self.intercept.is_some()
    }

    pub fn n_features(&self) -> Option<usize> {
        self.coefficients.as_ref().map(Array1::len)
    }

    /// Fit with batch gradient descent on log loss.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }

        let n_samples = x.nrows() as f64;
        let mut weights = Array1::<f64>::zeros(x.ncols());
        let mut bias = 0.0;
        let mut previous_cost = f64::INFINITY;

        for iteration in 0..self.max_iter {
            let linear = x.dot(&weights) + bias;
            let predictions = linear.mapv(sigmoid);

            let errors = &predictions - y;
            let gradient = x.t().dot(&errors) / n_samples;
            let bias_gradient = errors.sum() / n_samples;

            weights = &weights - &(gradient * self.learning_rate);
            bias -= self.learning_rate * bias_gradient;

            let cost = log_loss(y, &predictions);
            if (previous_cost - cost).abs() < self.tolerance {
                debug!(iteration, cost, "gradient descent converged");
                break;
            }
            previous_cost = cost;
        }

        self.coefficients = Some(weights);
        self.intercept = Some(bias);
        Ok(())
    }

    fn parameters(&self) -> Result<(&Array1<f64>, f64), ModelError> {
        let coefficients = self.coefficients.as_ref().ok_or(ModelError::NotFitted)?;
        let intercept = self.intercept.ok_or(ModelError::NotFitted)?;
        Ok((coefficients, intercept))
    }

    /// Class probabilities `[p0, p1]` for a single feature vector.
    pub fn probability_one(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2], ModelError> {
        let (coefficients, intercept) = self.parameters()?;
        if features.len() != coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: coefficients.len(),
                got: features.len(),
            });
        }

        let positive = sigmoid(features.dot(coefficients) + intercept);
        Ok([1.0 - positive, positive])
    }

    /// Predicted class (0 or 1) for a single feature vector, threshold 0.5.
    pub fn predict_one(&self, features: ArrayView1<'_, f64>) -> Result<u8, ModelError> {
        let [_, positive] = self.probability_one(features)?;
        Ok(u8::from(positive >= 0.5))
    }

    /// Predicted classes for a feature matrix.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let (coefficients, intercept) = self.parameters()?;
        if x.ncols() != coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: coefficients.len(),
                got: x.ncols(),
            });
        }

        let linear = x.dot(coefficients) + intercept;
        Ok(linear.mapv(|z| if sigmoid(z) >= 0.5 { 1.0 } else { 0.0 }))
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<u8, ModelError> {
        self.predict_one(features)
    }

    fn predict_probability(
        &self,
        features: ArrayView1<'_, f64>,
    ) -> Option<Result<[f64; 2], ModelError>> {
        Some(self.probability_one(features))
    }

    fn kind(&self) -> &'static str {
        "LogisticRegression"
    }
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

/// Binary cross-entropy with clipped probabilities.
fn log_loss(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let eps = 1e-15;
    let n = y_true.len() as f64;

    -y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&y, &p)| {
            let p = p.clamp(eps, 1.0 - eps);
            y * p.ln() + (1.0 - y) * (1.0 - p).ln()
        })
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10);
        assert!(sigmoid(100.0) > 0.99);
        assert!(sigmoid(-100.0) < 0.01);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_fit_separable_data() {
        let x = array![
            [0.0, 0.0],
            [0.5, 0.5],
            [1.0, 1.0],
            [5.0, 5.0],
            [5.5, 5.5],
            [6.0, 6.0]
        ];
        let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];

        let mut model = LogisticRegression::new(0.5, 2000, 1e-8);
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());

        let predictions = model.predict(&x).unwrap();
        let hits = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| (**p - **t).abs() < 0.5)
            .count();
        assert!(hits >= 5, "expected most points classified, got {hits}");
    }

    #[test]
    fn test_unfitted_model_errors() {
        let model = LogisticRegression::default();
        let features = array![1.0, 2.0];
        assert!(matches!(
            model.predict_one(features.view()),
            Err(ModelError::NotFitted)
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = LogisticRegression::from_parameters(array![0.1, 0.2, 0.3], 0.0);
        let features = array![1.0, 2.0];
        assert!(matches!(
            model.probability_one(features.view()),
            Err(ModelError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_from_parameters_probability() {
        // Zero weights: probability is sigmoid(intercept) regardless of input.
        let model = LogisticRegression::from_parameters(Array1::zeros(3), (0.25f64).ln());
        let [p0, p1] = model.probability_one(array![4.0, 5.0, 6.0].view()).unwrap();
        assert!((p1 - 0.2).abs() < 1e-12);
        assert!((p0 - 0.8).abs() < 1e-12);
        assert_eq!(model.predict_one(array![0.0, 0.0, 0.0].view()).unwrap(), 0);
    }

    #[test]
    fn test_classifier_trait_reports_probability_support() {
        let model = LogisticRegression::from_parameters(Array1::zeros(2), 0.0);
        let classifier: &dyn Classifier = &model;
        assert_eq!(classifier.kind(), "LogisticRegression");
        let probabilities = classifier
            .predict_probability(array![1.0, 1.0].view())
            .expect("logistic regression supports probabilities")
            .unwrap();
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
    }
}
