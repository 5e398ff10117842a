//! Feature standardization matching training-time preprocessing.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::artifacts::FeatureScaler;
use crate::error::ModelError;

/// Z-score scaler fitted on the training features.
///
/// Uses population statistics (ddof = 0). Zero-variance features map to
/// zero instead of dividing by a vanishing std.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

const STD_FLOOR: f64 = 1e-12;

impl StandardScaler {
    /// Build a scaler from known per-feature statistics.
    pub fn from_statistics(means: Array1<f64>, stds: Array1<f64>) -> Self {
        Self { means, stds }
    }

    /// Fit per-feature mean and standard deviation on a training matrix.
    pub fn fit(x: &Array2<f64>) -> Result<Self, ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyDataset);
        }

        let n = x.nrows() as f64;
        let means = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyDataset)?;

        let mut stds = Array1::<f64>::zeros(x.ncols());
        for (j, column) in x.columns().into_iter().enumerate() {
            let variance = column
                .iter()
                .map(|value| (value - means[j]).powi(2))
                .sum::<f64>()
                / n;
            stds[j] = variance.sqrt();
        }

        Ok(Self { means, stds })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    fn check_width(&self, got: usize) -> Result<(), ModelError> {
        if got != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                got,
            });
        }
        Ok(())
    }

    fn scale(&self, j: usize, value: f64) -> f64 {
        if self.stds[j] < STD_FLOOR {
            0.0
        } else {
            (value - self.means[j]) / self.stds[j]
        }
    }

    /// Standardize a single feature vector.
    pub fn transform(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>, ModelError> {
        self.check_width(features.len())?;
        Ok(features
            .iter()
            .enumerate()
            .map(|(j, &value)| self.scale(j, value))
            .collect())
    }

    /// Standardize every row of a feature matrix.
    pub fn transform_matrix(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        self.check_width(x.ncols())?;
        let mut scaled = x.clone();
        for (j, mut column) in scaled.columns_mut().into_iter().enumerate() {
            column.mapv_inplace(|value| self.scale(j, value));
        }
        Ok(scaled)
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>, ModelError> {
        StandardScaler::transform(self, features)
    }
}
