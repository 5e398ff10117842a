//! Model artifacts loaded once at process start and shared read-only.
//!
//! Each artifact loads independently: a missing scaler or feature-name
//! list degrades gracefully, a missing classifier leaves the bundle
//! unable to serve predictions and the caller decides what that means.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::{Array1, ArrayView1};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ModelError;
use crate::logistic::LogisticRegression;
use crate::scaler::StandardScaler;

/// Canonical feature order the classifier was trained on.
pub const DEFAULT_FEATURE_NAMES: [&str; 12] = [
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "age_years",
    "bmi",
];

pub const MODEL_FILE: &str = "cardio_model.json";
pub const SCALER_FILE: &str = "cardio_scaler.json";
pub const FEATURES_FILE: &str = "feature_names.json";

/// A trained binary classifier.
pub trait Classifier: Send + Sync {
    /// Predicted class, 0 or 1.
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<u8, ModelError>;

    /// Class probabilities `[p0, p1]`, or `None` when the classifier does
    /// not support probability output.
    fn predict_probability(
        &self,
        features: ArrayView1<'_, f64>,
    ) -> Option<Result<[f64; 2], ModelError>>;

    /// Classifier type name, for introspection.
    fn kind(&self) -> &'static str;
}

/// A fitted feature transform applied before inference.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>, ModelError>;
}

/// The artifact bundle the prediction pipeline runs against.
pub struct ModelArtifacts {
    classifier: Option<Box<dyn Classifier>>,
    scaler: Option<Box<dyn FeatureScaler>>,
    feature_names: Option<Vec<String>>,
}

impl ModelArtifacts {
    pub fn new(
        classifier: Option<Box<dyn Classifier>>,
        scaler: Option<Box<dyn FeatureScaler>>,
        feature_names: Option<Vec<String>>,
    ) -> Self {
        Self {
            classifier,
            scaler,
            feature_names,
        }
    }

    /// Bundle with nothing loaded; predictions are unavailable.
    pub fn empty() -> Self {
        Self::new(None, None, None)
    }

    /// Load whatever artifacts exist in `dir`.
    ///
    /// Never fails: each artifact that cannot be read is logged and left
    /// absent, mirroring the degraded-start behavior of the server.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        let classifier = match read_json::<LogisticRegression>(&dir.join(MODEL_FILE)) {
            Ok(model) => {
                info!("Model loaded from {}", dir.join(MODEL_FILE).display());
                Some(Box::new(model) as Box<dyn Classifier>)
            }
            Err(e) => {
                error!("Error loading model: {e}");
                None
            }
        };

        let scaler = match read_json::<StandardScaler>(&dir.join(SCALER_FILE)) {
            Ok(scaler) => {
                info!("Scaler loaded from {}", dir.join(SCALER_FILE).display());
                Some(Box::new(scaler) as Box<dyn FeatureScaler>)
            }
            Err(e) => {
                warn!("Scaler not found, predictions may be less accurate: {e}");
                None
            }
        };

        let feature_names = match read_json::<Vec<String>>(&dir.join(FEATURES_FILE)) {
            Ok(names) => {
                info!("Feature names loaded: {names:?}");
                Some(names)
            }
            Err(e) => {
                warn!("Feature names not found: {e}");
                None
            }
        };

        Self {
            classifier,
            scaler,
            feature_names,
        }
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn scaler(&self) -> Option<&dyn FeatureScaler> {
        self.scaler.as_deref()
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }

    /// Feature names in classifier order, falling back to the canonical
    /// list when the artifact is absent.
    pub fn feature_names(&self) -> Vec<String> {
        match &self.feature_names {
            Some(names) => names.clone(),
            None => DEFAULT_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Write a trained model, scaler and feature names to `dir`.
pub fn save_artifacts(
    dir: impl AsRef<Path>,
    model: &LogisticRegression,
    scaler: &StandardScaler,
    feature_names: &[String],
) -> Result<(), ModelError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    write_json(&dir.join(MODEL_FILE), model)?;
    write_json(&dir.join(SCALER_FILE), scaler)?;
    write_json(&dir.join(FEATURES_FILE), &feature_names)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ModelError> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn temp_artifact_dir(label: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cardiopredict-artifacts-{label}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_artifact_dir("round-trip");

        let model = LogisticRegression::from_parameters(array![0.5, -0.25], 0.1);
        let scaler = StandardScaler::from_statistics(array![1.0, 2.0], array![3.0, 4.0]);
        let names = vec!["a".to_string(), "b".to_string()];
        save_artifacts(&dir, &model, &scaler, &names).unwrap();

        let artifacts = ModelArtifacts::load(&dir);
        assert!(artifacts.classifier_loaded());
        assert!(artifacts.scaler_loaded());
        assert_eq!(artifacts.feature_names(), names);

        let features = array![1.0, 2.0];
        let original = model.probability_one(features.view()).unwrap();
        let loaded = artifacts
            .classifier()
            .unwrap()
            .predict_probability(features.view())
            .unwrap()
            .unwrap();
        assert!((original[1] - loaded[1]).abs() < 1e-15);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_missing_dir_degrades() {
        let artifacts = ModelArtifacts::load(temp_artifact_dir("missing"));
        assert!(!artifacts.classifier_loaded());
        assert!(!artifacts.scaler_loaded());
    }

    #[test]
    fn test_feature_names_fall_back_to_canonical_order() {
        let artifacts = ModelArtifacts::empty();
        let names = artifacts.feature_names();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "gender");
        assert_eq!(names[10], "age_years");
        assert_eq!(names[11], "bmi");
    }
}
