//! Risk assessment service: feature preparation, inference, stratification.

use std::sync::Arc;

use async_trait::async_trait;
use ndarray::Array1;
use thiserror::Error;
use tracing::error;

use cardiopredict_model::artifacts::ModelArtifacts;
use cardiopredict_model::error::ModelError;

use crate::entities::{PatientMetrics, RiskAssessment, RiskLevel};
use crate::services::factors::{derive_recommendations, derive_risk_factors};

/// Risk assessment service errors
#[derive(Debug, Error)]
pub enum RiskAssessmentError {
    /// Classifier artifact is not loaded
    #[error("Model not loaded. Please try again later.")]
    ServiceUnavailable,

    /// Unexpected failure during feature preparation or inference
    #[error("Prediction failed: {0}")]
    Internal(String),
}

/// Loaded-artifact report for the introspection endpoints.
#[derive(Debug, Clone)]
pub struct ModelStatus {
    pub classifier_loaded: bool,
    pub scaler_loaded: bool,
    /// Classifier type name, when loaded
    pub classifier_kind: Option<String>,
    /// Feature names in the order the classifier expects
    pub feature_names: Vec<String>,
}

/// Trait for risk assessment operations
#[async_trait]
pub trait RiskAssessmentServiceTrait {
    /// Run the full assessment pipeline for one patient.
    async fn assess(&self, metrics: PatientMetrics)
        -> Result<RiskAssessment, RiskAssessmentError>;

    /// Report which model artifacts are currently loaded.
    fn model_status(&self) -> ModelStatus;
}

/// Round to one decimal place, matching the training-time convention.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute BMI and assemble the feature vector the classifier expects.
///
/// The element order [gender, height, weight, ap_hi, ap_lo, cholesterol,
/// gluc, smoke, alco, active, age, bmi] is a contract with the trained
/// classifier; reordering silently corrupts predictions.
pub fn prepare_features(metrics: &PatientMetrics) -> (Array1<f64>, f64) {
    let height_m = f64::from(metrics.height) / 100.0;
    let bmi = round1(metrics.weight / (height_m * height_m));

    // Gender is 1/2 on the wire, 0/1 at training time.
    let gender = f64::from(metrics.gender.saturating_sub(1));

    let features = Array1::from_vec(vec![
        gender,
        f64::from(metrics.height),
        metrics.weight,
        f64::from(metrics.ap_hi),
        f64::from(metrics.ap_lo),
        f64::from(metrics.cholesterol),
        f64::from(metrics.gluc),
        f64::from(u8::from(metrics.smoke)),
        f64::from(u8::from(metrics.alco)),
        f64::from(u8::from(metrics.active)),
        f64::from(metrics.age),
        bmi,
    ]);

    (features, bmi)
}

/// Risk assessment service backed by the loaded model artifacts.
///
/// Artifacts are injected once at startup and shared read-only across
/// requests; the service holds no other state.
pub struct RiskAssessmentService {
    artifacts: Arc<ModelArtifacts>,
}

impl RiskAssessmentService {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }
}

#[async_trait]
impl RiskAssessmentServiceTrait for RiskAssessmentService {
    async fn assess(
        &self,
        metrics: PatientMetrics,
    ) -> Result<RiskAssessment, RiskAssessmentError> {
        let classifier = self
            .artifacts
            .classifier()
            .ok_or(RiskAssessmentError::ServiceUnavailable)?;

        let (raw_features, bmi) = prepare_features(&metrics);

        let features = match self.artifacts.scaler() {
            Some(scaler) => scaler.transform(raw_features.view()).map_err(internal)?,
            None => raw_features,
        };

        let prediction = classifier.predict(features.view()).map_err(internal)?;

        let risk_score = match classifier.predict_probability(features.view()) {
            Some(probabilities) => {
                let [_, positive] = probabilities.map_err(internal)?;
                round1(positive * 100.0)
            }
            // Classifier without probability output: coarse heuristic score.
            None => {
                if prediction == 1 {
                    75.0
                } else {
                    25.0
                }
            }
        };

        let risk_level = RiskLevel::from_score(risk_score);
        let risk_factors = derive_risk_factors(&metrics, bmi);
        let recommendations = derive_recommendations(&risk_factors);

        Ok(RiskAssessment {
            risk_score,
            risk_level,
            prediction,
            risk_factors,
            recommendations,
            bmi,
        })
    }

    fn model_status(&self) -> ModelStatus {
        ModelStatus {
            classifier_loaded: self.artifacts.classifier_loaded(),
            scaler_loaded: self.artifacts.scaler_loaded(),
            classifier_kind: self
                .artifacts
                .classifier()
                .map(|classifier| classifier.kind().to_string()),
            feature_names: self.artifacts.feature_names(),
        }
    }
}

fn internal(err: ModelError) -> RiskAssessmentError {
    error!("risk assessment failed: {err}");
    RiskAssessmentError::Internal(err.to_string())
}
