// CardioPredict model layer
// Trained-model artifacts consumed by the risk assessment pipeline.

// Artifact bundle and the classifier/scaler trait seams
pub mod artifacts;

// Training dataset loading and cleaning
pub mod dataset;

// Error types for the model layer
pub mod error;

// Logistic regression classifier
pub mod logistic;

// Evaluation metrics
pub mod metrics;

// Feature standardization
pub mod scaler;

// Offline training pipeline
pub mod training;

// Re-export the types the other crates work with
pub use artifacts::{Classifier, FeatureScaler, ModelArtifacts, DEFAULT_FEATURE_NAMES};
pub use error::ModelError;
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;
