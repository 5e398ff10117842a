// Domain entities and value objects
pub mod assessment;

// Re-export common types for easier imports
pub use assessment::{PatientMetrics, RiskAssessment, RiskLevel};
