// Domain services
// This module contains business logic implementations.

pub mod factors;
pub mod risk;

// Re-export service traits and the concrete service
pub use risk::{
    prepare_features, ModelStatus, RiskAssessmentError, RiskAssessmentService,
    RiskAssessmentServiceTrait,
};
