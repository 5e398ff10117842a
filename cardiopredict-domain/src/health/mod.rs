//! Domain layer health check functionality
//! Reports whether the model artifacts required for inference are loaded.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use cardiopredict_model::artifacts::ModelArtifacts;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced quality
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Health service reporting on the loaded model artifacts.
///
/// A missing classifier means predictions cannot be served at all; a
/// missing scaler only degrades them.
pub struct ArtifactHealthService {
    artifacts: Arc<ModelArtifacts>,
}

impl ArtifactHealthService {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }
}

#[async_trait]
impl HealthServiceTrait for ArtifactHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        let classifier_status = if self.artifacts.classifier_loaded() {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        };
        components.insert(
            "classifier".to_string(),
            HealthComponent {
                status: classifier_status.clone(),
                details: match classifier_status {
                    ComponentStatus::Healthy => None,
                    _ => Some(
                        "Classifier artifact is not loaded; predictions are unavailable"
                            .to_string(),
                    ),
                },
            },
        );

        let scaler_status = if self.artifacts.scaler_loaded() {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Degraded
        };
        components.insert(
            "scaler".to_string(),
            HealthComponent {
                status: scaler_status.clone(),
                details: match scaler_status {
                    ComponentStatus::Healthy => None,
                    _ => Some(
                        "Scaler artifact is not loaded; predictions may be less accurate"
                            .to_string(),
                    ),
                },
            },
        );

        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }
}
