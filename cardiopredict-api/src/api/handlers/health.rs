use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

// Use the trait from domain layer
use cardiopredict_domain::health::{
    ArtifactHealthService, ComponentStatus as DomainComponentStatus, HealthServiceTrait,
    SystemStatus,
};
use cardiopredict_model::artifacts::ModelArtifacts;

/// Health check response with artifact load state
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Whether the classifier artifact is loaded
    pub model_loaded: bool,
    /// Whether the feature scaler artifact is loaded
    pub scaler_loaded: bool,
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let _ = SERVER_START_TIME.set(start_time);
    });
}

/// Service type for dependency injection
pub type HealthService = Arc<dyn HealthServiceTrait + Send + Sync>;

/// Factory function to create a health service over the loaded artifacts
pub fn create_health_service(artifacts: Arc<ModelArtifacts>) -> HealthService {
    Arc::new(ArtifactHealthService::new(artifacts))
}

/// Health check endpoint to verify the API and its model artifacts
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(health_service))]
pub async fn health_check(
    Extension(health_service): Extension<HealthService>,
) -> impl IntoResponse {
    info!("Health check requested");

    // Get the current timestamp
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    // Calculate uptime if server start time is available
    let uptime = SERVER_START_TIME
        .get()
        .map(|&start_time| now.saturating_sub(start_time));

    // Get system health from the service
    let system_health = health_service.get_system_health().await;

    // Map domain status to API status
    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let model_loaded = component_is_healthy(&system_health, "classifier");
    let scaler_loaded = component_is_healthy(&system_health, "scaler");

    // Build the response
    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        model_loaded,
        scaler_loaded,
    };

    // Return appropriate status code based on overall status
    match overall_status {
        "ok" => (StatusCode::OK, Json(response)),
        "degraded" => (StatusCode::SERVICE_UNAVAILABLE, Json(response)),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(response)),
    }
}

fn component_is_healthy(
    system_health: &cardiopredict_domain::health::SystemHealth,
    name: &str,
) -> bool {
    system_health
        .components
        .get(name)
        .map(|component| component.status == DomainComponentStatus::Healthy)
        .unwrap_or(false)
}
