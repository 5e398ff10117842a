use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use cardiopredict_model::artifacts::ModelArtifacts;

use crate::api::handlers::{health, predict};

/// Create the application router
pub fn create_app(artifacts: Arc<ModelArtifacts>) -> Router {
    debug!("Creating application router");

    // Create services using factory functions
    let risk_service = predict::create_service(artifacts.clone());
    let health_service = health::create_health_service(artifacts);

    // The browser frontend runs on a different origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .route("/predict", post(predict::predict))
        .route("/model-info", get(predict::model_info))
        .layer(Extension(health_service))
        .with_state(risk_service)
        .layer(cors);

    debug!("Routes configured");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = crate::openapi::configure_swagger_routes();

    app.merge(swagger)
}
