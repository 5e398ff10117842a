pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;

use cardiopredict_model::artifacts::ModelArtifacts;

/// Create the application router over the loaded model artifacts
pub fn create_application(artifacts: Arc<ModelArtifacts>) -> Router {
    routes::create_app(artifacts)
}
