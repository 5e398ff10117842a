use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Prediction endpoints
        crate::api::handlers::predict::predict,
        crate::api::handlers::predict::model_info,
    ),
    components(
        schemas(
            // Entities
            crate::entities::prediction::PredictionRequest,
            crate::entities::prediction::PredictionResponse,
            crate::entities::prediction::ModelInfoResponse,

            // Handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::predict::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "prediction", description = "Cardiovascular risk prediction endpoints")
    ),
    info(
        title = "CardioPredict API",
        version = "0.1.0",
        description = "AI-powered cardiovascular disease risk prediction API",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
