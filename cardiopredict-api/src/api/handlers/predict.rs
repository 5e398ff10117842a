use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

// Import domain entities and services
use cardiopredict_domain::entities::{PatientMetrics, RiskAssessment};
use cardiopredict_domain::services::{
    RiskAssessmentError, RiskAssessmentService, RiskAssessmentServiceTrait,
};
use cardiopredict_model::artifacts::ModelArtifacts;

// Import our entities
use crate::entities::prediction::{ModelInfoResponse, PredictionRequest, PredictionResponse};

/// Error response format for API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
        }
    }

    /// Create a service unavailable error response
    pub fn service_unavailable(message: &str) -> Self {
        Self {
            error: "service_unavailable".to_string(),
            message: message.to_string(),
        }
    }

    /// Create an internal error response
    pub fn internal_error(message: &str) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Service type for dependency injection
pub type RiskService = Arc<dyn RiskAssessmentServiceTrait + Send + Sync>;

/// Create the service the handlers use
pub fn create_service(artifacts: Arc<ModelArtifacts>) -> RiskService {
    Arc::new(RiskAssessmentService::new(artifacts))
}

/// Predict cardiovascular disease risk from patient health metrics
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = PredictionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "Model not loaded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "prediction"
)]
#[instrument(skip(service, request))]
pub async fn predict(
    State(service): State<RiskService>,
    Json(request): Json<PredictionRequest>,
) -> Result<impl IntoResponse, Response> {
    if let Err(validation_errors) = request.validate() {
        let message = format_validation_errors(&validation_errors);
        warn!("Invalid prediction request: {message}");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation_error(&message)),
        )
            .into_response());
    }

    let metrics = convert_to_domain_metrics(&request);

    match service.assess(metrics).await {
        Ok(assessment) => {
            info!(
                risk_level = assessment.risk_level.as_str(),
                "Risk assessment produced"
            );
            Ok((StatusCode::OK, Json(convert_to_public_response(assessment))))
        }
        Err(RiskAssessmentError::ServiceUnavailable) => {
            warn!("Prediction requested while the classifier is not loaded");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::service_unavailable(
                    "Model not loaded. Please try again later.",
                )),
            )
                .into_response())
        }
        Err(RiskAssessmentError::Internal(message)) => {
            error!("Risk assessment failed: {message}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(&format!(
                    "Prediction failed: {message}"
                ))),
            )
                .into_response())
        }
    }
}

/// Get information about the loaded model
#[utoipa::path(
    get,
    path = "/model-info",
    responses(
        (status = 200, description = "Model information", body = ModelInfoResponse),
    ),
    tag = "prediction"
)]
#[instrument(skip(service))]
pub async fn model_info(State(service): State<RiskService>) -> impl IntoResponse {
    let status = service.model_status();

    Json(ModelInfoResponse {
        loaded: status.classifier_loaded,
        model_type: status.classifier_kind,
        scaler_loaded: status.scaler_loaded,
        features: status.feature_names,
        target: "cardio (0=No CVD, 1=CVD)".to_string(),
    })
}

/// Join validator errors into one human-readable message
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}

// Convert public request to domain metrics
fn convert_to_domain_metrics(request: &PredictionRequest) -> PatientMetrics {
    PatientMetrics {
        age: request.age,
        gender: request.gender,
        height: request.height,
        weight: request.weight,
        ap_hi: request.ap_hi,
        ap_lo: request.ap_lo,
        cholesterol: request.cholesterol,
        gluc: request.gluc,
        smoke: request.smoke == 1,
        alco: request.alco == 1,
        active: request.active == 1,
    }
}

// Convert domain assessment to the public response
fn convert_to_public_response(assessment: RiskAssessment) -> PredictionResponse {
    PredictionResponse {
        success: true,
        risk_score: assessment.risk_score,
        risk_level: assessment.risk_level.as_str().to_string(),
        prediction: assessment.prediction,
        risk_factors: assessment.risk_factors,
        recommendations: assessment.recommendations,
        bmi: assessment.bmi,
        message: assessment.risk_level.message().to_string(),
    }
}
