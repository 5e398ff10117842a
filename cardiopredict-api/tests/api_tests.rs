use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use ndarray::Array1;
use serde_json::{json, Value};
use std::sync::Once;
use tower::ServiceExt;

use cardiopredict_api::api::create_application;
use cardiopredict_model::artifacts::ModelArtifacts;
use cardiopredict_model::{LogisticRegression, StandardScaler};

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Artifacts whose classifier always reports a 20% positive-class
/// probability: zero weights and an ln(0.25) intercept, behind an
/// identity scaler.
fn loaded_artifacts() -> Arc<ModelArtifacts> {
    let classifier = LogisticRegression::from_parameters(Array1::zeros(12), (0.25f64).ln());
    let scaler = StandardScaler::from_statistics(Array1::zeros(12), Array1::ones(12));
    let feature_names = vec![
        "gender",
        "height",
        "weight",
        "ap_hi",
        "ap_lo",
        "cholesterol",
        "gluc",
        "smoke",
        "alco",
        "active",
        "age_years",
        "bmi",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    Arc::new(ModelArtifacts::new(
        Some(Box::new(classifier)),
        Some(Box::new(scaler)),
        Some(feature_names),
    ))
}

fn test_app() -> Router {
    initialize();
    create_application(loaded_artifacts())
}

fn sample_payload() -> Value {
    json!({
        "age": 45,
        "gender": 2,
        "height": 170,
        "weight": 75.0,
        "ap_hi": 120,
        "ap_lo": 80,
        "cholesterol": 1,
        "gluc": 1,
        "smoke": 0,
        "alco": 0,
        "active": 1
    })
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("Failed to build request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}

#[tokio::test]
async fn test_predict_returns_full_assessment() {
    let response = test_app()
        .oneshot(post_json("/predict", &sample_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["risk_score"], json!(20.0));
    assert_eq!(body["risk_level"], json!("low"));
    assert_eq!(body["prediction"], json!(0));
    assert_eq!(body["bmi"], json!(26.0));
    assert_eq!(body["risk_factors"], json!(["Overweight (BMI: 26.0)"]));
    assert_eq!(
        body["recommendations"],
        json!([
            "Schedule regular health check-ups with your doctor",
            "Monitor your blood pressure regularly",
            "Work towards a healthy weight through diet and exercise",
        ])
    );
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Great news!"));
}

#[tokio::test]
async fn test_predict_rejects_out_of_range_age() {
    let mut payload = sample_payload();
    payload["age"] = json!(17);

    let response = test_app()
        .oneshot(post_json("/predict", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("validation_error"));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Age must be between 18 and 100"));
}

#[tokio::test]
async fn test_predict_without_model_is_service_unavailable() {
    initialize();
    let app = create_application(Arc::new(ModelArtifacts::empty()));

    let response = app
        .oneshot(post_json("/predict", &sample_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("service_unavailable"));
}

#[tokio::test]
async fn test_health_reports_loaded_artifacts() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["model_loaded"], json!(true));
    assert_eq!(body["scaler_loaded"], json!(true));
}

#[tokio::test]
async fn test_root_serves_health_check_too() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_degrades_without_scaler() {
    initialize();
    let classifier = LogisticRegression::from_parameters(Array1::zeros(12), 0.0);
    let artifacts = Arc::new(ModelArtifacts::new(Some(Box::new(classifier)), None, None));
    let app = create_application(artifacts);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("degraded"));
    assert_eq!(body["model_loaded"], json!(true));
    assert_eq!(body["scaler_loaded"], json!(false));
}

#[tokio::test]
async fn test_model_info_lists_feature_order() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/model-info")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["loaded"], json!(true));
    assert_eq!(body["type"], json!("LogisticRegression"));
    assert_eq!(body["scaler_loaded"], json!(true));
    assert_eq!(body["target"], json!("cardio (0=No CVD, 1=CVD)"));
    assert_eq!(
        body["features"],
        json!([
            "gender", "height", "weight", "ap_hi", "ap_lo", "cholesterol", "gluc", "smoke",
            "alco", "active", "age_years", "bmi"
        ])
    );
}
