use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for a cardiovascular risk prediction
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PredictionRequest {
    /// Age in years
    #[validate(range(min = 18, max = 100, message = "Age must be between 18 and 100"))]
    pub age: u32,

    /// Gender: 1 = female, 2 = male
    #[validate(range(min = 1, max = 2, message = "Gender must be 1 (female) or 2 (male)"))]
    pub gender: u8,

    /// Height in cm
    #[validate(range(min = 100, max = 250, message = "Height must be between 100 and 250 cm"))]
    pub height: u16,

    /// Weight in kg
    #[validate(range(min = 30.0, max = 300.0, message = "Weight must be between 30 and 300 kg"))]
    pub weight: f64,

    /// Systolic blood pressure (mmHg)
    #[validate(range(
        min = 50,
        max = 250,
        message = "Systolic pressure must be between 50 and 250 mmHg"
    ))]
    pub ap_hi: i32,

    /// Diastolic blood pressure (mmHg)
    #[validate(range(
        min = 30,
        max = 200,
        message = "Diastolic pressure must be between 30 and 200 mmHg"
    ))]
    pub ap_lo: i32,

    /// Cholesterol: 1 = normal, 2 = above normal, 3 = well above normal
    #[validate(range(min = 1, max = 3, message = "Cholesterol must be 1, 2 or 3"))]
    pub cholesterol: u8,

    /// Glucose: 1 = normal, 2 = above normal, 3 = well above normal
    #[validate(range(min = 1, max = 3, message = "Glucose must be 1, 2 or 3"))]
    pub gluc: u8,

    /// Smoking: 0 = no, 1 = yes
    #[validate(range(min = 0, max = 1, message = "Smoke must be 0 or 1"))]
    pub smoke: u8,

    /// Alcohol intake: 0 = no, 1 = yes
    #[validate(range(min = 0, max = 1, message = "Alco must be 0 or 1"))]
    pub alco: u8,

    /// Physical activity: 0 = no, 1 = yes
    #[validate(range(min = 0, max = 1, message = "Active must be 0 or 1"))]
    pub active: u8,
}

/// Response from the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub success: bool,

    /// Percentage probability of cardiovascular disease (0-100)
    pub risk_score: f64,

    /// One of "low", "moderate", "high"
    pub risk_level: String,

    /// 0 = no CVD predicted, 1 = CVD predicted
    pub prediction: u8,

    /// Triggered risk factors, in fixed evaluation order
    pub risk_factors: Vec<String>,

    /// At most six unique recommendations
    pub recommendations: Vec<String>,

    /// Body mass index
    pub bmi: f64,

    /// Advisory message tied to the risk level
    pub message: String,
}

/// Model introspection payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfoResponse {
    /// Whether a classifier artifact is loaded
    pub loaded: bool,

    /// Classifier type name, when loaded
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    /// Whether a feature scaler artifact is loaded
    pub scaler_loaded: bool,

    /// Feature names in the order the classifier expects
    pub features: Vec<String>,

    /// Description of the prediction target
    pub target: String,
}
