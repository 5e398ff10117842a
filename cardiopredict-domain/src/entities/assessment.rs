//! Patient metrics and risk assessment results.

/// Validated patient health metrics.
///
/// Range validation happens at the HTTP boundary; values reaching the
/// domain layer are assumed in range.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientMetrics {
    /// Age in years
    pub age: u32,
    /// 1 = female, 2 = male (dataset encoding)
    pub gender: u8,
    /// Height in cm
    pub height: u16,
    /// Weight in kg
    pub weight: f64,
    /// Systolic blood pressure in mmHg
    pub ap_hi: i32,
    /// Diastolic blood pressure in mmHg
    pub ap_lo: i32,
    /// 1 = normal, 2 = above normal, 3 = well above normal
    pub cholesterol: u8,
    /// 1 = normal, 2 = above normal, 3 = well above normal
    pub gluc: u8,
    pub smoke: bool,
    pub alco: bool,
    pub active: bool,
}

/// Coarse risk bucket derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Stratify a 0-100 risk score. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 60.0 {
            RiskLevel::High
        } else if score >= 35.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Advisory message shown alongside the assessment.
    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::High => "Your results indicate a higher risk of cardiovascular disease. We strongly recommend consulting with a healthcare professional for a comprehensive evaluation.",
            RiskLevel::Moderate => "Your results show a moderate cardiovascular risk. Consider lifestyle improvements and regular health check-ups.",
            RiskLevel::Low => "Great news! Your results indicate a lower risk of cardiovascular disease. Keep maintaining your healthy lifestyle!",
        }
    }
}

/// Completed risk assessment for one set of patient metrics.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    /// Percentage probability of cardiovascular disease, one decimal place
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// 0 = no CVD predicted, 1 = CVD predicted
    pub prediction: u8,
    /// Triggered risk factors, in fixed evaluation order
    pub risk_factors: Vec<String>,
    /// Deduplicated, at most six entries
    pub recommendations: Vec<String>,
    /// Body mass index, one decimal place
    pub bmi: f64,
}
