//! Risk factor identification and lifestyle recommendations.
//!
//! Recommendation matching is keyword-based over the factor text; the
//! rule table keeps the keyword set in one place because the factor
//! strings and the keywords have to stay in sync.

use std::collections::HashSet;

use crate::entities::PatientMetrics;

/// General recommendations included in every assessment.
const GENERAL_RECOMMENDATIONS: [&str; 2] = [
    "Schedule regular health check-ups with your doctor",
    "Monitor your blood pressure regularly",
];

/// Maximum number of recommendations returned to the caller.
const MAX_RECOMMENDATIONS: usize = 6;

/// Advice keyed by case-insensitive keywords found in risk factor text.
struct RecommendationRule {
    keywords: &'static [&'static str],
    advice: &'static str,
}

const RECOMMENDATION_RULES: [RecommendationRule; 7] = [
    RecommendationRule {
        keywords: &["blood pressure"],
        advice: "Reduce sodium intake and follow a heart-healthy diet (DASH diet)",
    },
    RecommendationRule {
        keywords: &["cholesterol"],
        advice: "Limit saturated fats and increase fiber intake",
    },
    RecommendationRule {
        keywords: &["glucose"],
        advice: "Monitor blood sugar levels and limit sugar intake",
    },
    RecommendationRule {
        keywords: &["bmi", "obesity", "overweight"],
        advice: "Work towards a healthy weight through diet and exercise",
    },
    RecommendationRule {
        keywords: &["smoking"],
        advice: "Consider smoking cessation programs",
    },
    RecommendationRule {
        keywords: &["alcohol"],
        advice: "Limit alcohol consumption",
    },
    RecommendationRule {
        keywords: &["inactivity"],
        advice: "Aim for at least 150 minutes of moderate exercise per week",
    },
];

/// Identify risk factors from patient metrics and the computed BMI.
///
/// Field order is fixed and tiers within a field are mutually exclusive:
/// the higher threshold is checked first and wins.
pub fn derive_risk_factors(metrics: &PatientMetrics, bmi: f64) -> Vec<String> {
    let mut factors = Vec::new();

    if metrics.age > 55 {
        factors.push("Age above 55 years".to_string());
    } else if metrics.age > 45 {
        factors.push("Age above 45 years".to_string());
    }

    if metrics.ap_hi > 140 {
        factors.push("High systolic blood pressure (>140 mmHg)".to_string());
    } else if metrics.ap_hi > 130 {
        factors.push("Elevated systolic blood pressure (>130 mmHg)".to_string());
    }

    if metrics.ap_lo > 90 {
        factors.push("High diastolic blood pressure (>90 mmHg)".to_string());
    } else if metrics.ap_lo > 85 {
        factors.push("Elevated diastolic blood pressure (>85 mmHg)".to_string());
    }

    if metrics.cholesterol == 3 {
        factors.push("High cholesterol level".to_string());
    } else if metrics.cholesterol == 2 {
        factors.push("Above normal cholesterol level".to_string());
    }

    if metrics.gluc == 3 {
        factors.push("High glucose level".to_string());
    } else if metrics.gluc == 2 {
        factors.push("Above normal glucose level".to_string());
    }

    if bmi > 30.0 {
        factors.push(format!("Obesity (BMI: {bmi:.1})"));
    } else if bmi > 25.0 {
        factors.push(format!("Overweight (BMI: {bmi:.1})"));
    }

    if metrics.smoke {
        factors.push("Smoking".to_string());
    }

    if metrics.alco {
        factors.push("Regular alcohol consumption".to_string());
    }

    if !metrics.active {
        factors.push("Physical inactivity".to_string());
    }

    factors
}

/// Build the recommendation list for a set of risk factors.
///
/// Always seeded with the general recommendations; factor-specific
/// advice is appended in factor order, deduplicated preserving first
/// occurrence, and capped at six entries.
pub fn derive_recommendations(risk_factors: &[String]) -> Vec<String> {
    let mut recommendations: Vec<&str> = GENERAL_RECOMMENDATIONS.to_vec();

    for factor in risk_factors {
        let lowered = factor.to_lowercase();
        for rule in &RECOMMENDATION_RULES {
            if rule.keywords.iter().any(|keyword| lowered.contains(keyword)) {
                recommendations.push(rule.advice);
            }
        }
    }

    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|advice| seen.insert(*advice))
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_metrics() -> PatientMetrics {
        PatientMetrics {
            age: 30,
            gender: 1,
            height: 170,
            weight: 60.0,
            ap_hi: 110,
            ap_lo: 70,
            cholesterol: 1,
            gluc: 1,
            smoke: false,
            alco: false,
            active: true,
        }
    }

    #[test]
    fn test_healthy_metrics_trigger_no_factors() {
        let factors = derive_risk_factors(&baseline_metrics(), 20.8);
        assert!(factors.is_empty());
    }

    #[test]
    fn test_age_tiers_are_mutually_exclusive() {
        let mut metrics = baseline_metrics();
        metrics.age = 60;
        let factors = derive_risk_factors(&metrics, 20.8);
        assert_eq!(factors, vec!["Age above 55 years"]);

        metrics.age = 50;
        let factors = derive_risk_factors(&metrics, 20.8);
        assert_eq!(factors, vec!["Age above 45 years"]);

        metrics.age = 45;
        assert!(derive_risk_factors(&metrics, 20.8).is_empty());
    }

    #[test]
    fn test_blood_pressure_tiers() {
        let mut metrics = baseline_metrics();
        metrics.ap_hi = 150;
        metrics.ap_lo = 95;
        let factors = derive_risk_factors(&metrics, 20.8);
        assert_eq!(
            factors,
            vec![
                "High systolic blood pressure (>140 mmHg)",
                "High diastolic blood pressure (>90 mmHg)",
            ]
        );

        metrics.ap_hi = 135;
        metrics.ap_lo = 88;
        let factors = derive_risk_factors(&metrics, 20.8);
        assert_eq!(
            factors,
            vec![
                "Elevated systolic blood pressure (>130 mmHg)",
                "Elevated diastolic blood pressure (>85 mmHg)",
            ]
        );
    }

    #[test]
    fn test_bmi_factor_interpolates_rounded_value() {
        let factors = derive_risk_factors(&baseline_metrics(), 31.2);
        assert_eq!(factors, vec!["Obesity (BMI: 31.2)"]);

        let factors = derive_risk_factors(&baseline_metrics(), 26.0);
        assert_eq!(factors, vec!["Overweight (BMI: 26.0)"]);
    }

    #[test]
    fn test_lifestyle_factors_in_fixed_order() {
        let mut metrics = baseline_metrics();
        metrics.smoke = true;
        metrics.alco = true;
        metrics.active = false;
        let factors = derive_risk_factors(&metrics, 20.8);
        assert_eq!(
            factors,
            vec!["Smoking", "Regular alcohol consumption", "Physical inactivity"]
        );
    }

    #[test]
    fn test_recommendations_always_seed_general_advice() {
        let recommendations = derive_recommendations(&[]);
        assert_eq!(
            recommendations,
            vec![
                "Schedule regular health check-ups with your doctor",
                "Monitor your blood pressure regularly",
            ]
        );
    }

    #[test]
    fn test_recommendations_deduplicate_repeated_categories() {
        // Both blood pressure factors map to the same advice.
        let factors = vec![
            "High systolic blood pressure (>140 mmHg)".to_string(),
            "High diastolic blood pressure (>90 mmHg)".to_string(),
        ];
        let recommendations = derive_recommendations(&factors);
        assert_eq!(recommendations.len(), 3);
        assert_eq!(
            recommendations[2],
            "Reduce sodium intake and follow a heart-healthy diet (DASH diet)"
        );
    }

    #[test]
    fn test_recommendations_are_capped_at_six() {
        let factors = vec![
            "High systolic blood pressure (>140 mmHg)".to_string(),
            "High cholesterol level".to_string(),
            "High glucose level".to_string(),
            "Obesity (BMI: 32.5)".to_string(),
            "Smoking".to_string(),
            "Regular alcohol consumption".to_string(),
            "Physical inactivity".to_string(),
        ];
        let recommendations = derive_recommendations(&factors);
        assert_eq!(recommendations.len(), 6);

        let unique: HashSet<&String> = recommendations.iter().collect();
        assert_eq!(unique.len(), recommendations.len());

        // Capped in first-seen order: the tail categories fall off.
        assert_eq!(
            recommendations[5],
            "Work towards a healthy weight through diet and exercise"
        );
    }

    #[test]
    fn test_overweight_factor_matches_weight_advice() {
        let factors = vec!["Overweight (BMI: 26.0)".to_string()];
        let recommendations = derive_recommendations(&factors);
        assert_eq!(recommendations.len(), 3);
        assert_eq!(
            recommendations[2],
            "Work towards a healthy weight through diet and exercise"
        );
    }
}
