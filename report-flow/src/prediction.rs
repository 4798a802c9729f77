use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::collaborators::PredictionService;
use crate::error::{FlowError, Result};
use crate::models::{DiseasePrediction, PredictedDisease, PredictionInputs, SupportingEvidence};

/// Badge tier for the overall risk category. Mapping contract, applied to
/// the collaborator's free-text category in this order: contains
/// `"Critical"` -> red, contains `"At Risk"` -> orange, anything else ->
/// green. This is deliberately a substring match, not an enum handshake
/// with the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Red,
    Orange,
    Green,
}

impl RiskTier {
    pub fn from_category(category: &str) -> Self {
        if category.contains("Critical") {
            RiskTier::Red
        } else if category.contains("At Risk") {
            RiskTier::Orange
        } else {
            RiskTier::Green
        }
    }
}

/// Badge tier for a single condition's confidence label: `"High"` -> red,
/// `"Medium"` -> yellow, anything else -> blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Red,
    Yellow,
    Blue,
}

impl ConfidenceTier {
    pub fn from_label(label: &str) -> Self {
        match label {
            "High" => ConfidenceTier::Red,
            "Medium" => ConfidenceTier::Yellow,
            _ => ConfidenceTier::Blue,
        }
    }
}

const URGENT_GLYPH: &str = "\u{1F6A8}";

fn is_urgent(step: &str) -> bool {
    step.contains("URGENT") || step.contains(URGENT_GLYPH)
}

/// One predicted condition, classified for display. Indicators are already
/// filtered of empty entries; `critical` reflects a case-sensitive
/// `"CRITICAL"` marker in the collaborator's category text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionAssessment {
    pub name: String,
    pub category: String,
    pub confidence: String,
    pub confidence_tier: ConfidenceTier,
    pub critical: bool,
    pub indicators: Vec<String>,
}

impl ConditionAssessment {
    fn from_disease(disease: PredictedDisease) -> Self {
        let critical = disease.category.contains("CRITICAL");
        Self {
            confidence_tier: ConfidenceTier::from_label(&disease.confidence),
            critical,
            indicators: disease
                .indicators
                .into_iter()
                .filter(|indicator| !indicator.is_empty())
                .collect(),
            name: disease.name,
            category: disease.category,
            confidence: disease.confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextStep {
    pub text: String,
    pub urgent: bool,
}

/// Terminal shape of a classified prediction. An empty predicted-disease
/// list is its own branch, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PredictionOutcome {
    Conditions { conditions: Vec<ConditionAssessment> },
    NoSignificantConditions,
}

/// Deterministic classified view over the collaborator's raw prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReview {
    pub disclaimer: String,
    pub risk_category: String,
    pub risk_tier: RiskTier,
    pub confidence_level: String,
    pub outcome: PredictionOutcome,
    pub evidence: SupportingEvidence,
    pub next_steps: Vec<NextStep>,
}

impl PredictionReview {
    /// Classify a raw prediction. Condition order is preserved; critical
    /// entries are flagged, not re-sorted.
    pub fn classify(prediction: DiseasePrediction) -> Self {
        let outcome = if prediction.predicted_diseases.is_empty() {
            PredictionOutcome::NoSignificantConditions
        } else {
            PredictionOutcome::Conditions {
                conditions: prediction
                    .predicted_diseases
                    .into_iter()
                    .map(ConditionAssessment::from_disease)
                    .collect(),
            }
        };

        Self {
            disclaimer: prediction.medical_disclaimer,
            risk_tier: RiskTier::from_category(&prediction.risk_category),
            risk_category: prediction.risk_category,
            confidence_level: prediction.confidence_level,
            outcome,
            evidence: prediction.supporting_evidence,
            next_steps: prediction
                .recommended_next_steps
                .into_iter()
                .map(|text| NextStep {
                    urgent: is_urgent(&text),
                    text,
                })
                .collect(),
        }
    }
}

/// Independent disease-risk flow. Shares no state with the report pipeline
/// and may run before, after, or interleaved with it.
pub struct PredictionFlow {
    service: Arc<dyn PredictionService>,
}

impl PredictionFlow {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self { service }
    }

    /// Submit prediction inputs and classify the result. Age and gender are
    /// required; everything else passes through for the collaborator to
    /// interpret. Alias lab keys are filled in before submission.
    pub async fn predict(&self, mut inputs: PredictionInputs) -> Result<PredictionReview> {
        if inputs.patient_info.age == 0 || inputs.patient_info.gender.trim().is_empty() {
            return Err(FlowError::Validation(
                "Age and Gender are required".to_string(),
            ));
        }

        inputs.lab_values.fill_aliases();

        info!(age = inputs.patient_info.age, "submitting disease prediction");
        let prediction = self.service.predict_disease(&inputs).await?;
        Ok(PredictionReview::classify(prediction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PredictionLabValues, PredictionPatient, ScanInfo};
    use std::sync::Mutex;

    #[test]
    fn risk_tier_follows_the_substring_contract() {
        assert_eq!(RiskTier::from_category("Critical Finding"), RiskTier::Red);
        assert_eq!(
            RiskTier::from_category("Critical - Requires Immediate Medical Attention"),
            RiskTier::Red
        );
        assert_eq!(
            RiskTier::from_category("At Risk - Moderate"),
            RiskTier::Orange
        );
        assert_eq!(RiskTier::from_category("Normal"), RiskTier::Green);
        assert_eq!(RiskTier::from_category(""), RiskTier::Green);
    }

    #[test]
    fn confidence_tier_matches_exact_labels_only() {
        assert_eq!(ConfidenceTier::from_label("High"), ConfidenceTier::Red);
        assert_eq!(ConfidenceTier::from_label("Medium"), ConfidenceTier::Yellow);
        assert_eq!(ConfidenceTier::from_label("Low"), ConfidenceTier::Blue);
        assert_eq!(ConfidenceTier::from_label("high"), ConfidenceTier::Blue);
        assert_eq!(ConfidenceTier::from_label(""), ConfidenceTier::Blue);
    }

    fn raw_prediction() -> DiseasePrediction {
        DiseasePrediction {
            predicted_diseases: vec![
                PredictedDisease {
                    name: "Possible Blood Disorder / Leukemia (CRITICAL)".to_string(),
                    confidence: "Medium".to_string(),
                    category: "Hematological - REQUIRES URGENT EVALUATION".to_string(),
                    indicators: vec!["Very High WBC: 24 x10\u{b3}/\u{3bc}L".to_string()],
                },
                PredictedDisease {
                    name: "Diabetes Mellitus".to_string(),
                    confidence: "High".to_string(),
                    category: "Metabolic".to_string(),
                    indicators: vec![
                        "Fasting Blood Sugar: 140 mg/dL".to_string(),
                        String::new(),
                    ],
                },
            ],
            confidence_level: "Medium".to_string(),
            supporting_evidence: SupportingEvidence::default(),
            risk_category: "At Risk - Medical Consultation Recommended".to_string(),
            recommended_next_steps: vec![
                "\u{1F6A8} URGENT: Seek immediate medical attention".to_string(),
                "Share this prediction report with your doctor".to_string(),
            ],
            medical_disclaimer: "Not a diagnosis.".to_string(),
        }
    }

    #[test]
    fn classification_flags_critical_conditions_and_urgent_steps() {
        let review = PredictionReview::classify(raw_prediction());

        assert_eq!(review.risk_tier, RiskTier::Orange);
        let PredictionOutcome::Conditions { conditions } = &review.outcome else {
            panic!("expected classified conditions");
        };
        // "REQUIRES URGENT EVALUATION" is not the CRITICAL marker
        assert!(!conditions[0].critical);
        assert_eq!(conditions[0].confidence_tier, ConfidenceTier::Yellow);
        assert!(!conditions[1].critical);
        assert_eq!(conditions[1].confidence_tier, ConfidenceTier::Red);

        assert!(review.next_steps[0].urgent);
        assert!(!review.next_steps[1].urgent);
    }

    #[test]
    fn category_critical_marker_is_case_sensitive() {
        let mut prediction = raw_prediction();
        prediction.predicted_diseases[0].category = "Neurological - CRITICAL".to_string();
        prediction.predicted_diseases[1].category = "Metabolic - critical".to_string();
        let review = PredictionReview::classify(prediction);
        let PredictionOutcome::Conditions { conditions } = &review.outcome else {
            panic!("expected classified conditions");
        };
        assert!(conditions[0].critical);
        assert!(!conditions[1].critical);
    }

    #[test]
    fn empty_indicators_are_filtered_out() {
        let review = PredictionReview::classify(raw_prediction());
        let PredictionOutcome::Conditions { conditions } = &review.outcome else {
            panic!("expected classified conditions");
        };
        assert_eq!(
            conditions[1].indicators,
            vec!["Fasting Blood Sugar: 140 mg/dL".to_string()]
        );
    }

    #[test]
    fn zero_predicted_diseases_is_the_no_conditions_branch() {
        let mut prediction = raw_prediction();
        prediction.predicted_diseases.clear();
        prediction.risk_category = "Normal".to_string();
        let review = PredictionReview::classify(prediction);
        assert_eq!(review.outcome, PredictionOutcome::NoSignificantConditions);
        assert_eq!(review.risk_tier, RiskTier::Green);
    }

    struct RecordingService {
        seen: Mutex<Option<PredictionInputs>>,
    }

    #[async_trait::async_trait]
    impl PredictionService for RecordingService {
        async fn predict_disease(&self, inputs: &PredictionInputs) -> crate::error::Result<DiseasePrediction> {
            *self.seen.lock().unwrap() = Some(inputs.clone());
            Ok(DiseasePrediction::default())
        }
    }

    fn inputs(age: u32, gender: &str) -> PredictionInputs {
        PredictionInputs {
            patient_info: PredictionPatient {
                age,
                gender: gender.to_string(),
            },
            scan_info: ScanInfo::default(),
            lab_values: PredictionLabValues {
                hemoglobin: Some(10.4),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn missing_demographics_fail_before_any_call() {
        let service = Arc::new(RecordingService {
            seen: Mutex::new(None),
        });
        let flow = PredictionFlow::new(service.clone());

        let err = flow.predict(inputs(0, "Female")).await.unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        let err = flow.predict(inputs(47, "  ")).await.unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert!(service.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn aliases_are_filled_before_submission() {
        let service = Arc::new(RecordingService {
            seen: Mutex::new(None),
        });
        let flow = PredictionFlow::new(service.clone());

        flow.predict(inputs(47, "Female")).await.unwrap();
        let seen = service.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.lab_values.hb, Some(10.4));
        assert_eq!(seen.lab_values.hemoglobin, Some(10.4));
    }
}
