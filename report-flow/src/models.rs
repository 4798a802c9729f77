use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub patient_id: String,
    pub patient_name: String,
    pub age: String,
    pub gender: String,
    pub study_date: String,
    pub image_type: String,
}

/// A staged upload, immutable once produced. `data` carries the image as a
/// `data:<mime>;base64,...` payload, which is what the image-analysis
/// collaborator expects verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    pub data: String,
    pub byte_size: u64,
    pub size_label: String,
}

/// Six numeric lab fields; absent values default to zero, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabInputs {
    pub hemoglobin: f64,
    pub blood_sugar: f64,
    pub cholesterol: f64,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub creatinine: f64,
}

/// Structured output of the image-analysis collaborator, consumed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingFindings {
    pub modality: String,
    pub quality: String,
    #[serde(default)]
    pub findings: Vec<String>,
    pub impression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestResult {
    pub test: String,
    /// Numeric for most rows; the blood-pressure row carries a
    /// `"systolic/diastolic"` string.
    pub value: Value,
    pub unit: String,
    pub normal_range: String,
    pub status: String,
    #[serde(default)]
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabAnalysis {
    #[serde(default)]
    pub results: Vec<LabTestResult>,
    #[serde(default)]
    pub abnormalities: Vec<String>,
    #[serde(default)]
    pub risk_indicators: Vec<String>,
    pub interpretation: String,
}

/// The lab section embedded in a generated report. Unlike [`LabAnalysis`]
/// it carries no risk indicators; those are lifted to the report level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSummary {
    #[serde(default)]
    pub results: Vec<LabTestResult>,
    #[serde(default)]
    pub abnormalities: Vec<String>,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub report_id: String,
    pub generated_date: String,
    pub patient_summary: PatientInfo,
    pub imaging_findings: ImagingFindings,
    pub lab_results: LabSummary,
    pub clinical_impression: String,
    #[serde(default)]
    pub risk_indicators: Vec<String>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietRecommendation {
    pub overview: String,
    pub vegetarian_foods: Vec<String>,
    pub non_vegetarian_foods: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub lifestyle_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPatient {
    pub age: u32,
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanInfo {
    pub scan_type: String,
    pub body_part: String,
    pub observed_findings: String,
    pub severity: String,
}

/// Lab panel submitted for disease prediction. Several values travel under
/// both a clinical and a lay key so the collaborator finds whichever it
/// probes for; [`PredictionLabValues::fill_aliases`] populates the pairs.
/// Absent values are omitted from the payload, not defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionLabValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wbc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platelet: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasting_blood_sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triglycerides: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creatinine: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urea: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bun: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<f64>,
}

impl PredictionLabValues {
    /// Mirror each value onto its alias key (`hemoglobin`/`hb`,
    /// `fastingBloodSugar`/`bloodSugar`, `totalCholesterol`/`cholesterol`,
    /// `urea`/`bun`), whichever side was provided.
    pub fn fill_aliases(&mut self) {
        self.hb = self.hb.or(self.hemoglobin);
        self.hemoglobin = self.hemoglobin.or(self.hb);
        self.blood_sugar = self.blood_sugar.or(self.fasting_blood_sugar);
        self.fasting_blood_sugar = self.fasting_blood_sugar.or(self.blood_sugar);
        self.cholesterol = self.cholesterol.or(self.total_cholesterol);
        self.total_cholesterol = self.total_cholesterol.or(self.cholesterol);
        self.bun = self.bun.or(self.urea);
        self.urea = self.urea.or(self.bun);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInputs {
    pub patient_info: PredictionPatient,
    #[serde(default)]
    pub scan_info: ScanInfo,
    #[serde(default)]
    pub lab_values: PredictionLabValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedDisease {
    pub name: String,
    pub confidence: String,
    pub category: String,
    #[serde(default)]
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportingEvidence {
    pub scan_findings: Vec<String>,
    pub lab_abnormalities: Vec<String>,
}

/// Raw disease-prediction payload. The prediction collaborator speaks
/// snake_case, unlike the report-side endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseasePrediction {
    pub predicted_diseases: Vec<PredictedDisease>,
    pub confidence_level: String,
    pub supporting_evidence: SupportingEvidence,
    pub risk_category: String,
    pub recommended_next_steps: Vec<String>,
    pub medical_disclaimer: String,
}
