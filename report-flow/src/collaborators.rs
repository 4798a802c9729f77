use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    DietRecommendation, DiseasePrediction, GeneratedReport, ImagePayload, ImagingFindings,
    LabAnalysis, LabInputs, PatientInfo, PredictionInputs,
};

/// Outcome of the diet-generation call. A reported failure is carried
/// in-band because the diet step is the only one whose failure does not
/// abort the pipeline; the failure response may ship its own fallback
/// payload. A transport-level failure still surfaces as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum DietOutcome {
    Generated(DietRecommendation),
    Failed {
        error: String,
        fallback: Option<DietRecommendation>,
    },
}

/// An encoded, rendered report as returned by the PDF collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDocument {
    pub pdf: String,
    pub filename: String,
}

/// The collaborator endpoints the report pipeline depends on, in call
/// order. Every method is a single request/response exchange; no retries
/// happen at this boundary.
#[async_trait]
pub trait ReportServices: Send + Sync {
    async fn analyze_image(
        &self,
        image: &ImagePayload,
        image_type: &str,
    ) -> Result<ImagingFindings>;

    async fn analyze_lab_results(&self, labs: &LabInputs) -> Result<LabAnalysis>;

    async fn generate_report(
        &self,
        patient: &PatientInfo,
        findings: &ImagingFindings,
        analysis: &LabAnalysis,
    ) -> Result<GeneratedReport>;

    async fn generate_diet(
        &self,
        patient: &PatientInfo,
        risk_indicators: &[String],
        abnormalities: &[String],
    ) -> Result<DietOutcome>;

    async fn generate_pdf(
        &self,
        report: &GeneratedReport,
        diet: &DietRecommendation,
    ) -> Result<PdfDocument>;
}

/// The disease-prediction collaborator. Kept separate from
/// [`ReportServices`]: the prediction flow shares no state with the report
/// pipeline and may run independently of it.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict_disease(&self, inputs: &PredictionInputs) -> Result<DiseasePrediction>;
}
