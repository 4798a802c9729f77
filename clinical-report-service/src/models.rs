use report_flow::{
    DietRecommendation, DietSource, GeneratedReport, ImagingFindings, LabInputs, PatientInfo,
    ReportSection, StepSnapshot,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    /// Raw image bytes, base64-encoded.
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    pub patient_info: PatientInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub lab_results: LabInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub session_id: String,
    pub file_name: String,
    pub size_label: String,
    pub progress: Vec<StepSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageResponse {
    pub session_id: String,
    pub findings: ImagingFindings,
    pub progress: Vec<StepSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub session_id: String,
    pub report: GeneratedReport,
    pub diet_recommendation: DietRecommendation,
    pub diet_source: DietSource,
    pub sections: Vec<ReportSection>,
    pub progress: Vec<StepSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsResponse {
    pub session_id: String,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub session_id: String,
    pub progress: Vec<StepSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfResponse {
    pub session_id: String,
    pub filename: String,
    /// The rendered document, base64-encoded for the JSON response.
    pub pdf: String,
}
