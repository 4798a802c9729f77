use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::collaborators::{DietOutcome, PdfDocument, PredictionService, ReportServices};
use crate::error::{FlowError, Result};
use crate::models::{
    DietRecommendation, DiseasePrediction, GeneratedReport, ImagePayload, ImagingFindings,
    LabAnalysis, LabInputs, PatientInfo, PredictionInputs,
};

/// HTTP implementation of the collaborator interfaces. One reused client,
/// one base URL; every endpoint is a POST exchanging JSON with an explicit
/// `success` discriminator. Error bodies are parsed regardless of the HTTP
/// status code, matching the collaborators' contract.
#[derive(Clone)]
pub struct HttpCollaborators {
    client: Client,
    base_url: String,
}

impl HttpCollaborators {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("calling collaborator endpoint {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))
    }
}

fn service_error(message: Option<String>, default: &str) -> FlowError {
    FlowError::Service(message.unwrap_or_else(|| default.to_string()))
}

#[derive(Deserialize)]
struct ImageAnalysisEnvelope {
    success: bool,
    findings: Option<ImagingFindings>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LabAnalysisEnvelope {
    success: bool,
    analysis: Option<LabAnalysis>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ReportEnvelope {
    success: bool,
    report: Option<GeneratedReport>,
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DietEnvelope {
    success: bool,
    diet_recommendation: Option<DietRecommendation>,
    fallback: Option<DietRecommendation>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct PredictionEnvelope {
    success: bool,
    prediction: Option<DiseasePrediction>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct PdfEnvelope {
    success: bool,
    pdf: Option<String>,
    filename: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl ReportServices for HttpCollaborators {
    async fn analyze_image(
        &self,
        image: &ImagePayload,
        image_type: &str,
    ) -> Result<ImagingFindings> {
        let body = json!({
            "image": image.data,
            "imageType": image_type,
        });
        let envelope: ImageAnalysisEnvelope = self.post("/analyze-image", &body).await?;
        if !envelope.success {
            return Err(service_error(envelope.error, "Image analysis failed"));
        }
        envelope
            .findings
            .ok_or_else(|| FlowError::Service("image analysis response missing findings".to_string()))
    }

    async fn analyze_lab_results(&self, labs: &LabInputs) -> Result<LabAnalysis> {
        let body = json!({ "labResults": labs });
        let envelope: LabAnalysisEnvelope = self.post("/analyze-lab-results", &body).await?;
        if !envelope.success {
            return Err(service_error(envelope.error, "Lab analysis failed"));
        }
        envelope
            .analysis
            .ok_or_else(|| FlowError::Service("lab analysis response missing analysis".to_string()))
    }

    async fn generate_report(
        &self,
        patient: &PatientInfo,
        findings: &ImagingFindings,
        analysis: &LabAnalysis,
    ) -> Result<GeneratedReport> {
        let body = json!({
            "patientInfo": patient,
            "imagingFindings": findings,
            "labAnalysis": analysis,
        });
        let envelope: ReportEnvelope = self.post("/generate-report", &body).await?;
        if !envelope.success {
            return Err(service_error(envelope.error, "Report generation failed"));
        }
        envelope
            .report
            .ok_or_else(|| FlowError::Service("report response missing report".to_string()))
    }

    async fn generate_diet(
        &self,
        patient: &PatientInfo,
        risk_indicators: &[String],
        abnormalities: &[String],
    ) -> Result<DietOutcome> {
        let body = json!({
            "patientInfo": patient,
            "riskIndicators": risk_indicators,
            "abnormalities": abnormalities,
        });
        let envelope: DietEnvelope = self.post("/generate-diet", &body).await?;
        if envelope.success {
            match envelope.diet_recommendation {
                Some(diet) => Ok(DietOutcome::Generated(diet)),
                None => Ok(DietOutcome::Failed {
                    error: "diet response missing recommendation".to_string(),
                    fallback: None,
                }),
            }
        } else {
            Ok(DietOutcome::Failed {
                error: envelope
                    .error
                    .unwrap_or_else(|| "Diet generation failed".to_string()),
                fallback: envelope.fallback,
            })
        }
    }

    async fn generate_pdf(
        &self,
        report: &GeneratedReport,
        diet: &DietRecommendation,
    ) -> Result<PdfDocument> {
        let body = json!({
            "report": report,
            "dietRecommendation": diet,
        });
        let envelope: PdfEnvelope = self.post("/generate-pdf", &body).await?;
        if !envelope.success {
            return Err(service_error(envelope.error, "PDF generation failed"));
        }
        match (envelope.pdf, envelope.filename) {
            (Some(pdf), Some(filename)) => Ok(PdfDocument { pdf, filename }),
            _ => Err(FlowError::Service(
                "PDF response missing document or filename".to_string(),
            )),
        }
    }
}

#[async_trait]
impl PredictionService for HttpCollaborators {
    async fn predict_disease(&self, inputs: &PredictionInputs) -> Result<DiseasePrediction> {
        let body = serde_json::to_value(inputs)
            .map_err(|e| FlowError::Validation(e.to_string()))?;
        let envelope: PredictionEnvelope = self.post("/predict-disease", &body).await?;
        if !envelope.success {
            return Err(service_error(envelope.error, "Unknown error"));
        }
        envelope
            .prediction
            .ok_or_else(|| FlowError::Service("prediction response missing prediction".to_string()))
    }
}
