use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::collaborators::ReportServices;
use crate::error::{FlowError, Result};
use crate::models::{DietRecommendation, GeneratedReport};

/// A downloadable report, decoded and ready to hand to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Requests the rendered PDF for a finished report and materializes the
/// artifact. Failure leaves every session entity untouched.
pub struct PdfExporter {
    services: Arc<dyn ReportServices>,
}

impl PdfExporter {
    pub fn new(services: Arc<dyn ReportServices>) -> Self {
        Self { services }
    }

    pub async fn export(
        &self,
        report: &GeneratedReport,
        diet: &DietRecommendation,
    ) -> Result<ReportArtifact> {
        let document = self.services.generate_pdf(report, diet).await?;
        let content = STANDARD
            .decode(document.pdf.as_bytes())
            .map_err(|e| FlowError::Service(format!("PDF payload could not be decoded: {e}")))?;
        Ok(ReportArtifact {
            filename: document.filename,
            content,
        })
    }
}
