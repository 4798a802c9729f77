use std::sync::Arc;

use tracing::info;

use crate::assemble::{self, ReportSection};
use crate::collaborators::ReportServices;
use crate::diet::{self, DietSource};
use crate::error::{FlowError, Result};
use crate::models::{
    DietRecommendation, GeneratedReport, ImagePayload, ImagingFindings, LabAnalysis, LabInputs,
    PatientInfo,
};
use crate::pdf::{PdfExporter, ReportArtifact};
use crate::progress::{PipelineStep, ProgressTracker};
use crate::upload::{self, UploadedFile};

/// Result of a completed report pipeline run. Report and diet are always
/// both present; `diet_source` records whether a fallback was substituted.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: GeneratedReport,
    pub diet: DietRecommendation,
    pub diet_source: DietSource,
}

/// Session-scoped orchestrator for the report workflow. Owns the single
/// live instance of every report-side entity; collaborator calls are
/// strictly sequential, and entities are committed only on success.
/// Exclusive `&mut self` access makes overlapping submissions impossible.
pub struct ReportPipeline {
    services: Arc<dyn ReportServices>,
    progress: ProgressTracker,
    patient: Option<PatientInfo>,
    staged: Option<ImagePayload>,
    findings: Option<ImagingFindings>,
    lab_analysis: Option<LabAnalysis>,
    report: Option<GeneratedReport>,
    diet: Option<DietRecommendation>,
    diet_source: Option<DietSource>,
}

impl ReportPipeline {
    pub fn new(services: Arc<dyn ReportServices>) -> Self {
        Self {
            services,
            progress: ProgressTracker::new(),
            patient: None,
            staged: None,
            findings: None,
            lab_analysis: None,
            report: None,
            diet: None,
            diet_source: None,
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn staged_image(&self) -> Option<&ImagePayload> {
        self.staged.as_ref()
    }

    pub fn findings(&self) -> Option<&ImagingFindings> {
        self.findings.as_ref()
    }

    pub fn lab_analysis(&self) -> Option<&LabAnalysis> {
        self.lab_analysis.as_ref()
    }

    pub fn report(&self) -> Option<&GeneratedReport> {
        self.report.as_ref()
    }

    pub fn diet(&self) -> Option<&DietRecommendation> {
        self.diet.as_ref()
    }

    pub fn diet_source(&self) -> Option<DietSource> {
        self.diet_source
    }

    /// Discard every session entity and reset progress.
    pub fn reset(&mut self) {
        self.progress = ProgressTracker::new();
        self.patient = None;
        self.staged = None;
        self.findings = None;
        self.lab_analysis = None;
        self.report = None;
        self.diet = None;
        self.diet_source = None;
    }

    /// Validate and stage an upload. A new upload replaces any prior
    /// payload unconditionally and discards results derived from it.
    pub fn stage_upload(&mut self, file: &UploadedFile) -> Result<ImagePayload> {
        let payload = upload::stage(file)?;
        self.reset();
        self.progress.complete(PipelineStep::Upload);
        info!(
            file = %payload.file_name,
            size = %payload.size_label,
            "image staged for analysis"
        );
        Ok(self.staged.insert(payload).clone())
    }

    /// Submit the staged image for analysis. On success the session moves
    /// to step 3 readiness; on failure step 2 reverts to inactive and the
    /// collaborator's message is surfaced.
    pub async fn analyze_image(&mut self, patient: PatientInfo) -> Result<ImagingFindings> {
        validate_patient(&patient)?;
        let staged = self
            .staged
            .clone()
            .ok_or_else(|| FlowError::State("no image has been staged for analysis".to_string()))?;

        self.progress.activate(PipelineStep::ImageAnalysis)?;
        info!(image_type = %patient.image_type, "submitting image for analysis");

        match self.services.analyze_image(&staged, &patient.image_type).await {
            Ok(findings) => {
                self.progress.complete(PipelineStep::ImageAnalysis);
                self.progress.activate(PipelineStep::LabReport)?;
                self.patient = Some(patient);
                Ok(self.findings.insert(findings).clone())
            }
            Err(err) => {
                self.progress.revert(PipelineStep::ImageAnalysis);
                Err(err)
            }
        }
    }

    /// Run the lab -> report -> diet sequence. Only a diet failure that the
    /// collaborator reports in-band is non-fatal: its fallback payload, or
    /// the fixed local default, is substituted and step 3 still completes.
    pub async fn generate_report(&mut self, labs: &LabInputs) -> Result<ReportOutcome> {
        let (patient, findings) = match (self.patient.clone(), self.findings.clone()) {
            (Some(patient), Some(findings)) => (patient, findings),
            _ => {
                return Err(FlowError::State(
                    "image analysis has not completed for this session".to_string(),
                ));
            }
        };

        info!("analyzing lab results");
        let analysis = self.services.analyze_lab_results(labs).await?;
        self.lab_analysis = Some(analysis.clone());

        info!("generating consolidated report");
        let report = self
            .services
            .generate_report(&patient, &findings, &analysis)
            .await?;

        info!("generating diet recommendation");
        let outcome = self
            .services
            .generate_diet(&patient, &analysis.risk_indicators, &analysis.abnormalities)
            .await?;
        let (diet, diet_source) = diet::resolve(outcome);

        self.progress.complete(PipelineStep::LabReport);
        self.report = Some(report.clone());
        self.diet = Some(diet.clone());
        self.diet_source = Some(diet_source);
        info!(?diet_source, "report pipeline complete");

        Ok(ReportOutcome {
            report,
            diet,
            diet_source,
        })
    }

    /// Presentation model for the current report.
    pub fn sections(&self) -> Result<Vec<ReportSection>> {
        let report = self
            .report
            .as_ref()
            .ok_or_else(|| FlowError::State("no report has been generated".to_string()))?;
        Ok(assemble::assemble(report, self.diet.as_ref()))
    }

    /// Request the downloadable PDF for the finished report. A usage error
    /// before the pipeline has completed; never mutates session state.
    pub async fn export_pdf(&self) -> Result<ReportArtifact> {
        let (Some(report), Some(diet)) = (self.report.as_ref(), self.diet.as_ref()) else {
            return Err(FlowError::State(
                "PDF export requires a completed report".to_string(),
            ));
        };
        PdfExporter::new(self.services.clone())
            .export(report, diet)
            .await
    }
}

fn validate_patient(patient: &PatientInfo) -> Result<()> {
    if patient.patient_id.trim().is_empty()
        || patient.patient_name.trim().is_empty()
        || patient.age.trim().is_empty()
    {
        return Err(FlowError::Validation(
            "Patient ID, name and age are required".to_string(),
        ));
    }
    Ok(())
}
