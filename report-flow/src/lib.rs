pub mod assemble;
pub mod collaborators;
pub mod diet;
pub mod error;
pub mod http;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod prediction;
pub mod progress;
pub mod upload;

// Re-export commonly used types
pub use assemble::{LabRow, ReportSection, assemble};
pub use collaborators::{DietOutcome, PdfDocument, PredictionService, ReportServices};
pub use diet::DietSource;
pub use error::{FlowError, Result};
pub use http::HttpCollaborators;
pub use models::{
    DietRecommendation, DiseasePrediction, GeneratedReport, ImagePayload, ImagingFindings,
    LabAnalysis, LabInputs, LabSummary, LabTestResult, PatientInfo, PredictedDisease,
    PredictionInputs, PredictionLabValues, PredictionPatient, ScanInfo, SupportingEvidence,
};
pub use pdf::{PdfExporter, ReportArtifact};
pub use pipeline::{ReportOutcome, ReportPipeline};
pub use prediction::{
    ConditionAssessment, ConfidenceTier, NextStep, PredictionFlow, PredictionOutcome,
    PredictionReview, RiskTier,
};
pub use progress::{PipelineStep, ProgressTracker, StepSnapshot, StepStatus};
pub use upload::UploadedFile;
