use serde::Serialize;
use serde_json::Value;

use crate::models::{DietRecommendation, GeneratedReport, ImagingFindings, PatientInfo};

/// One lab row of the presentation model, with its normal/abnormal verdict
/// already decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRow {
    pub test: String,
    pub value: Value,
    pub unit: String,
    pub normal_range: String,
    pub status: String,
    pub is_normal: bool,
}

/// A self-contained report section. Sections only relate through their
/// position in the assembled list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportSection {
    PatientSummary {
        patient: PatientInfo,
    },
    ImagingFindings {
        findings: ImagingFindings,
    },
    LabResults {
        rows: Vec<LabRow>,
        abnormalities: Vec<String>,
        interpretation: String,
    },
    ClinicalImpression {
        text: String,
    },
    RiskIndicators {
        indicators: Vec<String>,
    },
    Diet {
        recommendation: DietRecommendation,
    },
    NextSteps {
        steps: Vec<String>,
    },
}

/// Build the ordered presentation model for a finished report. Pure and
/// idempotent; the risk-indicator section is dropped entirely when empty,
/// the diet section when absent. Rendering stops at this boundary.
pub fn assemble(
    report: &GeneratedReport,
    diet: Option<&DietRecommendation>,
) -> Vec<ReportSection> {
    let mut sections = Vec::with_capacity(7);

    sections.push(ReportSection::PatientSummary {
        patient: report.patient_summary.clone(),
    });
    sections.push(ReportSection::ImagingFindings {
        findings: report.imaging_findings.clone(),
    });
    sections.push(ReportSection::LabResults {
        rows: report
            .lab_results
            .results
            .iter()
            .map(|result| LabRow {
                test: result.test.clone(),
                value: result.value.clone(),
                unit: result.unit.clone(),
                normal_range: result.normal_range.clone(),
                status: result.status.clone(),
                is_normal: result.status == "Normal",
            })
            .collect(),
        abnormalities: report.lab_results.abnormalities.clone(),
        interpretation: report.lab_results.interpretation.clone(),
    });
    sections.push(ReportSection::ClinicalImpression {
        text: report.clinical_impression.clone(),
    });
    if !report.risk_indicators.is_empty() {
        sections.push(ReportSection::RiskIndicators {
            indicators: report.risk_indicators.clone(),
        });
    }
    if let Some(diet) = diet {
        sections.push(ReportSection::Diet {
            recommendation: diet.clone(),
        });
    }
    sections.push(ReportSection::NextSteps {
        steps: report.recommended_next_steps.clone(),
    });

    sections
}
