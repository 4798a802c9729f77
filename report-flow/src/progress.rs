use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Inactive,
    Active,
    Complete,
}

/// The three externally visible workflow stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStep {
    Upload,
    ImageAnalysis,
    LabReport,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 3] = [
        PipelineStep::Upload,
        PipelineStep::ImageAnalysis,
        PipelineStep::LabReport,
    ];

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStep::Upload => "upload",
            PipelineStep::ImageAnalysis => "image-analysis",
            PipelineStep::LabReport => "lab-report",
        }
    }

    fn predecessor(self) -> Option<PipelineStep> {
        match self {
            PipelineStep::Upload => None,
            PipelineStep::ImageAnalysis => Some(PipelineStep::Upload),
            PipelineStep::LabReport => Some(PipelineStep::ImageAnalysis),
        }
    }
}

/// One entry of a serializable progress snapshot for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub step: u8,
    pub name: &'static str,
    pub status: StepStatus,
}

/// Tracks the three ordered workflow steps. Transitions are driven by the
/// pipeline at well-defined points; the tracker itself only enforces the
/// ordering invariant: a step can never become active before its
/// predecessor is complete.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    steps: [StepStatus; 3],
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            steps: [StepStatus::Inactive; 3],
        }
    }

    pub fn status(&self, step: PipelineStep) -> StepStatus {
        self.steps[step as usize]
    }

    pub fn is_complete(&self, step: PipelineStep) -> bool {
        self.status(step) == StepStatus::Complete
    }

    pub fn activate(&mut self, step: PipelineStep) -> Result<()> {
        if let Some(previous) = step.predecessor() {
            if !self.is_complete(previous) {
                return Err(FlowError::State(format!(
                    "cannot start {} before {} is complete",
                    step.label(),
                    previous.label()
                )));
            }
        }
        self.steps[step as usize] = StepStatus::Active;
        Ok(())
    }

    pub fn complete(&mut self, step: PipelineStep) {
        self.steps[step as usize] = StepStatus::Complete;
    }

    /// Recovery edge: drop an active step back to inactive. Used only when
    /// image analysis fails. Complete steps are never reverted.
    pub fn revert(&mut self, step: PipelineStep) {
        if self.status(step) == StepStatus::Active {
            self.steps[step as usize] = StepStatus::Inactive;
        }
    }

    pub fn snapshot(&self) -> Vec<StepSnapshot> {
        PipelineStep::ALL
            .iter()
            .map(|&step| StepSnapshot {
                step: step.number(),
                name: step.label(),
                status: self.status(step),
            })
            .collect()
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
