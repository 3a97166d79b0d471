use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

/// Shown when the backend reports a failed job without an error message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Evaluation failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// The two ingested document identifiers an evaluation job is created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPair {
    pub cv_id: String,
    pub report_id: String,
}

/// Create-job response: the backend-assigned identifier and whatever initial
/// status the backend reports. Callers must not assume it is `queued`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmittedJob {
    pub id: String,
    pub status: JobStatus,
}

/// One status read of an evaluation job, as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationJob {
    pub id: String,
    pub status: JobStatus,
    pub result: Option<EvaluationResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailScore {
    pub score: f64,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvDetails {
    pub technical_skills: DetailScore,
    pub experience_level: DetailScore,
    pub achievements: DetailScore,
    pub cultural_fit: DetailScore,
}

impl CvDetails {
    pub fn entries(&self) -> [(&'static str, &DetailScore); 4] {
        [
            ("technical_skills", &self.technical_skills),
            ("experience_level", &self.experience_level),
            ("achievements", &self.achievements),
            ("cultural_fit", &self.cultural_fit),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDetails {
    pub correctness: DetailScore,
    pub code_quality: DetailScore,
    pub resilience: DetailScore,
    pub documentation: DetailScore,
    pub creativity: DetailScore,
}

impl ProjectDetails {
    pub fn entries(&self) -> [(&'static str, &DetailScore); 5] {
        [
            ("correctness", &self.correctness),
            ("code_quality", &self.code_quality),
            ("resilience", &self.resilience),
            ("documentation", &self.documentation),
            ("creativity", &self.creativity),
        ]
    }
}

/// The scored report attached to a completed job. The sub-criteria sets are
/// fixed per category; unknown or missing keys are a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub cv_match_rate: f64,
    pub cv_feedback: String,
    pub project_score: f64,
    pub project_feedback: String,
    pub overall_score: f64,
    pub overall_summary: String,
    pub recommendation: String,
    pub cv_details: CvDetails,
    pub project_details: ProjectDetails,
}

impl EvaluationResult {
    /// Bounds check on every score. `cv_match_rate` is a rate in [0, 1],
    /// everything else is scored out of 5.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.cv_match_rate),
            "cv_match_rate {} is outside [0, 1]",
            self.cv_match_rate
        );
        ensure!(
            (0.0..=5.0).contains(&self.project_score),
            "project_score {} is outside [0, 5]",
            self.project_score
        );
        ensure!(
            (0.0..=5.0).contains(&self.overall_score),
            "overall_score {} is outside [0, 5]",
            self.overall_score
        );
        for (name, detail) in self
            .cv_details
            .entries()
            .into_iter()
            .chain(self.project_details.entries())
        {
            ensure!(
                (0.0..=5.0).contains(&detail.score),
                "{} score {} is outside [0, 5]",
                name,
                detail.score
            );
        }
        Ok(())
    }
}

/// One observation of the job, passed immutably between ticks. Exactly one
/// `Completed` or `Failed` snapshot ends a polling lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum JobSnapshot {
    Queued,
    Processing,
    Completed(EvaluationResult),
    Failed(String),
}

impl JobSnapshot {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobSnapshot::Completed(_) | JobSnapshot::Failed(_))
    }
}

impl EvaluationJob {
    /// Collapse a status read into a snapshot. A `completed` job without a
    /// well-formed result payload is malformed; the caller treats that like
    /// a failed query and asks again on the next tick.
    pub fn into_snapshot(self) -> Result<JobSnapshot> {
        match self.status {
            JobStatus::Queued => Ok(JobSnapshot::Queued),
            JobStatus::Processing => Ok(JobSnapshot::Processing),
            JobStatus::Completed => match self.result {
                Some(result) => {
                    result.validate()?;
                    Ok(JobSnapshot::Completed(result))
                }
                None => bail!("job {} reported completed without a result payload", self.id),
            },
            JobStatus::Failed => Ok(JobSnapshot::Failed(
                self.error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            )),
        }
    }
}
