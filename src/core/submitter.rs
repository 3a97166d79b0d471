use crate::adapters::backend::EvaluationBackend;
use crate::core::job::{DocumentPair, SubmittedJob};
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected before any backend contact; the caller may correct and resubmit.
    #[error("invalid evaluation request: {0}")]
    Validation(String),
    /// The backend refused the job or was unreachable; no job exists.
    #[error("evaluation job submission failed: {0}")]
    Submission(String),
}

/// Creates evaluation jobs. Issues exactly one create-job request per call
/// and reports whatever initial status the backend returns.
pub struct JobSubmitter<B> {
    backend: Arc<B>,
}

impl<B: EvaluationBackend> JobSubmitter<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn submit(
        &self,
        job_title: &str,
        documents: &DocumentPair,
    ) -> Result<SubmittedJob, SubmitError> {
        let title = job_title.trim();
        if title.is_empty() {
            return Err(SubmitError::Validation(
                "job title must not be empty".to_string(),
            ));
        }

        let job = self
            .backend
            .create_job(title, &documents.cv_id, &documents.report_id)
            .await
            .map_err(|err| SubmitError::Submission(format!("{:#}", err)))?;
        info!(
            "Evaluation job {} accepted with initial status {:?}",
            job.id, job.status
        );
        Ok(job)
    }
}
