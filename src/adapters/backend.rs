use crate::core::job::{EvaluationJob, SubmittedJob};
use anyhow::Result;
use async_trait::async_trait;

/// The evaluation backend as seen by the lifecycle core: a black-box job
/// queue with a create operation and an idempotent status read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    async fn create_job(
        &self,
        job_title: &str,
        cv_id: &str,
        report_id: &str,
    ) -> Result<SubmittedJob>;

    async fn job_status(&self, job_id: &str) -> Result<EvaluationJob>;
}
