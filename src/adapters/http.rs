use crate::adapters::backend::EvaluationBackend;
use crate::core::job::{DocumentPair, EvaluationJob, SubmittedJob};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::path::Path;

/// HTTP binding of the evaluation backend and the document ingestion
/// endpoint in front of it.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Uploads the CV and project report, returning the identifiers every
    /// evaluation job for this pair is created from.
    pub async fn upload_documents(
        &self,
        cv_path: &Path,
        report_path: &Path,
    ) -> Result<DocumentPair> {
        let form = Form::new()
            .part("cv", file_part(cv_path).await?)
            .part("report", file_part(report_path).await?);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .context("Failed to send document upload request")?;

        if response.status().is_success() {
            let documents = response
                .json::<DocumentPair>()
                .await
                .context("Failed to parse upload response as JSON")?;
            info!(
                "Documents uploaded: cv_id={}, report_id={}",
                documents.cv_id, documents.report_id
            );
            Ok(documents)
        } else {
            let error_text = response
                .text()
                .await
                .context("Failed to get error text from upload response")?;
            error!("Document upload failed: {}", error_text);
            anyhow::bail!("Document upload failed: {}", error_text)
        }
    }
}

#[async_trait]
impl EvaluationBackend for HttpBackend {
    async fn create_job(
        &self,
        job_title: &str,
        cv_id: &str,
        report_id: &str,
    ) -> Result<SubmittedJob> {
        let body = json!({
            "job_title": job_title,
            "cv_id": cv_id,
            "report_id": report_id,
        });

        let response = self
            .client
            .post(format!("{}/evaluate", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Failed to send evaluation request")?;

        if response.status().is_success() {
            let job = response
                .json::<SubmittedJob>()
                .await
                .context("Failed to parse evaluation response as JSON")?;
            debug!("Create-job response: {:?}", job);
            Ok(job)
        } else {
            let error_text = response
                .text()
                .await
                .context("Failed to get error text from evaluation response")?;
            error!("Evaluation job creation failed: {}", error_text);
            anyhow::bail!("Evaluation job creation failed: {}", error_text)
        }
    }

    async fn job_status(&self, job_id: &str) -> Result<EvaluationJob> {
        let response = self
            .client
            .get(format!("{}/result/{}", self.base_url, job_id))
            .send()
            .await
            .context("Failed to send status request")?;

        if response.status().is_success() {
            let job = response
                .json::<EvaluationJob>()
                .await
                .context("Failed to parse status response as JSON")?;
            debug!("Status response for job {}: {:?}", job_id, job.status);
            Ok(job)
        } else {
            let error_text = response
                .text()
                .await
                .context("Failed to get error text from status response")?;
            anyhow::bail!("Status query failed: {}", error_text)
        }
    }
}

async fn file_part(path: &Path) -> Result<Part> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Failed to get file name")?
        .to_string();
    Part::bytes(content)
        .file_name(file_name)
        .mime_str("application/octet-stream")
        .context("Failed to set MIME type")
}
