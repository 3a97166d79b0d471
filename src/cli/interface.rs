use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::http::HttpBackend;
use crate::adapters::output::{render_report, save_result};
use crate::core::job::{JobSnapshot, JobStatus};
use crate::core::session::EvaluationSession;
use crate::utils::lib::create_spinner;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the CV Evaluator backend
    #[clap(long, value_parser, default_value = "http://localhost:8000")]
    pub backend_url: String,

    /// Path to the candidate CV
    #[clap(long, value_parser)]
    pub cv: PathBuf,

    /// Path to the candidate's project report
    #[clap(long, value_parser)]
    pub report: PathBuf,

    /// Job title the candidate is evaluated against
    #[clap(short, long)]
    pub job_title: String,

    /// Where to save the result JSON (file or directory)
    #[clap(short, long, value_parser)]
    pub output: Option<PathBuf>,
}

fn progress_message(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Queued => "Your evaluation is queued and will start shortly...",
        JobStatus::Processing => "AI is analyzing the documents...",
        JobStatus::Completed | JobStatus::Failed => "Finalizing evaluation...",
    }
}

pub async fn run_cli_interface() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let backend = Arc::new(HttpBackend::new(args.backend_url.clone()));
    let documents = backend
        .upload_documents(&args.cv, &args.report)
        .await
        .context("Failed to upload documents")?;
    println!(
        "Documents uploaded (cv: {}, report: {})",
        documents.cv_id, documents.report_id
    );

    let mut session = EvaluationSession::new(Arc::clone(&backend));
    let job = session
        .start(&args.job_title, &documents)
        .await
        .context("Failed to start evaluation")?;
    println!("Evaluation job {} submitted", job.id);

    let spinner = create_spinner().context("Failed to create spinner")?;
    spinner.set_message(progress_message(job.status));

    let outcome = loop {
        match session.next_snapshot().await {
            Some(JobSnapshot::Queued) => spinner.set_message(progress_message(JobStatus::Queued)),
            Some(JobSnapshot::Processing) => {
                spinner.set_message(progress_message(JobStatus::Processing))
            }
            Some(JobSnapshot::Completed(result)) => break Ok(result),
            Some(JobSnapshot::Failed(message)) => break Err(message),
            None => break Err("polling stopped before a terminal status was reported".to_string()),
        }
    };
    spinner.finish_and_clear();

    match outcome {
        Ok(result) => {
            print!("{}", render_report(&result));
            let path = save_result(args.output, &result).context("Failed to save result")?;
            info!("Evaluation result saved to {:?}", path);
            println!("Result saved to {}", path.display());
            Ok(())
        }
        Err(message) => {
            error!("Evaluation of job {} failed: {}", job.id, message);
            anyhow::bail!("Evaluation failed: {}", message)
        }
    }
}
