use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lib::adapters::backend::EvaluationBackend;
use lib::core::job::{
    CvDetails, DetailScore, DocumentPair, EvaluationJob, EvaluationResult, JobSnapshot, JobStatus,
    ProjectDetails, SubmittedJob,
};
use lib::core::session::EvaluationSession;

/// Backend fake that replays a fixed sequence of status reads and records
/// what it was asked.
struct ScriptedBackend {
    submitted: Mutex<Option<(String, String, String)>>,
    script: Mutex<VecDeque<EvaluationJob>>,
    status_calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(script: Vec<EvaluationJob>) -> Self {
        Self {
            submitted: Mutex::new(None),
            script: Mutex::new(script.into()),
            status_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EvaluationBackend for ScriptedBackend {
    async fn create_job(
        &self,
        job_title: &str,
        cv_id: &str,
        report_id: &str,
    ) -> Result<SubmittedJob> {
        *self.submitted.lock().unwrap() = Some((
            job_title.to_string(),
            cv_id.to_string(),
            report_id.to_string(),
        ));
        Ok(SubmittedJob {
            id: "job-42".to_string(),
            status: JobStatus::Queued,
        })
    }

    async fn job_status(&self, job_id: &str) -> Result<EvaluationJob> {
        assert_eq!(job_id, "job-42");
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let job = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("status queried after the scripted terminal response");
        Ok(job)
    }
}

fn detail(score: f64) -> DetailScore {
    DetailScore {
        score,
        justification: "justified".to_string(),
    }
}

fn strong_hire_result() -> EvaluationResult {
    EvaluationResult {
        cv_match_rate: 0.82,
        cv_feedback: "Strong backend background.".to_string(),
        project_score: 4.1,
        project_feedback: "Well structured service.".to_string(),
        overall_score: 4.2,
        overall_summary: "Excellent fit for the role.".to_string(),
        recommendation: "strong hire".to_string(),
        cv_details: CvDetails {
            technical_skills: detail(4.5),
            experience_level: detail(4.0),
            achievements: detail(3.8),
            cultural_fit: detail(4.2),
        },
        project_details: ProjectDetails {
            correctness: detail(4.3),
            code_quality: detail(4.0),
            resilience: detail(3.9),
            documentation: detail(4.1),
            creativity: detail(3.7),
        },
    }
}

fn read(status: JobStatus, result: Option<EvaluationResult>) -> EvaluationJob {
    EvaluationJob {
        id: "job-42".to_string(),
        status,
        result,
        error: None,
    }
}

#[tokio::test(start_paused = true)]
async fn full_lifecycle_reaches_exactly_one_completion() {
    let backend = Arc::new(ScriptedBackend::new(vec![
        read(JobStatus::Processing, None),
        read(JobStatus::Completed, Some(strong_hire_result())),
    ]));
    let mut session = EvaluationSession::new(Arc::clone(&backend));

    let documents = DocumentPair {
        cv_id: "cv-1".to_string(),
        report_id: "rep-1".to_string(),
    };
    let job = session.start("Backend Engineer", &documents).await.unwrap();
    assert_eq!(job.id, "job-42");
    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(
        backend.submitted.lock().unwrap().clone(),
        Some((
            "Backend Engineer".to_string(),
            "cv-1".to_string(),
            "rep-1".to_string()
        ))
    );

    let mut completions = 0;
    loop {
        match session.next_snapshot().await {
            Some(JobSnapshot::Processing) | Some(JobSnapshot::Queued) => {}
            Some(JobSnapshot::Completed(result)) => {
                completions += 1;
                assert_eq!(result.overall_score, 4.2);
                assert_eq!(result.recommendation, "strong hire");
            }
            Some(JobSnapshot::Failed(message)) => panic!("unexpected failure: {}", message),
            None => break,
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 2);

    // Plenty of extra time: the scripted backend panics on any further read.
    tokio::time::sleep(lib::core::poller::POLL_INTERVAL * 5).await;
}
