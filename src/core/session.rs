use crate::adapters::backend::EvaluationBackend;
use crate::core::job::{DocumentPair, JobSnapshot, SubmittedJob};
use crate::core::poller::{PollHandle, StatusPoller};
use crate::core::submitter::{JobSubmitter, SubmitError};
use std::sync::Arc;

/// One evaluation lifecycle at a time: submitting a new job first cancels
/// any poll still running, and a terminal snapshot releases the job, so the
/// session never tracks more than one job's state.
pub struct EvaluationSession<B> {
    submitter: JobSubmitter<B>,
    poller: StatusPoller<B>,
    active: Option<PollHandle>,
}

impl<B: EvaluationBackend + 'static> EvaluationSession<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            submitter: JobSubmitter::new(Arc::clone(&backend)),
            poller: StatusPoller::new(backend),
            active: None,
        }
    }

    /// Submits a job and starts polling it. Validation and submission
    /// failures leave the session without an active job.
    pub async fn start(
        &mut self,
        job_title: &str,
        documents: &DocumentPair,
    ) -> Result<SubmittedJob, SubmitError> {
        self.reset();
        let job = self.submitter.submit(job_title, documents).await?;
        self.active = Some(self.poller.start_polling(&job.id));
        Ok(job)
    }

    /// Next status snapshot of the active job, or `None` when there is no
    /// active job or polling has ended. The job is forgotten once terminal.
    pub async fn next_snapshot(&mut self) -> Option<JobSnapshot> {
        let handle = self.active.as_mut()?;
        let snapshot = handle.recv().await;
        match &snapshot {
            Some(s) if s.is_terminal() => {
                self.active = None;
            }
            None => {
                self.active = None;
            }
            _ => {}
        }
        snapshot
    }

    /// Abandons the active job, if any, cancelling its polling task.
    pub fn reset(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
