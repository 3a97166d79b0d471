pub mod job;
pub mod poller;
pub mod session;
pub mod submitter;

pub use job::{DocumentPair, EvaluationJob, EvaluationResult, JobSnapshot, JobStatus, SubmittedJob};
pub use poller::{PollHandle, StatusPoller, POLL_INTERVAL};
pub use session::EvaluationSession;
pub use submitter::{JobSubmitter, SubmitError};
