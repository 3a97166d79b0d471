use crate::adapters::backend::EvaluationBackend;
use crate::core::job::JobSnapshot;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Time between status queries while a job is non-terminal.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Drives one job from submission to its terminal status by querying the
/// backend on a fixed schedule. Each `start_polling` call owns a single
/// scheduled task; ticks are strictly serial, so snapshots are always
/// observed in query order.
pub struct StatusPoller<B> {
    backend: Arc<B>,
    interval: Duration,
}

impl<B: EvaluationBackend + 'static> StatusPoller<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Starts polling `job_id`. The first query fires without waiting a full
    /// interval, so a job that went terminal right after submission is still
    /// picked up. The returned handle yields snapshots and cancels the task
    /// when dropped.
    pub fn start_polling(&self, job_id: &str) -> PollHandle {
        let backend = Arc::clone(&self.backend);
        let job_id = job_id.to_string();
        let period = self.interval;
        let (tx, rx) = mpsc::channel(8);
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => {
                        debug!("polling for job {} cancelled", job_id);
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                // A failed or malformed read is a missed tick, not a job
                // failure; the next tick asks again.
                let job = match backend.job_status(&job_id).await {
                    Ok(job) => job,
                    Err(err) => {
                        warn!(
                            "status query for job {} failed, retrying on next tick: {:#}",
                            job_id, err
                        );
                        continue;
                    }
                };
                let snapshot = match job.into_snapshot() {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        warn!(
                            "malformed status payload for job {}, retrying on next tick: {:#}",
                            job_id, err
                        );
                        continue;
                    }
                };

                let terminal = snapshot.is_terminal();
                if tx.send(snapshot).await.is_err() {
                    // Receiver gone: the caller abandoned the job.
                    break;
                }
                if terminal {
                    break;
                }
            }
        });

        PollHandle {
            cancel: Some(cancel_tx),
            updates: rx,
        }
    }
}

/// Receiving side of one polling lifecycle. Yields non-terminal snapshots
/// for progress display, then exactly one terminal snapshot, then `None`.
/// Dropping the handle cancels the polling task.
pub struct PollHandle {
    cancel: Option<oneshot::Sender<()>>,
    updates: mpsc::Receiver<JobSnapshot>,
}

impl PollHandle {
    pub async fn recv(&mut self) -> Option<JobSnapshot> {
        self.updates.recv().await
    }

    /// Stops the polling task. No further queries are issued and snapshots
    /// already in flight are discarded, so nothing is delivered afterwards.
    pub fn cancel(&mut self) {
        self.cancel.take();
        self.updates.close();
        while self.updates.try_recv().is_ok() {}
    }
}
