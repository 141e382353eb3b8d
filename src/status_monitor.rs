//! Status Monitor for polling MediaHub job progress.

use crate::api::JobApi;
use crate::error::{ClientError, Result};
use crate::models::JobStatusResponse;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Waits between polls.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Polls a job's status at a fixed interval until it reports completion.
#[derive(Debug, Clone)]
pub struct StatusMonitor {
    /// Wait before every request, the first one included
    poll_interval: Duration,
    /// Upper bound on requests; `None` polls forever
    max_polls: Option<u32>,
}

impl StatusMonitor {
    pub fn new(poll_interval: Duration, max_polls: Option<u32>) -> Self {
        Self {
            poll_interval,
            max_polls,
        }
    }

    /// Poll until progress reaches 100 and return the final status.
    ///
    /// Any transport or parse error ends polling immediately. The remote job's
    /// own status string is logged but never consulted.
    pub fn poll_until_complete<A: JobApi, S: Sleeper>(
        &self,
        api: &A,
        sleeper: &mut S,
        job_id: &str,
    ) -> Result<JobStatusResponse> {
        let mut polls: u32 = 0;
        let mut last_progress = 0;

        loop {
            if let Some(limit) = self.max_polls {
                if polls >= limit {
                    return Err(ClientError::PollLimitReached {
                        job_id: job_id.to_string(),
                        polls,
                        last_progress,
                    });
                }
            }

            sleeper.sleep(self.poll_interval);

            let status = api.job_status(job_id)?;
            polls = polls.saturating_add(1);
            last_progress = status.progress;

            info!(
                job_id,
                provider = %status.provider_name,
                provider_job_id = %status.provider_job_id,
                status = %status.status,
                progress = status.progress,
                "Job {} is at {}% completion",
                job_id,
                status.progress
            );

            if status.is_complete() {
                return Ok(status);
            }
        }
    }
}
