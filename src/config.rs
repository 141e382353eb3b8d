//! Endpoint and polling settings for the MediaHub job API.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8082";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

const JOBS_PATH: &str = "/mediahub/api/jobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    /// `None` polls until the job reports completion
    pub max_polls: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_polls: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, poll_interval_secs: u64, max_polls: Option<u32>) -> Self {
        Self {
            base_url: base_url.to_string(),
            poll_interval: Duration::from_secs(poll_interval_secs),
            max_polls,
        }
    }

    /// Job creation endpoint.
    pub fn jobs_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), JOBS_PATH)
    }

    /// Status endpoint for a single job.
    pub fn status_url(&self, job_id: &str) -> String {
        format!("{}/{}", self.jobs_url(), job_id)
    }
}
