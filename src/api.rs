//! HTTP access to the MediaHub job API.

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};
use crate::models::{CreateJobResponse, JobConfiguration, JobStatusResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Operations the submitter and poller need from the job API.
pub trait JobApi {
    /// Create a job and return the server's acknowledgement.
    fn create_job(&self, job: &JobConfiguration) -> Result<CreateJobResponse>;

    /// Fetch the current status of a job.
    fn job_status(&self, job_id: &str) -> Result<JobStatusResponse>;
}

/// Blocking `reqwest` implementation of [`JobApi`].
pub struct HttpJobApi {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

impl HttpJobApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    /// Send a request and decode the JSON body.
    ///
    /// The response is consumed on every path, which returns its connection.
    fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T> {
        let transport = |e: reqwest::Error| ClientError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        debug!(url, status = status.as_u16(), body = %body, "received response");

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl JobApi for HttpJobApi {
    fn create_job(&self, job: &JobConfiguration) -> Result<CreateJobResponse> {
        let url = self.config.jobs_url();
        let payload = serde_json::to_string(job).map_err(|e| ClientError::Encode(e.to_string()))?;

        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);

        self.execute(&url, request)
    }

    fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let url = self.config.status_url(job_id);
        let request = self.client.get(&url);
        self.execute(&url, request)
    }
}
