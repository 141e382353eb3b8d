//! Job Manager: builds the job payload and submits it to MediaHub.

use crate::api::JobApi;
use crate::error::Result;
use crate::models::{CreateJobResponse, JobConfiguration};
use crate::utils::{parse_bandwidth, parse_resolution};
use tracing::{debug, info};

/// Raw user inputs for a job, exactly as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub source: String,
    pub provider: String,
    /// `<height>x<width>`
    pub resolution: String,
    /// Megabits per second, unit text allowed
    pub bandwidth: String,
    pub output: String,
}

/// Build a job from the baseline template with the request's overrides applied.
///
/// Inputs are validated before anything is modified, so a bad resolution or
/// bandwidth never yields a partially populated job.
pub fn build_job_configuration(request: &JobRequest) -> Result<JobConfiguration> {
    let (height, width) = parse_resolution(&request.resolution)?;
    let bitrate = parse_bandwidth(&request.bandwidth)?;

    let mut job = JobConfiguration::baseline();
    job.provider = request.provider.clone();
    job.source = request.source.clone();

    if let Some(output) = job.outputs.first_mut() {
        output.file_name = request.output.clone();
        let video = &mut output.transcode_settings.video;
        video.height = height;
        video.width = width;
        video.bitrate = bitrate.to_string();
    }

    Ok(job)
}

/// Submits jobs through a [`JobApi`].
pub struct JobManager<'a, A: JobApi> {
    api: &'a A,
}

impl<'a, A: JobApi> JobManager<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Submit a job once and return the identifier assigned by the server.
    ///
    /// There is no retry; the first failure is returned to the caller.
    pub fn submit_job(&self, job: &JobConfiguration) -> Result<CreateJobResponse> {
        debug!(
            provider = %job.provider,
            source = %job.source,
            outputs = job.outputs.len(),
            "submitting job"
        );

        let created = self.api.create_job(job)?;

        info!(
            job_id = %created.id,
            status = %created.status,
            "Job has been created using MediaHub api"
        );

        Ok(created)
    }
}
