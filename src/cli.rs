//! CLI entry point and command definitions.

use crate::api::JobApi;
use crate::config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_SECS};
use crate::job_manager::{build_job_configuration, JobManager, JobRequest};
use crate::models::JobStatusResponse;
use crate::status_monitor::{Sleeper, StatusMonitor};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info};

/// Long flags that may also be written with a single dash, e.g. `-source=s3://x`.
const LONG_FLAGS: &[&str] = &[
    "source",
    "provider",
    "resolution",
    "bandwidth",
    "output",
    "no-watch",
    "dry-run",
    "payload-out",
    "api-url",
    "poll-interval",
    "max-polls",
];

/// MediaHub Client - submit transcoding jobs and follow their progress.
#[derive(Parser, Debug)]
#[command(name = "mediahub-client")]
#[command(version = "0.1.0")]
#[command(about = "Submit a transcoding job to MediaHub and poll it until completion")]
pub struct Cli {
    #[command(flatten)]
    pub job: JobArgs,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll an already submitted job until it completes
    Watch {
        /// Job ID returned when the job was created
        job_id: String,
    },
}

/// Inputs for building and submitting a job.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Source media URL
    #[arg(long, default_value = "gs/s3")]
    pub source: String,
    /// Transcoding provider name
    #[arg(long, default_value = "hybrik/bitmovin-new-sdk/MediaConvert")]
    pub provider: String,
    /// Resolution in pixels as <height>x<width>, e.g. 640x360
    #[arg(long, default_value = "pixels*pixels")]
    pub resolution: String,
    /// Video bandwidth in Mbps, e.g. 5Mbps
    #[arg(long, default_value = "Mbps")]
    pub bandwidth: String,
    /// Output video file name
    #[arg(long, default_value = "FileName")]
    pub output: String,
    /// Submit the job without polling its status
    #[arg(long)]
    pub no_watch: bool,
    /// Print the job payload instead of submitting it
    #[arg(long)]
    pub dry_run: bool,
    /// Also write the job payload JSON to this file
    #[arg(long, value_name = "PATH")]
    pub payload_out: Option<PathBuf>,
}

/// Where the API lives and how to poll it.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the MediaHub API
    #[arg(long, env = "MEDIAHUB_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,
    /// Seconds to wait before each status request
    #[arg(
        long,
        env = "MEDIAHUB_POLL_INTERVAL",
        value_name = "SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        global = true
    )]
    pub poll_interval: u64,
    /// Give up after this many status requests (default: poll until complete)
    #[arg(long, env = "MEDIAHUB_MAX_POLLS", global = true)]
    pub max_polls: Option<u32>,
}

impl JobArgs {
    pub fn to_request(&self) -> JobRequest {
        JobRequest {
            source: self.source.clone(),
            provider: self.provider.clone(),
            resolution: self.resolution.clone(),
            bandwidth: self.bandwidth.clone(),
            output: self.output.clone(),
        }
    }
}

impl ApiArgs {
    pub fn to_config(&self) -> ApiConfig {
        ApiConfig::new(&self.api_url, self.poll_interval, self.max_polls)
    }
}

/// Rewrite single-dash long flags (`-source x`, `-source=x`) to their `--` form.
///
/// The program name and anything after a bare `--` are left alone.
pub fn normalize_go_style_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let arg: OsString = arg.into();
            if i == 0 || passthrough {
                return arg;
            }

            let rewritten = arg.to_str().and_then(|s| {
                if s == "--" {
                    passthrough = true;
                    return None;
                }
                let rest = s.strip_prefix('-').filter(|rest| !rest.starts_with('-'))?;
                let name = rest.split('=').next().unwrap_or(rest);
                LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
            });

            rewritten.unwrap_or(arg)
        })
        .collect()
}

/// Handle the default command: build, submit, and optionally poll a job.
///
/// Returns the final status when the job was polled to completion.
pub fn handle_submit<A: JobApi, S: Sleeper>(
    args: &JobArgs,
    config: &ApiConfig,
    api: &A,
    sleeper: &mut S,
) -> Result<Option<JobStatusResponse>> {
    let job = build_job_configuration(&args.to_request()).context("Invalid job configuration")?;

    let payload =
        serde_json::to_string_pretty(&job).context("Could not generate the job payload")?;
    debug!(payload = %payload, "built job payload");

    if let Some(path) = &args.payload_out {
        std::fs::write(path, &payload)
            .with_context(|| format!("Failed to write payload to {}", path.display()))?;
        info!(path = %path.display(), "wrote job payload");
    }

    if args.dry_run {
        println!("{}", payload);
        return Ok(None);
    }

    let job_manager = JobManager::new(api);
    let created = job_manager
        .submit_job(&job)
        .with_context(|| format!("Failed to create job at {}", config.jobs_url()))?;

    println!("Submitted job {}", created.id);

    if args.no_watch {
        println!(
            "Job {} submitted. Use 'mediahub-client watch {}' to monitor it.",
            created.id, created.id
        );
        return Ok(None);
    }

    handle_watch(&created.id, config, api, sleeper).map(Some)
}

/// Handle the watch command.
pub fn handle_watch<A: JobApi, S: Sleeper>(
    job_id: &str,
    config: &ApiConfig,
    api: &A,
    sleeper: &mut S,
) -> Result<JobStatusResponse> {
    info!(
        job_id,
        interval_secs = config.poll_interval.as_secs(),
        "polling job status"
    );

    let monitor = StatusMonitor::new(config.poll_interval, config.max_polls);
    let status = monitor
        .poll_until_complete(api, sleeper, job_id)
        .with_context(|| format!("Failed to poll status of job {}", job_id))?;

    info!(job_id, provider = %status.provider_name, "Job has completed");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{transport_error, ScriptedApi};
    use crate::error::{ClientError, ErrorCategory};
    use std::time::Duration;

    struct NoopSleeper;

    impl Sleeper for NoopSleeper {
        fn sleep(&mut self, _duration: Duration) {}
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_go_style_args(args.iter().copied())).unwrap()
    }

    fn scenario() -> Cli {
        parse(&[
            "mediahub-client",
            "-source=s3://x",
            "-provider=hybrik",
            "-resolution=640x360",
            "-bandwidth=5Mbps",
            "-output=out.mp4",
        ])
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["mediahub-client"]);
        assert_eq!(cli.job.source, "gs/s3");
        assert_eq!(cli.job.provider, "hybrik/bitmovin-new-sdk/MediaConvert");
        assert_eq!(cli.job.resolution, "pixels*pixels");
        assert_eq!(cli.job.bandwidth, "Mbps");
        assert_eq!(cli.job.output, "FileName");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_normalize_go_style_args() {
        let args = normalize_go_style_args([
            "mediahub-client",
            "-source",
            "s3://x",
            "-bandwidth=5Mbps",
            "--output=out.mp4",
            "-h",
            "--",
            "-source",
        ]);
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec![
                "mediahub-client",
                "--source",
                "s3://x",
                "--bandwidth=5Mbps",
                "--output=out.mp4",
                "-h",
                "--",
                "-source",
            ]
        );
    }

    #[test]
    fn test_watch_subcommand_with_api_flags() {
        let cli = parse(&[
            "mediahub-client",
            "watch",
            "job-9",
            "--api-url",
            "http://mediahub:9000",
            "--max-polls",
            "4",
        ]);
        match cli.command {
            Some(Commands::Watch { job_id }) => assert_eq!(job_id, "job-9"),
            other => panic!("expected watch, got {other:?}"),
        }
        let config = cli.api.to_config();
        assert_eq!(config.jobs_url(), "http://mediahub:9000/mediahub/api/jobs");
        assert_eq!(config.max_polls, Some(4));
    }

    #[test]
    fn test_submit_and_poll_scenario() {
        let cli = scenario();
        let api = ScriptedApi::new()
            .with_created("job-1")
            .with_progress(&[10, 55, 100]);

        let status = handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper)
            .unwrap()
            .unwrap();

        assert_eq!(status.progress, 100);
        assert_eq!(api.status_calls.borrow().len(), 3);

        let submitted = api.submitted.borrow();
        let job = &submitted[0];
        let video = &job.outputs[0].transcode_settings.video;
        assert_eq!(job.provider, "hybrik");
        assert_eq!(job.source, "s3://x");
        assert_eq!(job.outputs[0].file_name, "out.mp4");
        assert_eq!(video.height, "640");
        assert_eq!(video.width, "360");
        assert_eq!(video.bitrate, "5000000");
    }

    #[test]
    fn test_invalid_input_fails_before_network() {
        let mut cli = scenario();
        cli.job.resolution = "640".to_string();
        let api = ScriptedApi::new().with_created("job-1");

        let err = handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper)
            .unwrap_err();

        let client_err = err
            .chain()
            .find_map(|e| e.downcast_ref::<ClientError>())
            .unwrap();
        assert_eq!(client_err.category(), ErrorCategory::Configuration);
        assert!(api.submitted.borrow().is_empty());
    }

    #[test]
    fn test_default_bandwidth_is_rejected() {
        let cli = parse(&["mediahub-client", "-resolution=640x360"]);
        let api = ScriptedApi::new();

        assert!(handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper).is_err());
        assert!(api.submitted.borrow().is_empty());
    }

    #[test]
    fn test_no_watch_skips_polling() {
        let mut cli = scenario();
        cli.job.no_watch = true;
        let api = ScriptedApi::new().with_created("job-1").with_progress(&[100]);

        let result =
            handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper).unwrap();

        assert!(result.is_none());
        assert_eq!(api.submitted.borrow().len(), 1);
        assert!(api.status_calls.borrow().is_empty());
    }

    #[test]
    fn test_dry_run_writes_payload_without_submitting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        let mut cli = scenario();
        cli.job.dry_run = true;
        cli.job.payload_out = Some(path.clone());
        let api = ScriptedApi::new();

        let result =
            handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper).unwrap();

        assert!(result.is_none());
        assert!(api.submitted.borrow().is_empty());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written["outputs"][0]["transcodeSettings"]["video"]["bitrate"],
            "5000000"
        );
    }

    #[test]
    fn test_poll_transport_failure_is_fatal() {
        let cli = scenario();
        let api = ScriptedApi::new()
            .with_created("job-1")
            .with_progress(&[10])
            .with_status_error(transport_error())
            .with_progress(&[100]);

        let err = handle_submit(&cli.job, &cli.api.to_config(), &api, &mut NoopSleeper)
            .unwrap_err();

        assert!(err.to_string().contains("job-1"));
        assert_eq!(api.status_calls.borrow().len(), 2);
    }
}
