//! Wire documents exchanged with the MediaHub job API.

use serde::{Deserialize, Serialize};

/// A single transcoding request: provider, source, and renditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfiguration {
    pub provider: String,
    pub source: String,
    pub outputs: Vec<OutputConfiguration>,
}

/// One rendition within a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfiguration {
    pub transcode_settings: TranscodeSettings,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeSettings {
    pub container: String,
    pub rate_control: String,
    pub two_pass: bool,
    pub video: VideoPresets,
    pub audio: AudioPresets,
}

/// Video presets. Every numeric value travels as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPresets {
    pub height: String,
    pub width: String,
    pub codec: String,
    /// Bits per second
    pub bitrate: String,
    pub gop_size: String,
    pub gop_mode: String,
    pub interlace_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPresets {
    pub codec: String,
    pub bitrate: String,
}

impl JobConfiguration {
    /// The h.264/AAC/MP4 template every submitted job starts from.
    pub fn baseline() -> Self {
        Self {
            provider: "hybrik/bitmovin-new-sdk/mediaconvert".to_string(),
            source: "gs/s3".to_string(),
            outputs: vec![OutputConfiguration {
                transcode_settings: TranscodeSettings {
                    container: "mp4".to_string(),
                    rate_control: "VBR".to_string(),
                    two_pass: false,
                    video: VideoPresets {
                        height: "640".to_string(),
                        width: "360".to_string(),
                        codec: "h264".to_string(),
                        bitrate: "1000000".to_string(),
                        gop_size: "120".to_string(),
                        gop_mode: "fixed".to_string(),
                        interlace_mode: "progressive".to_string(),
                    },
                    audio: AudioPresets {
                        codec: "aac".to_string(),
                        bitrate: "64000".to_string(),
                    },
                },
                file_name: "test.mp4".to_string(),
            }],
        }
    }
}

/// Body returned by `POST /mediahub/api/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

/// Body returned by `GET /mediahub/api/jobs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    #[serde(default)]
    pub provider_job_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub provider_name: String,
    /// Missing progress reads as 0, which keeps the job polling
    #[serde(default)]
    pub progress: i64,
}

impl JobStatusResponse {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_wire_format() {
        let json = serde_json::to_value(JobConfiguration::baseline()).unwrap();
        let output = &json["outputs"][0];

        assert_eq!(json["provider"], "hybrik/bitmovin-new-sdk/mediaconvert");
        assert_eq!(output["fileName"], "test.mp4");
        assert_eq!(output["transcodeSettings"]["rateControl"], "VBR");
        assert_eq!(output["transcodeSettings"]["twoPass"], false);
        assert_eq!(output["transcodeSettings"]["video"]["gopSize"], "120");
        assert_eq!(
            output["transcodeSettings"]["video"]["interlaceMode"],
            "progressive"
        );
        assert_eq!(output["transcodeSettings"]["audio"]["bitrate"], "64000");
    }

    #[test]
    fn test_parse_status_response() {
        let body = r#"{"providerJobId":"abc","status":"RUNNING","providerName":"hybrik","progress":55}"#;
        let status: JobStatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status.provider_job_id, "abc");
        assert_eq!(status.provider_name, "hybrik");
        assert_eq!(status.progress, 55);
        assert!(!status.is_complete());
    }

    #[test]
    fn test_status_response_missing_progress_is_zero() {
        let body = r#"{"providerJobId":"abc","status":"QUEUED"}"#;
        let status: JobStatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status.progress, 0);
        assert!(!status.is_complete());
    }

    #[test]
    fn test_create_response_tolerates_missing_status() {
        let created: CreateJobResponse = serde_json::from_str(r#"{"id":"job-1"}"#).unwrap();
        assert_eq!(created.id, "job-1");
        assert!(created.status.is_empty());
    }
}
