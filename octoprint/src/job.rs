use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::Client;

/// Body shapes accepted by `POST /api/job`. Pause and resume share one
/// command with an `action` discriminator; cancel and restart stand alone.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
enum JobCommand {
    Pause { action: PauseAction },
    Cancel,
    Restart,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum PauseAction {
    Pause,
    Resume,
}

/// Progress of the active job, as reported by `GET /api/job`.
///
/// OctoPrint reports json null for every field while no job is selected,
/// so everything here is optional.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    /// Completion of the job, in percent (0.0 to 100.0).
    pub completion: Option<f64>,

    /// Byte position within the file being printed.
    pub filepos: Option<u64>,

    /// Seconds the job has spent printing so far.
    pub print_time: Option<i64>,

    /// Estimated seconds until the job finishes. Some plugins have been
    /// seen reporting negative values here; they are passed through
    /// untouched for the caller to interpret.
    pub print_time_left: Option<i64>,
}

/// The file a job was started from.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JobFile {
    /// Display name of the file.
    pub name: Option<String>,

    /// Storage location, `local` or `sdcard`.
    pub origin: Option<String>,

    /// Path of the file relative to its origin's root.
    pub path: Option<String>,

    /// Size in bytes, when known.
    pub size: Option<u64>,
}

/// Details about the selected job.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    /// The file being printed.
    pub file: Option<JobFile>,

    /// Estimate for the full print, in seconds.
    pub estimated_print_time: Option<f64>,

    /// User that started the job.
    pub user: Option<String>,
}

/// Decoded response to a job query.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JobInformation {
    /// Details about the selected job, if any.
    pub job: Option<JobDetails>,

    /// Progress of the active job. A response without this mapping does
    /// not decode at all, which callers see as `info: None` on the
    /// [JobSnapshot].
    pub progress: JobProgress,

    /// Human readable state ("Operational", "Printing", "Paused", ...).
    pub state: Option<String>,
}

/// A [JobInformation] paired with the HTTP status it arrived with.
#[derive(Clone, Debug)]
pub struct JobSnapshot {
    /// Status the server answered with.
    pub status: StatusCode,

    /// Decoded body, or `None` when the body was not the expected job
    /// structure. The status above still reports what the server said.
    pub info: Option<JobInformation>,
}

impl Client {
    /// Pause the current job.
    pub async fn pause_job(&self) -> Result<StatusCode> {
        self.issue_job_command(JobCommand::Pause {
            action: PauseAction::Pause,
        })
        .await
    }

    /// Resume a paused job.
    pub async fn resume_job(&self) -> Result<StatusCode> {
        self.issue_job_command(JobCommand::Pause {
            action: PauseAction::Resume,
        })
        .await
    }

    /// Cancel the current job.
    pub async fn cancel_job(&self) -> Result<StatusCode> {
        self.issue_job_command(JobCommand::Cancel).await
    }

    /// Restart the current job from the beginning of the selected file.
    /// OctoPrint only honors this while the job is paused.
    pub async fn restart_job(&self) -> Result<StatusCode> {
        self.issue_job_command(JobCommand::Restart).await
    }

    async fn issue_job_command(&self, command: JobCommand) -> Result<StatusCode> {
        let response = self.request(Method::POST, "/api/job").json(&command).send().await?;
        Ok(response.status())
    }

    /// Query the current job, its progress, and the printer state.
    pub async fn job_info(&self) -> Result<JobSnapshot> {
        tracing::debug!(base = self.url_base, "requesting job information");
        let response = self.request(Method::GET, "/api/job").send().await?;
        let status = response.status();
        let body: bytes::Bytes = response.bytes().await?;

        let info = match serde_json::from_slice(&body) {
            Ok(info) => Some(info),
            Err(err) => {
                tracing::debug!(
                    status = status.as_u16(),
                    error = format!("{}", err),
                    "job response body did not decode"
                );
                None
            }
        };

        Ok(JobSnapshot { status, info })
    }
}
