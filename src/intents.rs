//! High-level printer commands with uniform, infallible outcomes.
//!
//! Each operation here maps one user intent ("warm the bed up", "pause the
//! print", "how long is left") onto the OctoPrint calls that carry it out,
//! and always resolves to an outcome struct instead of an error. A request
//! that never completed reports `accepted: false` with [NO_RESPONSE] as its
//! status; a request the server answered reports the real status code, with
//! `accepted` reflecting whether it was a success. Callers decide how much
//! of that detail to surface.
//!
//! Operations hold no state between calls. Each one opens its own
//! connection from the [Printer] record it is given, so concurrent calls
//! against the same or different printers never contend with each other.

use anyhow::Result;
use octoprint::StatusCode;
use serde::Serialize;

use crate::Printer;

/// Status value reported when no HTTP response arrived at all, for example
/// when the host was unreachable or the connection dropped mid-request.
pub const NO_RESPONSE: u16 = 0;

/// Outcome of a control command that carries no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Whether the printer accepted the command.
    pub accepted: bool,

    /// HTTP status the server answered with, or [NO_RESPONSE] when no
    /// response arrived.
    pub status: u16,
}

impl CommandOutcome {
    fn from_status(result: Result<StatusCode>) -> Self {
        match result {
            Ok(status) => Self {
                accepted: status.is_success(),
                status: status.as_u16(),
            },
            Err(err) => {
                tracing::warn!(error = format!("{:?}", err), "command never completed");
                Self {
                    accepted: false,
                    status: NO_RESPONSE,
                }
            }
        }
    }
}

/// Outcome of a temperature command, echoing the target actually sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    /// Whether the printer accepted the command.
    pub accepted: bool,

    /// The target temperature requested, after normalization.
    pub target: u32,

    /// HTTP status the server answered with, or [NO_RESPONSE] when no
    /// response arrived.
    pub status: u16,
}

impl TargetOutcome {
    fn from_status(result: Result<StatusCode>, target: u32) -> Self {
        match result {
            Ok(status) => Self {
                accepted: status.is_success(),
                target,
                status: status.as_u16(),
            },
            Err(err) => {
                tracing::warn!(error = format!("{:?}", err), "temperature command never completed");
                Self {
                    accepted: false,
                    target,
                    status: NO_RESPONSE,
                }
            }
        }
    }
}

/// Outcome of the remaining-time query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    /// Whether a job response was received and understood.
    pub accepted: bool,

    /// Time left rendered for display: an approximate duration, `""` when
    /// no time is left, `"Unknown"` when the server reported a negative
    /// estimate, and `"0"` when the response carried no estimate at all.
    /// `None` when there was no response body worth rendering.
    pub display: Option<String>,

    /// HTTP status the server answered with, or [NO_RESPONSE] when no
    /// response arrived.
    pub status: u16,
}

/// Requested temperatures that are absent or non-positive mean "heater
/// off" and become a target of zero.
fn normalize_target(target: Option<i32>) -> u32 {
    match target {
        Some(target) if target > 0 => target as u32,
        _ => 0,
    }
}

/// Set the heated bed's target temperature.
pub async fn set_bed_temperature(printer: &Printer, target: Option<i32>) -> TargetOutcome {
    let target = normalize_target(target);
    let result = async { printer.client()?.set_bed_target(target).await }.await;
    TargetOutcome::from_status(result, target)
}

/// Set a hotend's target temperature. The tool index defaults to the
/// first extruder when unspecified.
pub async fn set_tool_temperature(
    printer: &Printer,
    tool: Option<u32>,
    target: Option<i32>,
) -> TargetOutcome {
    let tool = tool.unwrap_or(0);
    let target = normalize_target(target);
    let result = async { printer.client()?.set_tool_target(tool, target).await }.await;
    TargetOutcome::from_status(result, target)
}

/// Turn the first extruder and the heated bed off, in that order.
///
/// The bed request is only issued once the tool request came back with a
/// success status; otherwise the tool outcome is reported as-is and the
/// bed is left alone.
pub async fn cool_down(printer: &Printer) -> CommandOutcome {
    let result = async {
        let client = printer.client()?;
        let tool = client.set_tool_target(0, 0).await?;
        if !tool.is_success() {
            return Ok(tool);
        }
        client.set_bed_target(0).await
    }
    .await;
    CommandOutcome::from_status(result)
}

/// Pause the running print job.
pub async fn pause_job(printer: &Printer) -> CommandOutcome {
    let result = async { printer.client()?.pause_job().await }.await;
    CommandOutcome::from_status(result)
}

/// Resume a paused print job.
pub async fn resume_job(printer: &Printer) -> CommandOutcome {
    let result = async { printer.client()?.resume_job().await }.await;
    CommandOutcome::from_status(result)
}

/// Cancel the running print job.
pub async fn cancel_job(printer: &Printer) -> CommandOutcome {
    let result = async { printer.client()?.cancel_job().await }.await;
    CommandOutcome::from_status(result)
}

/// Restart a paused print job from the beginning.
pub async fn restart_job(printer: &Printer) -> CommandOutcome {
    let result = async { printer.client()?.restart_job().await }.await;
    CommandOutcome::from_status(result)
}

/// Ask how much print time is left, rendered for display.
pub async fn remaining_time(printer: &Printer) -> RemainingTime {
    let result = async { printer.client()?.job_info().await }.await;
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(error = format!("{:?}", err), "job query never completed");
            return RemainingTime {
                accepted: false,
                display: None,
                status: NO_RESPONSE,
            };
        }
    };

    let status = snapshot.status.as_u16();
    match snapshot.info {
        Some(info) => {
            let display = match info.progress.print_time_left {
                Some(seconds) => format_time_left(seconds),
                // No estimate in the response renders as a literal "0".
                None => "0".to_owned(),
            };
            RemainingTime {
                accepted: true,
                display: Some(display),
                status,
            }
        }
        None => RemainingTime {
            accepted: false,
            display: None,
            status,
        },
    }
}

/// Render a seconds count of remaining print time. Zero means nothing is
/// left and renders empty; a negative count comes from servers that could
/// not produce an estimate and renders as `"Unknown"`, as does a count too
/// large for [chrono::Duration] to hold; anything else becomes an
/// approximate duration in days, hours, and minutes.
fn format_time_left(seconds: i64) -> String {
    if seconds == 0 {
        return String::new();
    }
    if seconds < 0 {
        return "Unknown".to_owned();
    }

    let left = match chrono::Duration::try_seconds(seconds) {
        Some(left) => left,
        // An estimate this far out is as nonsensical as a negative one.
        None => return "Unknown".to_owned(),
    };
    let days = left.num_days();
    let hours = left.num_hours() % 24;
    let minutes = left.num_minutes() % 60;

    let mut parts = vec![];
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}hr", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}min", minutes));
    }
    if parts.is_empty() {
        // Under a minute to go; round up rather than claim nothing is left.
        parts.push("1min".to_owned());
    }
    format!("about {}", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target(None), 0);
        assert_eq!(normalize_target(Some(0)), 0);
        assert_eq!(normalize_target(Some(-40)), 0);
        assert_eq!(normalize_target(Some(1)), 1);
        assert_eq!(normalize_target(Some(215)), 215);
    }

    #[test]
    fn test_format_time_left() {
        assert_eq!(format_time_left(0), "");
        assert_eq!(format_time_left(-5), "Unknown");
        assert_eq!(format_time_left(i64::MAX), "Unknown");
        assert_eq!(format_time_left(59), "about 1min");
        assert_eq!(format_time_left(60), "about 1min");
        assert_eq!(format_time_left(3600), "about 1hr");
        assert_eq!(format_time_left(3661), "about 1hr 1min");
        assert_eq!(format_time_left(86_400), "about 1d");
        assert_eq!(format_time_left(90_061), "about 1d 1hr 1min");
        assert_eq!(format_time_left(7_380), "about 2hr 3min");
    }
}
