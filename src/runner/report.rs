//! Results of a run.

use std::time::Duration;

use serde::Serialize;

/// Final state of a primary step in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step ran and succeeded.
    Completed,

    /// The step ran and failed.
    Failed,

    /// The step was not eligible under the group filter.
    Skipped,

    /// The run was aborted before or while handling this step.
    Aborted,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Completed => '✓',
            StepStatus::Failed => '✗',
            StepStatus::Skipped => '○',
            StepStatus::Aborted => '⊘',
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
            StepStatus::Aborted => "aborted",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one primary step, including its hooks.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Step identity.
    pub identity: String,

    /// Display name.
    pub name: String,

    /// Final status.
    pub status: StepStatus,

    /// Hooks around this step that failed.
    pub failed_hooks: Vec<String>,

    /// Error message from the step itself, if it failed.
    pub error: Option<String>,

    /// Time spent on the step and its hooks.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl StepOutcome {
    /// Generate a summary line for display.
    pub fn summary_line(&self) -> String {
        let status = self.status;
        match status {
            StepStatus::Completed if self.failed_hooks.is_empty() => format!(
                "{} {} ({})",
                status.display_char(),
                self.name,
                format_duration(self.duration)
            ),
            StepStatus::Completed => format!(
                "{} {} ({}, hook failures: {})",
                status.display_char(),
                self.name,
                format_duration(self.duration),
                self.failed_hooks.join(", ")
            ),
            StepStatus::Failed => {
                let error = self.error.as_deref().unwrap_or("unknown error");
                format!("{} {} - {}", status.display_char(), self.name, error)
            }
            StepStatus::Skipped => format!("{} {} (not in group filter)", status.display_char(), self.name),
            StepStatus::Aborted => format!("{} {} (run aborted)", status.display_char(), self.name),
        }
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// The verdict: no stop-worthy failure and no error was reported.
    pub success: bool,

    /// Whether a stop flag cut the run short.
    pub aborted: bool,

    /// Error message when ordering could not be resolved.
    pub resolution_error: Option<String>,

    /// Outcomes for every primary step considered, in execution order.
    pub steps: Vec<StepOutcome>,

    /// Whether the failure steps ran.
    pub failure_steps_ran: bool,

    /// Error-level messages reported.
    pub errors: usize,

    /// Warning-level messages reported.
    pub warnings: usize,

    /// Total duration.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RunReport {
    /// Count steps with a given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// Identities of steps with a given status.
    pub fn with_status(&self, status: StepStatus) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.status == status)
            .map(|s| s.identity.as_str())
            .collect()
    }

    /// One-line summary of the run.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} completed", self.count(StepStatus::Completed)),
            format!("{} failed", self.count(StepStatus::Failed)),
            format!("{} skipped", self.count(StepStatus::Skipped)),
        ];
        let aborted = self.count(StepStatus::Aborted);
        if aborted > 0 {
            parts.push(format!("{} not run", aborted));
        }
        format!("{} in {}", parts.join(", "), format_duration(self.duration))
    }
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, millis / 100)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(identity: &str, status: StepStatus) -> StepOutcome {
        StepOutcome {
            identity: identity.to_string(),
            name: identity.to_string(),
            status,
            failed_hooks: Vec::new(),
            error: None,
            duration: Duration::from_millis(250),
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(StepStatus::Completed.to_string(), "completed");
        assert_eq!(StepStatus::Aborted.to_string(), "aborted");
        assert_eq!(StepStatus::Failed.display_char(), '✗');
    }

    #[test]
    fn summary_line_for_failure_includes_error() {
        let mut failed = outcome("build.sh", StepStatus::Failed);
        failed.error = Some("exited with code Some(2)".to_string());
        let line = failed.summary_line();
        assert!(line.contains("✗"));
        assert!(line.contains("exited with code Some(2)"));
    }

    #[test]
    fn summary_line_mentions_hook_failures() {
        let mut done = outcome("build.sh", StepStatus::Completed);
        done.failed_hooks.push("report.sh".to_string());
        assert!(done.summary_line().contains("report.sh"));
    }

    #[test]
    fn report_counts_statuses() {
        let report = RunReport {
            steps: vec![
                outcome("a", StepStatus::Completed),
                outcome("b", StepStatus::Failed),
                outcome("c", StepStatus::Skipped),
                outcome("d", StepStatus::Aborted),
            ],
            ..Default::default()
        };
        assert_eq!(report.count(StepStatus::Completed), 1);
        assert_eq!(report.with_status(StepStatus::Failed), vec!["b"]);
        let summary = report.summary();
        assert!(summary.contains("1 failed"));
        assert!(summary.contains("1 not run"));
    }

    #[test]
    fn format_duration_ranges() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = RunReport {
            success: true,
            steps: vec![outcome("a", StepStatus::Completed)],
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["steps"][0]["status"], "completed");
        assert_eq!(json["steps"][0]["duration"], 250);
    }
}
