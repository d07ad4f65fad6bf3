//! Per-day activity reports for a single project. The actual report text is
//! produced by an external generator program, this module only drives it and
//! classifies what came back.

pub mod generator;
pub mod session;

pub use generator::{CommandGenerator, GeneratorOutput, ReportGenerator};
pub use session::ReportSession;

/// Result of one generation attempt. Replaced wholesale on every reload,
/// never merged with a previous outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The generator produced report text. Held trimmed, exactly as shown.
    Success(String),
    /// The generator ran fine but the day holds no activity.
    Empty,
    /// The generator could not be started or signaled failure. The text is
    /// the best diagnostic available for display.
    Failure(String),
}

impl ReportOutcome {
    /// Text of the currently displayed report for export sinks (clipboard,
    /// file). Only a successful report carries meaningful text.
    pub fn export_text(&self) -> &str {
        match self {
            ReportOutcome::Success(text) => text,
            ReportOutcome::Empty | ReportOutcome::Failure(_) => "",
        }
    }
}

impl From<GeneratorOutput> for ReportOutcome {
    fn from(output: GeneratorOutput) -> Self {
        if !output.succeeded() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return if diagnostic.is_empty() {
                match output.exit_code {
                    Some(code) => ReportOutcome::Failure(format!(
                        "report generator exited with status {code}"
                    )),
                    None => ReportOutcome::Failure(
                        "report generator was terminated by a signal".to_string(),
                    ),
                }
            } else {
                ReportOutcome::Failure(diagnostic)
            };
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            ReportOutcome::Empty
        } else {
            ReportOutcome::Success(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneratorOutput, ReportOutcome};

    fn output(exit_code: Option<i32>, stdout: &[u8], stderr: &[u8]) -> GeneratorOutput {
        GeneratorOutput {
            exit_code,
            stdout: stdout.to_vec(),
            stderr: stderr.to_vec(),
        }
    }

    #[test]
    fn test_successful_output_is_trimmed_text() {
        let outcome = ReportOutcome::from(output(Some(0), b"3 commits\nfix bug\n", b""));
        assert_eq!(outcome, ReportOutcome::Success("3 commits\nfix bug".into()));
    }

    #[test]
    fn test_blank_output_is_empty() {
        assert_eq!(ReportOutcome::from(output(Some(0), b"", b"")), ReportOutcome::Empty);
        assert_eq!(
            ReportOutcome::from(output(Some(0), b" \n\t\n", b"")),
            ReportOutcome::Empty
        );
    }

    #[test]
    fn test_nonzero_exit_carries_stderr() {
        let outcome = ReportOutcome::from(output(Some(1), b"", b"not a git repository\n"));
        assert_eq!(outcome, ReportOutcome::Failure("not a git repository".into()));
    }

    #[test]
    fn test_nonzero_exit_without_stderr_names_status() {
        let outcome = ReportOutcome::from(output(Some(2), b"", b""));
        assert_eq!(
            outcome,
            ReportOutcome::Failure("report generator exited with status 2".into())
        );
    }

    #[test]
    fn test_signal_termination_is_failure() {
        assert!(matches!(
            ReportOutcome::from(output(None, b"", b"")),
            ReportOutcome::Failure(_)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let outcome = ReportOutcome::from(output(Some(0), b"commit \xff message", b""));
        let ReportOutcome::Success(text) = outcome else {
            panic!("expected success");
        };
        assert!(text.starts_with("commit "));
        assert!(text.ends_with(" message"));
    }

    #[test]
    fn test_export_text_is_verbatim_for_success_only() {
        let success = ReportOutcome::Success("3 commits\nfix bug".into());
        assert_eq!(success.export_text(), "3 commits\nfix bug");

        assert_eq!(ReportOutcome::Empty.export_text(), "");
        assert_eq!(ReportOutcome::Failure("boom".into()).export_text(), "");
    }
}
