use std::{path::PathBuf, process::Stdio};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::utils::time::format_report_date;

/// Captured result of one generator run. `exit_code` is `None` when the
/// process was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl GeneratorOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<std::process::Output> for GeneratorOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Contract the external report generator must implement. An `Err` means the
/// generator never ran (couldn't be spawned); everything it reported itself is
/// carried inside [GeneratorOutput].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn invoke(&self, date: NaiveDate, project_path: &str) -> Result<GeneratorOutput>;
}

/// Runs the configured generator program with two positional arguments, the
/// date as `YYYY-MM-DD` and the project path. Nothing is written to its stdin.
pub struct CommandGenerator {
    program: PathBuf,
}

/// Program looked up on PATH when no generator is configured explicitly.
pub const DEFAULT_GENERATOR_PROGRAM: &str = "git-activity-report";

impl CommandGenerator {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_GENERATOR_PROGRAM))
    }
}

#[async_trait]
impl ReportGenerator for CommandGenerator {
    async fn invoke(&self, date: NaiveDate, project_path: &str) -> Result<GeneratorOutput> {
        let date = format_report_date(date);
        debug!("Running {:?} for date {date} and path {project_path}", self.program);

        let output = tokio::process::Command::new(&self.program)
            .arg(&date)
            .arg(project_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Couldn't run report generator {:?}", self.program))?;

        Ok(output.into())
    }
}
