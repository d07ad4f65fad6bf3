use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::{registry::ProjectPath, utils::clock::Clock};

use super::{generator::ReportGenerator, ReportOutcome};

/// One opened report view: a project, the currently inspected date and the
/// outcome of the latest generation attempt. The cursor starts at today and
/// can never move past it. Sessions are not persisted, closing and reopening
/// a project always starts back at today.
pub struct ReportSession<G> {
    project: ProjectPath,
    generator: G,
    clock: Box<dyn Clock>,
    date: NaiveDate,
    outcome: ReportOutcome,
}

impl<G: ReportGenerator> ReportSession<G> {
    /// Opens a session at today's date and runs the first generation before
    /// returning, so the caller always sees an outcome matching the cursor.
    pub async fn open(project: ProjectPath, generator: G, clock: Box<dyn Clock>) -> Self {
        let date = clock.today();
        let mut session = Self {
            project,
            generator,
            clock,
            date,
            outcome: ReportOutcome::Empty,
        };
        session.reload().await;
        session
    }

    /// Re-runs the generator for the current cursor. Reports are cheap
    /// stateless-per-day artifacts, so there is no caching, every navigation
    /// regenerates in full.
    pub async fn reload(&mut self) {
        debug!("Loading report for {} on {}", self.project, self.date);
        self.outcome = match self.generator.invoke(self.date, self.project.as_str()).await {
            Ok(output) => output.into(),
            // Spawn failures surface the same way as a failing generator.
            Err(e) => ReportOutcome::Failure(format!("{e:#}")),
        };
    }

    /// Moves the cursor by `delta_days` and regenerates. Landing past today
    /// is rejected: nothing changes, the generator isn't invoked, and `false`
    /// is returned.
    pub async fn advance(&mut self, delta_days: i64) -> bool {
        let candidate = self.date + Duration::days(delta_days);
        if candidate > self.clock.today() {
            return false;
        }
        self.date = candidate;
        self.reload().await;
        true
    }

    /// Whether forward navigation is currently possible. Today is re-read
    /// from the clock, so the answer flips by itself once midnight passes.
    pub fn can_advance_forward(&self) -> bool {
        self.date < self.clock.today()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn outcome(&self) -> &ReportOutcome {
        &self.outcome
    }

    pub fn project(&self) -> &ProjectPath {
        &self.project
    }
}
