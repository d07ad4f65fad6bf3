use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{
    registry::ProjectPath,
    report::{CommandGenerator, ReportOutcome, ReportSession},
    utils::{clock::DefaultClock, time::format_report_date},
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct ShowCommand {
    #[arg(help = "Path to the project directory")]
    project: String,
    #[arg(
        long = "date",
        short,
        help = "Day to report on. Examples are \"yesterday\", \"2 days ago\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(
        long,
        help = "Report generator executable, invoked with the date and the project path. By default resolves git-activity-report on PATH"
    )]
    generator: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Also write the report text to a file. Days without activity and failures produce an empty file"
    )]
    output: Option<PathBuf>,
}

/// Command to process `show` command. Opens a report session for the project
/// at today, then navigates back to the requested day if one was given.
pub async fn process_show_command(
    ShowCommand {
        project,
        date,
        date_style,
        generator,
        output,
    }: ShowCommand,
) -> Result<()> {
    let target = match date {
        Some(date) => Some(parse_target_date(&date, date_style)?),
        None => None,
    };

    let project = ProjectPath::normalize(&project)?;
    let generator = generator.map(CommandGenerator::new).unwrap_or_default();

    let mut session = ReportSession::open(project, generator, Box::new(DefaultClock)).await;

    if let Some(target) = target {
        let delta = (target - session.date()).num_days();
        if delta != 0 && !session.advance(delta).await {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!(
                        "Can't show a report for {}, it hasn't happened yet",
                        format_report_date(target)
                    ),
                )
                .into());
        }
    }

    if let Some(output) = &output {
        tokio::fs::write(output, session.outcome().export_text()).await?;
    }

    println!(
        "{} - {}",
        session.project().name(),
        format_report_date(session.date())
    );
    match session.outcome() {
        ReportOutcome::Success(text) => {
            println!();
            println!("{text}");
            Ok(())
        }
        ReportOutcome::Empty => {
            println!();
            println!("No activity found for this date");
            Ok(())
        }
        ReportOutcome::Failure(reason) => {
            Err(anyhow::anyhow!("Error generating report: {reason}"))
        }
    }
}

fn parse_target_date(date: &str, date_style: DateStyle) -> Result<NaiveDate> {
    let now = Local::now();
    match parse_date_string(date, now, date_style.into()) {
        Ok(v) => Ok(v.with_timezone(&Local).date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {e}"),
            )
            .into()),
    }
}
