pub mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use show::{process_show_command, ShowCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    registry::{store::JsonRegistryStore, ProjectRegistry},
    utils::{dir::create_application_default_path, logging::enable_logging},
};

#[derive(Parser, Debug)]
#[command(name = "Daybook", version, long_about = None)]
#[command(about = "Track project directories and view per-day activity reports", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Start tracking a project directory")]
    Add {
        #[arg(help = "Path to the project directory")]
        path: String,
    },
    #[command(about = "Stop tracking a project directory")]
    Remove {
        #[arg(help = "Path to the project directory")]
        path: String,
    },
    #[command(about = "List tracked projects")]
    List {},
    #[command(about = "Show the activity report for a project on a chosen day")]
    Show {
        #[command(flatten)]
        command: ShowCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&create_application_default_path()?, logging_level, args.log)?;

    match args.commands {
        Commands::Add { path } => {
            let mut registry = open_registry().await?;
            if registry.add(&path).await? {
                println!("Added {path}");
            } else {
                println!("{path} is already tracked");
            }
            Ok(())
        }
        Commands::Remove { path } => {
            let mut registry = open_registry().await?;
            if registry.remove(&path).await? {
                println!("Removed {path}");
            } else {
                println!("{path} is not tracked");
            }
            Ok(())
        }
        Commands::List {} => {
            let registry = open_registry().await?;
            if registry.projects().is_empty() {
                println!("No projects added");
            } else {
                for project in registry.projects() {
                    println!("{}\t{}", project.name(), project);
                }
            }
            Ok(())
        }
        Commands::Show { command } => process_show_command(command).await,
    }
}

async fn open_registry() -> Result<ProjectRegistry<JsonRegistryStore>> {
    let store =
        JsonRegistryStore::new(create_application_default_path()?.join("projects.json"))?;
    Ok(ProjectRegistry::load(store).await)
}
