mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use calrep_core::SemesterTemplate;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calrep")]
#[command(about = "Replicate professor events between semester calendars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replicate professor events from a source calendar onto a target
    Replicate {
        /// Source calendar JSON file
        source: PathBuf,

        /// Target calendar JSON file
        target: PathBuf,

        /// Semester template JSON (defaults to the built-in template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Write the target calendar with the placed events merged in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the unplaced entries to this JSON file for later resolution
        #[arg(short, long)]
        unplaced: Option<PathBuf>,
    },
    /// Show a calendar's evaluation window and workable space
    Space {
        /// Calendar JSON file
        calendar: PathBuf,

        /// Semester template JSON (defaults to the built-in template)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
    /// Place a pending unplaced event on a chosen date
    Place {
        /// Unplaced-store JSON file written by `replicate --unplaced`
        store: PathBuf,

        /// Entry id, as shown in the replicate output
        id: String,

        /// Target date (YYYY-MM-DD)
        date: NaiveDate,

        /// Calendar JSON file that receives the event
        #[arg(short, long)]
        calendar: PathBuf,

        /// Where to write the updated calendar (defaults to in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dismiss a pending unplaced event
    Dismiss {
        /// Unplaced-store JSON file written by `replicate --unplaced`
        store: PathBuf,

        /// Entry id, as shown in the replicate output
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replicate {
            source,
            target,
            template,
            output,
            unplaced,
        } => {
            let template = load_template(template.as_deref())?;
            commands::replicate::run(
                &source,
                &target,
                &template,
                output.as_deref(),
                unplaced.as_deref(),
            )
        }
        Commands::Space { calendar, template } => {
            let template = load_template(template.as_deref())?;
            commands::space::run(&calendar, &template)
        }
        Commands::Place {
            store,
            id,
            date,
            calendar,
            output,
        } => commands::unplaced::place(&store, &id, date, &calendar, output.as_deref()),
        Commands::Dismiss { store, id } => commands::unplaced::dismiss(&store, &id),
    }
}

fn load_template(path: Option<&Path>) -> Result<SemesterTemplate> {
    match path {
        Some(path) => Ok(SemesterTemplate::load(path)?),
        None => Ok(SemesterTemplate::fallback()),
    }
}
