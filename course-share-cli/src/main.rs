//! Catalog browser and share-link builder.

mod commands;

use std::env;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "course-share")]
#[command(about = "Browse course catalogs and build shareable ICS links")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog API base URL (falls back to COURSE_SHARE_API)
    #[arg(long)]
    endpoint: Option<String>,

    /// Origin used for generated share links (falls back to COURSE_SHARE_ORIGIN)
    #[arg(long)]
    origin: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available calendars with their tab indices
    Calendars,

    /// List the courses of one calendar
    Courses {
        /// Calendar name, as listed by `calendars`
        calendar: String,

        /// Also list each course's types
        #[arg(long)]
        types: bool,
    },

    /// Build a share link from a sequence of course toggles
    Link {
        /// Courses to toggle, as <calendar>/<course>
        #[arg(required = true)]
        courses: Vec<String>,
    },

    /// Show when the catalog was last synced
    Status,
}

fn resolve_endpoint(arg: Option<String>) -> Result<String> {
    arg.or_else(|| env::var("COURSE_SHARE_API").ok())
        .ok_or_else(|| anyhow::anyhow!("catalog endpoint is required (--endpoint or COURSE_SHARE_API)"))
}

fn resolve_origin(arg: Option<String>) -> Result<String> {
    arg.or_else(|| env::var("COURSE_SHARE_ORIGIN").ok())
        .ok_or_else(|| anyhow::anyhow!("share-link origin is required (--origin or COURSE_SHARE_ORIGIN)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        endpoint,
        origin,
        verbose,
    } = Cli::parse();

    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!(
                        "course_share_cli={level},course_share_core={level}",
                        level = log_level
                    )
                    .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match command {
        Commands::Calendars => {
            let endpoint = resolve_endpoint(endpoint)?;
            commands::calendars_command(&endpoint).await
        }

        Commands::Courses { calendar, types } => {
            let endpoint = resolve_endpoint(endpoint)?;
            commands::courses_command(&endpoint, &calendar, types).await
        }

        Commands::Link { courses } => {
            let origin = resolve_origin(origin)?;
            commands::link_command(&origin, courses)
        }

        Commands::Status => {
            let endpoint = resolve_endpoint(endpoint)?;
            commands::status_command(&endpoint).await
        }
    }
}
