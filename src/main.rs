use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nextday::commands::{events, tasks, upcoming};
use nextday::Settings;
use nextday_google::Services;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nextday")]
#[command(about = "Snapshot tomorrow's Google Calendar events and Google Tasks to JSON files")]
struct Cli {
    /// Defaults to `tasks` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tomorrow's tasks from every task list
    Tasks {
        /// Time zone for the window (defaults to default_time_zone from settings)
        #[arg(long)]
        tz: Option<String>,
    },
    /// Fetch tomorrow's events from every calendar, each in its own time zone
    Events,
    /// Print the next few events on the primary calendar
    Upcoming,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    let services = Services::init(&settings.google())
        .await
        .context("Failed to set up Google services")?;

    match cli.command.unwrap_or(Commands::Tasks { tz: None }) {
        Commands::Tasks { tz } => cmd_tasks(&services, &settings, tz).await,
        Commands::Events => cmd_events(&services, &settings).await,
        Commands::Upcoming => cmd_upcoming(&services, &settings).await,
    }
}

async fn cmd_tasks(services: &Services, settings: &Settings, tz: Option<String>) -> Result<()> {
    let tz = tz.unwrap_or_else(|| settings.default_time_zone.clone());
    let tasks = tasks::fetch_all_tasks(services, settings, &tz).await?;

    println!("{}", serde_json::to_string(&tasks)?);
    Ok(())
}

async fn cmd_events(services: &Services, settings: &Settings) -> Result<()> {
    let events = events::fetch_all_events(services, settings).await?;

    println!("{}", serde_json::to_string(&events)?);
    Ok(())
}

async fn cmd_upcoming(services: &Services, settings: &Settings) -> Result<()> {
    println!("Getting the upcoming {} events", settings.upcoming_max_results);

    let Some(events) = upcoming::fetch_upcoming(services, settings).await? else {
        return Ok(());
    };

    if events.is_empty() {
        println!("No upcoming events found.");
        return Ok(());
    }

    for event in &events {
        println!("{} {}", event.start_date, event.summary);
    }

    Ok(())
}
