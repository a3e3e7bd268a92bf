mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use repeatcal_core::config::RepeatCalConfig;
use repeatcal_core::date::{parse_date, parse_time};
use repeatcal_core::error::RepeatCalError;
use repeatcal_core::event::Frequency;
use repeatcal_core::filter::View;
use repeatcal_core::notice::Notice;
use repeatcal_core::store::JsonFileStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::render::Render;

#[derive(Parser)]
#[command(name = "repeatcal")]
#[command(about = "Create recurring events and browse your calendar")]
struct Cli {
    /// Event file to use instead of `data_file` from the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log filter when REPEATCAL_LOG is not set (e.g. "debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct EventArgs {
    /// Start time (HH:MM)
    #[arg(short, long, value_parser = parse_time_arg)]
    start: Option<NaiveTime>,

    /// End time (HH:MM)
    #[arg(short, long, value_parser = parse_time_arg)]
    end: Option<NaiveTime>,

    #[arg(long)]
    description: Option<String>,

    #[arg(short, long)]
    location: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    /// Minutes before the start to notify
    #[arg(short, long)]
    notify: Option<u32>,

    /// none, daily, weekly, monthly or yearly
    #[arg(short, long)]
    repeat: Option<Frequency>,

    /// Repeat every N days/weeks/months/years
    #[arg(short, long)]
    interval: Option<u32>,

    /// Last date a repetition may fall on (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    until: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dates a recurrence rule produces
    Expand {
        /// First occurrence (YYYY-MM-DD)
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        /// daily, weekly, monthly or yearly
        #[arg(short, long, default_value = "daily")]
        repeat: Frequency,

        /// Repeat every N units
        #[arg(short, long, default_value_t = 1)]
        interval: u32,

        /// Last date (YYYY-MM-DD), defaults to one year after the start
        #[arg(short, long, value_parser = parse_date_arg)]
        until: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether a date will be adjusted for a repeat type
    Check {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        #[arg(short, long)]
        repeat: Frequency,
    },
    /// Create an event, expanding it when it repeats
    Add {
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// List stored events
    List {
        /// Only events whose title, description or location match
        #[arg(short, long, default_value = "")]
        search: String,

        /// Restrict to the week or month around --date
        #[arg(short, long)]
        view: Option<View>,

        /// Reference date for --view (defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Edit an event. Editing one occurrence of a series detaches it.
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Delete every occurrence of the event's series
        #[arg(long)]
        all: bool,
    },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, RepeatCalError> {
    parse_date(s)
}

fn parse_time_arg(s: &str) -> Result<NaiveTime, RepeatCalError> {
    parse_time(s)
}

/// Initialise tracing on stderr. REPEATCAL_LOG takes precedence over --log-level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("REPEATCAL_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Resolve the config and the event store for commands that need them.
fn open_store(store: Option<PathBuf>) -> Result<(RepeatCalConfig, JsonFileStore)> {
    let config = RepeatCalConfig::load()?;
    let path = store.unwrap_or_else(|| config.data_path());
    tracing::debug!(path = %path.display(), "using event store");
    Ok((config, JsonFileStore::new(path)))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Expand {
            date,
            repeat,
            interval,
            until,
            json,
        } => {
            let config = RepeatCalConfig::load()?;
            commands::expand::run(date, repeat, interval, until, json, config.max_occurrences)
        }
        Commands::Check { date, repeat } => commands::check::run(date, repeat),
        Commands::Add {
            title,
            date,
            fields,
        } => {
            let (config, store) = open_store(cli.store)?;
            commands::add::run(&store, title, date, fields, config.max_occurrences).await
        }
        Commands::List {
            search,
            view,
            date,
            json,
        } => {
            let (_, store) = open_store(cli.store)?;
            commands::list::run(&store, &search, view, date, json).await
        }
        Commands::Edit {
            id,
            title,
            date,
            fields,
        } => {
            let (config, store) = open_store(cli.store)?;
            commands::edit::run(&store, &id, title, date, fields, config.max_occurrences).await
        }
        Commands::Delete { id, all } => {
            let (_, store) = open_store(cli.store)?;
            commands::delete::run(&store, &id, all).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(err) = run(cli).await {
        let notice = match err.downcast_ref::<RepeatCalError>() {
            Some(e) => Notice::from_error(e),
            None => Notice::error("Error").with_description(format!("{:#}", err)),
        };
        eprintln!("{}", notice.render());
        std::process::exit(1);
    }
}
