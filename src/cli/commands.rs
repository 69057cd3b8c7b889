use clap::{Args, Parser, Subcommand};
use crate::cli::abbrev;
use crate::cli::error::{user_error, validate_non_empty, validate_row_index};
use crate::cli::html::render_html_schedule;
use crate::cli::output::{format_color_legend, format_inquiry, format_schedule_table, is_tty, TableOptions};
use crate::config::Config;
use crate::contact::{self, AttemptHistory, ContactError, ContactSettings, ContactSubmission, OutboxMailer, RateLimiter, ThreadSleeper};
use crate::grid::{booking_inquiry, is_bookable, ScheduleGrid};
use crate::models::ScheduleTable;
use crate::source::ScheduleSource;
use crate::utils::{fuzzy, SystemClock};
use crate::view::{ScheduleView, ViewState};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "studiogrid")]
#[command(about = "Dance studio schedule grid - class timetables and booking inquiries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the schedule export from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Schedule export (CSV); `-` reads stdin. Defaults to schedule.source from the rc file
    #[arg(short, long)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the class schedule
    Show {
        #[command(flatten)]
        source: SourceArgs,
        /// Output the render model as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Output a standalone HTML page
        #[arg(long)]
        html: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
    /// Turn an open slot into a booking inquiry
    Book {
        /// Day column (e.g. "Tuesday")
        day: String,
        /// Row number as shown by `show`
        #[arg(long, conflicts_with = "at", required_unless_present = "at")]
        row: Option<usize>,
        /// Time label of the slot (e.g. "9:00")
        #[arg(long)]
        at: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
        /// Output the inquiry as JSON
        #[arg(long)]
        json: bool,
    },
    /// List class colors
    Colors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a contact inquiry to the studio
    Contact {
        /// Your name
        #[arg(long)]
        name: String,
        /// Your email address
        #[arg(long)]
        email: String,
        /// Your phone number
        #[arg(long)]
        phone: Option<String>,
        /// Message text (e.g. the route message from `book`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        message: Vec<String>,
    },
}

pub fn run() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Expand command abbreviations before clap sees them
    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("studiogrid".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    handle_command(cli)
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

fn handle_command(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    match cli.command {
        Commands::Show { source, json, html, no_color } => handle_show(&config, source, json, html, no_color),
        Commands::Book { day, row, at, source, json } => handle_book(&config, source, day, row, at, json),
        Commands::Colors { json } => handle_colors(&config, json),
        Commands::Contact { name, email, phone, message } => {
            handle_contact(&config, name, email, phone, message.join(" "))
        }
    }
}

fn resolve_source(config: &Config, args: &SourceArgs) -> ScheduleSource {
    match (&args.file, &config.schedule_source) {
        (Some(arg), _) => ScheduleSource::from_arg(arg),
        (None, Some(path)) => ScheduleSource::File(path.clone()),
        (None, None) => user_error(
            "No schedule export given. Use --file <path> or set schedule.source in ~/.studiogrid/rc.",
        ),
    }
}

fn load_table(config: &Config, args: &SourceArgs) -> Result<ScheduleTable> {
    let source = resolve_source(config, args);
    source
        .load()
        .with_context(|| format!("Failed to load schedule from {}", source.describe()))
}

fn handle_show(config: &Config, source_args: SourceArgs, json: bool, html: bool, no_color: bool) -> Result<()> {
    let source = resolve_source(config, &source_args);

    let mut view = ScheduleView::new();
    view.mount();
    let ticket = view.begin_load();
    let result = source.load();
    // The table is needed again for HTML inquiry links
    let table = result.as_ref().ok().cloned();
    view.complete(ticket, result, &config.colors);

    match view.into_state() {
        ViewState::Ready(grid) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else if html {
                let table = table.unwrap_or_default();
                print!("{}", render_html_schedule(&grid, &table, &config.contact_route));
            } else {
                let mut options = TableOptions::detect();
                options.use_color = options.use_color && !no_color;
                print!("{}", format_schedule_table(&grid, options));
            }
            Ok(())
        }
        ViewState::Empty => {
            if json {
                let grid = ScheduleGrid::build(&table.unwrap_or_default(), &config.colors);
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                println!("No classes scheduled.");
            }
            Ok(())
        }
        ViewState::Failed(message) => {
            anyhow::bail!("Failed to load schedule from {}: {}", source.describe(), message)
        }
        ViewState::Loading => anyhow::bail!("Schedule load did not complete"),
    }
}

fn handle_book(
    config: &Config,
    source_args: SourceArgs,
    day: String,
    row: Option<usize>,
    at: Option<String>,
    json: bool,
) -> Result<()> {
    if let Err(e) = validate_non_empty(&day, "Day") {
        user_error(&e);
    }

    let table = load_table(config, &source_args)?;
    let day_columns = table.day_columns();

    let column = match fuzzy::resolve_column(&day, &day_columns) {
        Some(column) => column.to_string(),
        None => {
            let suggestions = fuzzy::suggest_columns(&day, &day_columns, 2);
            if suggestions.is_empty() {
                user_error(&format!("Unknown day '{}'. Columns: {}", day, day_columns.join(", ")));
            }
            user_error(&format!("Unknown day '{}'. Did you mean: {}?", day, suggestions.join(", ")));
        }
    };

    let row_index = match (row, at) {
        (Some(index), _) => match validate_row_index(index, table.rows.len()) {
            Ok(index) => index,
            Err(e) => user_error(&e),
        },
        (None, Some(label)) => match table.find_row_by_time(&label) {
            Some(index) => index,
            None => user_error(&format!("No slot at '{}'", label.trim())),
        },
        (None, None) => user_error("Give the slot with --row or --at"),
    };

    if !is_bookable(&table, row_index, &column) {
        let value = table.rows[row_index].get(&column).trim().to_string();
        if !value.is_empty() {
            user_error(&format!("{} row {} is taken by '{}'", column, row_index, value));
        }
        user_error(&format!(
            "{} row {} is the second half of an hour; book the row above it",
            column, row_index
        ));
    }

    let inquiry = booking_inquiry(&table, row_index, &column, &config.contact_route)
        .context("Slot became unbookable")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inquiry)?);
    } else {
        print!("{}", format_inquiry(&inquiry));
    }
    Ok(())
}

#[derive(Serialize)]
struct ColorListing<'a> {
    default: &'a str,
    colors: Vec<ColorEntry<'a>>,
}

#[derive(Serialize)]
struct ColorEntry<'a> {
    class: &'a str,
    color: &'a str,
}

fn handle_colors(config: &Config, json: bool) -> Result<()> {
    if json {
        let listing = ColorListing {
            default: config.colors.default_token(),
            colors: config
                .colors
                .entries()
                .map(|(class, color)| ColorEntry { class, color })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", format_color_legend(&config.colors, is_tty()));
    }
    Ok(())
}

fn handle_contact(config: &Config, name: String, email: String, phone: Option<String>, message: String) -> Result<()> {
    let mut submission = ContactSubmission::new(name, email, message);
    if let Some(phone) = phone {
        submission = submission.with_phone(phone);
    }

    let settings = ContactSettings {
        studio_email: config.studio_email.clone(),
        studio_name: config.studio_name.clone(),
        retry: config.retry_policy(),
    };

    let log_path = Config::contact_log_path()?;
    let history = AttemptHistory::load(&log_path)
        .with_context(|| format!("Failed to read contact log: {}", log_path.display()))?;
    let window = chrono::Duration::from_std(config.rate_window).context("Rate window out of range")?;
    let mut limiter = RateLimiter::create(window, config.rate_max_requests, SystemClock).with_history(history);

    let mailer = OutboxMailer::new(&config.outbox_dir);
    let mut sleeper = ThreadSleeper;

    let result = contact::submit(&submission, &settings, &mailer, &mut sleeper, Some(&mut limiter));

    limiter
        .history()
        .save(&log_path)
        .with_context(|| format!("Failed to write contact log: {}", log_path.display()))?;

    match result {
        Ok(report) => {
            if report.fully_delivered() {
                println!("Thanks! Your message was sent to {}.", settings.studio_name);
            } else {
                println!("Thanks! Your message was received, but some notifications could not be sent.");
                for delivery in [&report.notification, &report.confirmation] {
                    if let Some(e) = &delivery.error {
                        eprintln!("Warning: email to {} failed after {} attempt(s): {}", delivery.to, delivery.attempts, e);
                    }
                }
            }
            Ok(())
        }
        Err(ContactError::Invalid(e)) => user_error(&e),
        Err(e @ ContactError::RateLimited(_)) => user_error(&e.to_string()),
        Err(e) => Err(e.into()),
    }
}
