//! Command-line surface.
//!
//! Argument definitions live here; [`commands`] executes them.

pub mod commands;

use crate::calendar::{CalendarSelection, Weekday};
use crate::constants::{APP_DESCRIPTION, APP_NAME};
use crate::mood::Mood;
use clap::{Args, Parser, Subcommand};

/// Journal, calendar and wellness companion
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Log output format: "text" or "json" (defaults to ASOKA_LOG_FORMAT, then text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the built web app with client-side routing
    Serve,

    /// Read and write journal entries
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },

    /// Manage meditation reminders
    Reminder {
        #[command(subcommand)]
        command: ReminderCommand,
    },

    /// Print today's wellness tip
    Tip,

    /// Run a guided box-breathing exercise
    Breathe {
        /// Number of full breaths
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=20))]
        cycles: u32,
    },

    /// Generate a spoken guided meditation as raw 24 kHz PCM16
    Guided {
        /// What the meditation should focus on
        #[arg(short, long)]
        topic: String,

        /// Approximate length in minutes
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=60))]
        minutes: u32,

        /// File to write the audio to
        #[arg(short, long)]
        output: std::path::PathBuf,
    },

    /// Print stress chart data
    Stress {
        /// Show one month day by day instead of the whole year
        #[arg(long)]
        monthly: bool,

        #[command(flatten)]
        period: MonthArgs,
    },

    /// List articles, or read one by id
    Articles {
        id: Option<u32>,
    },

    /// Complete sign-in
    Login,

    /// Sign out
    Logout,
}

/// Month selection shared by several commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct MonthArgs {
    /// Solar Hijri year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month number, 1 (Farvardin) to 12 (Esfand)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,
}

impl MonthArgs {
    /// The selected month, falling back to `default` for missing parts.
    pub fn resolve(&self, default: CalendarSelection) -> CalendarSelection {
        CalendarSelection {
            year: self.year.unwrap_or(default.year),
            month_index: self.month.map_or(default.month_index, |m| m - 1),
        }
    }

    /// The selected month, falling back to the journal's default month.
    pub fn selection(&self) -> CalendarSelection {
        self.resolve(CalendarSelection::default())
    }
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Save a day's mood and note; an empty note deletes the entry
    Save {
        #[command(flatten)]
        period: MonthArgs,

        /// Day of the month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=31))]
        day: u32,

        /// happy, calm, neutral, sad or stressed
        #[arg(long, default_value_t = Mood::Neutral)]
        mood: Mood,

        /// The note
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Show a month's entries
    Show {
        #[command(flatten)]
        period: MonthArgs,
    },

    /// Find entries whose note contains the query
    Search {
        #[command(flatten)]
        period: MonthArgs,

        query: String,
    },

    /// Show the month's average mood
    Stats {
        #[command(flatten)]
        period: MonthArgs,
    },
}

/// Fields accepted when creating or editing a reminder.
#[derive(Args, Debug, Clone, Default)]
pub struct ReminderFields {
    /// Reminder title
    #[arg(long)]
    pub title: Option<String>,

    /// Time of day as HH:MM
    #[arg(long, value_parser = parse_time)]
    pub time: Option<String>,

    /// Comma-separated days, as tokens (ش,ی) or names (sat,sunday)
    #[arg(long, value_delimiter = ',', value_parser = parse_weekday)]
    pub days: Option<Vec<Weekday>>,
}

#[derive(Subcommand, Debug)]
pub enum ReminderCommand {
    /// List reminders
    List,

    /// Add a reminder
    Add {
        #[command(flatten)]
        fields: ReminderFields,
    },

    /// Change a reminder
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ReminderFields,

        /// Turn the reminder on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Turn the reminder off
        #[arg(long)]
        disable: bool,
    },

    /// Delete a reminder
    Remove { id: i64 },
}

fn parse_weekday(raw: &str) -> Result<Weekday, String> {
    Weekday::parse(raw).ok_or_else(|| format!("unknown day '{}'", raw))
}

fn parse_time(raw: &str) -> Result<String, String> {
    if crate::reminders::is_valid_time(raw) {
        Ok(raw.to_string())
    } else {
        Err(format!("'{}' is not a HH:MM time", raw))
    }
}
