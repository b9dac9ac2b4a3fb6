//! Command execution.
//!
//! Every command writes its user-facing output to the given writer; logs go
//! to stderr through `tracing`.

use super::{Command, JournalCommand, MonthArgs, ReminderCommand, ReminderFields};
use crate::ai::{decode_pcm16, GeminiClient};
use crate::auth::{AuthFlow, AuthStep, Session};
use crate::breathing::{BreathingTimer, CYCLE};
use crate::config::Config;
use crate::constants::{NO_DATA_LABEL, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
use crate::errors::{AppError, AppResult};
use crate::insights::mood_label;
use crate::journal::{JournalEntry, JournalStore};
use crate::learn::Library;
use crate::reminders::{Reminder, ReminderDraft, ReminderStore, SystemClock};
use crate::server;
use crate::storage::{FileStore, SharedStore};
use crate::stress::{ChartView, StressChart};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs `command`, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if storage cannot be opened or written, the server cannot
/// start, the AI service fails for a command that has no fallback, or `out`
/// cannot be written.
pub fn run(command: Command, config: &Config, out: &mut impl Write) -> AppResult<()> {
    match command {
        Command::Serve => block_on(server::serve(config)),
        Command::Journal { command } => run_journal(command, open_store(config)?, out),
        Command::Reminder { command } => run_reminder(command, open_store(config)?, out),
        Command::Tip => {
            let tip = GeminiClient::from_config(config).generate_daily_tip();
            writeln!(out, "{}", tip.title)?;
            writeln!(out, "{}", tip.content)?;
            Ok(())
        }
        Command::Breathe { cycles } => block_on(breathe(cycles, out)),
        Command::Guided {
            topic,
            minutes,
            output,
        } => {
            let client = GeminiClient::from_config(config);
            let audio = client.generate_guided_meditation(&topic, minutes)?;
            fs::write(&output, &audio)?;
            let buffer = decode_pcm16(&audio, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS);
            info!("Wrote guided meditation to {}", output.display());
            writeln!(
                out,
                "{} ({:.1}s)",
                output.display(),
                buffer.duration_secs()
            )?;
            Ok(())
        }
        Command::Stress { monthly, period } => stress(monthly, period, out),
        Command::Articles { id } => articles(id, out),
        Command::Login => {
            let mut flow = AuthFlow::new(Session::new(open_store(config)?));
            flow.finish_splash();
            if flow.step() == AuthStep::Complete {
                writeln!(out, "Already signed in")?;
                return Ok(());
            }
            flow.finish_onboarding();
            flow.submit_login()?;
            writeln!(out, "Signed in")?;
            Ok(())
        }
        Command::Logout => {
            let mut flow = AuthFlow::new(Session::new(open_store(config)?));
            flow.finish_splash();
            if flow.step() != AuthStep::Complete {
                writeln!(out, "Not signed in")?;
                return Ok(());
            }
            flow.log_out()?;
            writeln!(out, "Signed out")?;
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> AppResult<SharedStore> {
    Ok(Arc::new(FileStore::open(&config.data_dir)?))
}

fn block_on<F>(future: F) -> AppResult<()>
where
    F: std::future::Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn run_journal(command: JournalCommand, storage: SharedStore, out: &mut impl Write) -> AppResult<()> {
    let mut journal = JournalStore::load(storage);

    match command {
        JournalCommand::Save {
            period,
            day,
            mood,
            text,
        } => {
            let month = period.selection();
            let text = text.join(" ");
            journal.month(month).upsert(day, mood, &text)?;
            if text.trim().is_empty() {
                writeln!(out, "Cleared {} {}", day, month)?;
            } else {
                writeln!(out, "Saved {} {} {}", day, month, mood.icon())?;
            }
        }
        JournalCommand::Show { period } => {
            let month = period.selection();
            writeln!(out, "{}", month)?;
            for (day, entry) in journal.month(month).entries() {
                write_entry(out, day, entry)?;
            }
        }
        JournalCommand::Search { period, query } => {
            let month = period.selection();
            let view = journal.month(month);
            let matches = view.search(&query);
            debug!("Search '{}' in {} matched {} entries", query, month, matches.len());
            for (day, entry) in matches {
                write_entry(out, day, entry)?;
            }
        }
        JournalCommand::Stats { period } => {
            let month = period.selection();
            let view = journal.month(month);
            let count = view.entries().len();
            let score = view.average_mood_score();
            if count == 0 {
                writeln!(out, "{}: {}", month, NO_DATA_LABEL)?;
            } else {
                writeln!(
                    out,
                    "{}: {} ({:.2}, {} entries)",
                    month,
                    mood_label(score),
                    score,
                    count
                )?;
            }
        }
    }
    Ok(())
}

fn write_entry(out: &mut impl Write, day: u32, entry: &JournalEntry) -> AppResult<()> {
    writeln!(
        out,
        "{:>2} {} {}  {}",
        day,
        entry.mood.icon(),
        entry.mood.label(),
        entry.text
    )?;
    Ok(())
}

fn run_reminder(command: ReminderCommand, storage: SharedStore, out: &mut impl Write) -> AppResult<()> {
    let mut reminders = ReminderStore::load(storage, Arc::new(SystemClock));

    match command {
        ReminderCommand::List => {
            for reminder in reminders.list() {
                write_reminder(out, reminder)?;
            }
        }
        ReminderCommand::Add { fields } => {
            let reminder = reminders.add(to_draft(fields))?;
            write_reminder(out, &reminder)?;
        }
        ReminderCommand::Edit {
            id,
            fields,
            enable,
            disable,
        } => {
            let mut draft = to_draft(fields);
            if enable || disable {
                draft = draft.active(enable);
            }
            match reminders.update(id, draft)? {
                Some(reminder) => write_reminder(out, &reminder)?,
                None => return Err(unknown_reminder(id)),
            }
        }
        ReminderCommand::Remove { id } => {
            if !reminders.remove(id)? {
                return Err(unknown_reminder(id));
            }
            writeln!(out, "Removed {}", id)?;
        }
    }
    Ok(())
}

fn to_draft(fields: ReminderFields) -> ReminderDraft {
    let mut draft = ReminderDraft::default();
    if let Some(title) = fields.title {
        draft = draft.title(title);
    }
    if let Some(time) = fields.time {
        draft = draft.time(time);
    }
    if let Some(days) = fields.days {
        draft = draft.days(days);
    }
    draft
}

fn unknown_reminder(id: i64) -> AppError {
    AppError::NotFound(format!("No reminder with id {}", id))
}

fn write_reminder(out: &mut impl Write, reminder: &Reminder) -> AppResult<()> {
    let days: Vec<&str> = reminder.days.iter().map(|d| d.token()).collect();
    writeln!(
        out,
        "{}\t{}\t{}\t{} [{}]\t{}",
        reminder.id,
        reminder.time,
        reminder.title,
        reminder.frequency_label(),
        days.join(","),
        if reminder.active { "on" } else { "off" }
    )?;
    Ok(())
}

async fn breathe(cycles: u32, out: &mut impl Write) -> AppResult<()> {
    let (timer, mut phases) = BreathingTimer::start();
    let total = cycles as usize * CYCLE.len();

    for _ in 0..total {
        let Some(phase) = phases.recv().await else {
            break;
        };
        writeln!(out, "{}", phase.instruction())?;
        out.flush()?;
    }

    timer.stop().await;
    Ok(())
}

fn stress(monthly: bool, period: MonthArgs, out: &mut impl Write) -> AppResult<()> {
    let mut chart = StressChart::new();
    if monthly {
        chart.set_view(ChartView::Monthly);
    }
    let target = period.resolve(chart.period());
    chart.selection_mut().navigate(target);

    writeln!(out, "{}", chart.heading())?;
    for point in chart.series() {
        writeln!(out, "{}\t{}", point.name, point.value)?;
    }
    Ok(())
}

fn articles(id: Option<u32>, out: &mut impl Write) -> AppResult<()> {
    let mut library = Library::new();
    let Some(id) = id else {
        for article in library.articles() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                article.id, article.category, article.read_time, article.title
            )?;
        }
        return Ok(());
    };

    let article = library
        .open(id)
        .ok_or_else(|| AppError::NotFound(format!("No article with id {}", id)))?;
    writeln!(out, "{}", article.title)?;
    writeln!(out, "{} · {}", article.category, article.read_time)?;
    writeln!(out)?;
    writeln!(out, "{}", article.summary)?;
    for paragraph in article.body {
        writeln!(out)?;
        writeln!(out, "{}", paragraph)?;
    }
    Ok(())
}
