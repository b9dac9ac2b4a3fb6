/*!
# Asoka

Asoka is a wellness companion for office workers. It keeps a mood journal on
a Solar Hijri calendar, manages meditation reminders, runs breathing and
meditation sessions, shows a stress chart and a small article library, and
fetches generated tips and spoken guided meditations from a generative-AI
service. A small static host serves the built web front-end.

## Core Features

- One mood and note per calendar day, with search and a monthly mood average
- A two-level date picker (month grid and year list) driving every calendar view
- Meditation reminders with derived frequency labels
- Box breathing and timed meditation sessions with ambient audio
- Daily tips and guided meditation audio from the AI service, with fallbacks

## Architecture

State lives in plain structs with explicit operations. Durable state goes
through the `KeyValueStore` trait so tests can swap in memory storage.

- `storage`: key-value persistence (file and memory backends)
- `calendar`, `date_picker`: month math and the picker state machine
- `journal`, `insights`, `dashboard`: journal data and the dashboard view model
- `reminders`, `swipe`: reminder store and swipe-to-delete gestures
- `breathing`, `meditation`: timed exercises
- `stress`, `learn`, `notifications`, `auth`: remaining screens
- `ai`: generative-AI client and PCM decoding
- `server`: static SPA host
- `cli`, `config`, `logging`, `errors`: application plumbing

## Usage Example

```rust
use asoka::calendar::CalendarSelection;
use asoka::journal::JournalStore;
use asoka::mood::Mood;

fn main() -> asoka::AppResult<()> {
    let mut journal = JournalStore::in_memory();
    let month = CalendarSelection::default();

    journal.month(month).upsert(3, Mood::Calm, "Walked at lunch")?;
    assert_eq!(journal.month(month).average_mood_score(), 4.0);
    Ok(())
}
```
*/

/// Generative-AI client and audio decoding
pub mod ai;
/// Sign-in flow and session flag
pub mod auth;
/// Box-breathing exercise
pub mod breathing;
/// Solar Hijri month and weekday model
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Dashboard view model
pub mod dashboard;
/// Month/year picker
pub mod date_picker;
/// Error types and utilities for error handling
pub mod errors;
/// Journal statistics and search
pub mod insights;
/// Journal entries and their persistence
pub mod journal;
/// Article library
pub mod learn;
/// Tracing subscriber setup
pub mod logging;
/// Meditation sessions and ambient audio
pub mod meditation;
/// Mood vocabulary
pub mod mood;
/// In-app notifications
pub mod notifications;
/// Meditation reminders
pub mod reminders;
/// Static host for the web front-end
pub mod server;
/// Durable key-value storage
pub mod storage;
/// Stress chart
pub mod stress;
/// Swipe-to-delete gesture
pub mod swipe;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
