//! Constants used throughout the application.
//!
//! This module contains all constants used in the Asoka application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "asoka";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Journal, calendar and wellness companion for office workers";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "asoka";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the durable storage directory.
pub const ENV_VAR_DATA_DIR: &str = "ASOKA_DATA_DIR";
/// Environment variable for the directory holding the built web assets.
pub const ENV_VAR_DIST_DIR: &str = "ASOKA_DIST_DIR";
/// Environment variable for the static host port.
pub const ENV_VAR_PORT: &str = "PORT";
/// Environment variable holding the generative-AI API key.
pub const ENV_VAR_API_KEY: &str = "API_KEY";
/// Environment variable overriding the generative-AI base URL.
pub const ENV_VAR_AI_BASE_URL: &str = "ASOKA_AI_BASE_URL";
/// Environment variable for the log level.
pub const ENV_VAR_LOG_LEVEL: &str = "ASOKA_LOG_LEVEL";
/// Environment variable for the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "ASOKA_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for durable storage within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/asoka";
/// Default directory holding the built web assets.
pub const DEFAULT_DIST_DIR: &str = "dist";
/// Default port of the static host.
pub const DEFAULT_PORT: u16 = 3000;
/// Entry document answered for every client-side route.
pub const INDEX_DOCUMENT: &str = "index.html";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Durable Storage
/// Storage key of the login flag.
pub const STORAGE_KEY_LOGGED_IN: &str = "asoka_logged_in";
/// Storage key of the reminder list.
pub const STORAGE_KEY_REMINDERS: &str = "serenify_reminders";
/// Storage key of the journal entries.
pub const STORAGE_KEY_JOURNAL: &str = "asoka_journal";
/// Version tag written into every stored collection.
pub const STORAGE_FORMAT_VERSION: u32 = 1;
/// File extension for stored values.
pub const STORAGE_FILE_EXTENSION: &str = "json";
/// Name of the lock file guarding the storage directory.
pub const STORAGE_LOCK_FILE: &str = ".lock";

// Calendar
/// Year shown before the user picks anything (Solar Hijri).
pub const DEFAULT_YEAR: i32 = 1402;
/// Month shown before the user picks anything (Mehr).
pub const DEFAULT_MONTH_INDEX: u8 = 6;
/// Number of day slots rendered for every month.
pub const DAY_SLOTS: u32 = 31;

/// Day of month the dashboard grid highlights as today
pub const HIGHLIGHTED_TODAY: u32 = 24;
/// First year offered by the date picker.
pub const PICKER_FIRST_YEAR: i32 = 1350;
/// Last year offered by the date picker.
pub const PICKER_LAST_YEAR: i32 = 1450;
/// Months in a year.
pub const MONTHS_PER_YEAR: u8 = 12;

// Aggregation
/// Label shown when there is no journal data to average.
pub const NO_DATA_LABEL: &str = "---";

// Swipe gesture
/// Furthest a row may be dragged to the left.
pub const SWIPE_MAX_DRAG: f64 = -120.0;
/// Offset a row rests at while its delete action is revealed.
pub const SWIPE_REVEAL_OFFSET: f64 = -80.0;
/// A release beyond this offset reveals the delete action.
pub const SWIPE_REVEAL_THRESHOLD: f64 = -50.0;

// Timers
/// Duration of a single breathing phase in milliseconds.
pub const BREATHING_PHASE_MS: u64 = 4000;
/// Meditation session tick in milliseconds.
pub const MEDITATION_TICK_MS: u64 = 1000;
/// Volume ambient sounds are played at.
pub const AMBIENT_VOLUME: f32 = 0.8;

// Reminders
/// Title proposed for a new reminder.
pub const DEFAULT_REMINDER_TITLE: &str = "مدیتیشن";
/// Time proposed for a new reminder.
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

// Generative AI
/// Default base URL of the generative-AI service.
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used for daily tips.
pub const TIP_MODEL: &str = "gemini-3-flash-preview";
/// Model used for spoken guided meditations.
pub const SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
/// Prebuilt voice used for guided meditations.
pub const SPEECH_VOICE: &str = "Kore";
/// Sample rate of synthesized speech.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
/// Channel count of synthesized speech.
pub const SPEECH_CHANNELS: usize = 1;
/// Divisor normalizing signed 16-bit samples into [-1.0, 1.0).
pub const PCM16_SCALE: f32 = 32768.0;
/// Title of the tip shown when generation fails.
pub const FALLBACK_TIP_TITLE: &str = "نفس عمیق بکشید";
/// Content of the tip shown when generation fails.
pub const FALLBACK_TIP_CONTENT: &str =
    "لحظه‌ای مکث کنید. ۴ ثانیه دم عمیق، ۴ ثانیه حبس و ۴ ثانیه بازدم. ذهن خود را آرام کنید.";
