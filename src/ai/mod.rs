//! Generative-AI collaborator.
//!
//! This module talks to the Gemini API for the dashboard's daily tip and for
//! spoken guided meditations, and decodes the raw PCM audio the speech
//! endpoint returns.
//!
//! # Module Structure
//!
//! - `gemini`: blocking HTTP client for `generateContent`
//! - `pcm`: PCM16 to float decoding
//! - `prompts`: prompt text and builders
//!
//! # Example
//!
//! ```no_run
//! use asoka::ai::GeminiClient;
//!
//! let client = GeminiClient::new("https://generativelanguage.googleapis.com", None);
//! // Without an API key this logs a warning and returns the fallback tip.
//! let tip = client.generate_daily_tip();
//! println!("{}: {}", tip.title, tip.content);
//! ```

pub mod gemini;
pub mod pcm;
pub mod prompts;

// Re-export commonly used types
pub use gemini::{GeminiClient, Tip};
pub use pcm::{decode_pcm16, AudioBuffer};
