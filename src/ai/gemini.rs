//! HTTP client for the Gemini `generateContent` API.
//!
//! Two calls are made: a structured JSON daily tip and a text-to-speech
//! guided meditation. The tip never fails from the caller's point of view; it
//! degrades to a fixed fallback tip. Speech errors are returned.

use super::prompts::{meditation_prompt, TIP_PROMPT};
use crate::config::Config;
use crate::constants::{
    FALLBACK_TIP_CONTENT, FALLBACK_TIP_TITLE, SPEECH_MODEL, SPEECH_VOICE, TIP_MODEL,
};
use crate::errors::{AIError, AppResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// A short wellness tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub title: String,
    pub content: String,
}

impl Tip {
    /// The tip shown when generation is unavailable.
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TIP_TITLE.to_string(),
            content: FALLBACK_TIP_CONTENT.to_string(),
        }
    }
}

/// Response from `generateContent`. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

impl GenerateResponse {
    fn first_part(&self) -> Option<&Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
    }
}

/// Client for the generative-AI service.
pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeminiClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://generativelanguage.googleapis.com")
    /// * `api_key` - API key; without one every request fails with [`AIError::MissingApiKey`]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ai_base_url.clone(), config.api_key.clone())
    }

    /// Generates a daily tip, or returns [`Tip::fallback`] on any failure.
    pub fn generate_daily_tip(&self) -> Tip {
        match self.daily_tip() {
            Ok(tip) => tip,
            Err(e) => {
                warn!("Error generating tip, using fallback: {}", e);
                Tip::fallback()
            }
        }
    }

    /// Generates a daily tip.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The API is not reachable or answers with an error status
    /// - The answer carries no text, or the text is not a `{title, content}` object
    pub fn daily_tip(&self) -> AppResult<Tip> {
        let body = json!({
            "contents": [{ "parts": [{ "text": TIP_PROMPT }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "The title of the tip." },
                        "content": { "type": "STRING", "description": "The content of the tip." }
                    },
                    "required": ["title", "content"]
                }
            }
        });

        let response = self.generate(TIP_MODEL, &body)?;
        let text = response
            .first_part()
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AIError::InvalidResponse("No content generated".to_string()))?;

        let tip: Tip = serde_json::from_str(text)
            .map_err(|e| AIError::InvalidResponse(format!("Failed to parse tip: {}", e)))?;
        debug!("Generated tip '{}'", tip.title);
        Ok(tip)
    }

    /// Generates a spoken guided meditation and returns the raw PCM bytes.
    ///
    /// Decode the result with [`super::decode_pcm16`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The API is not reachable or answers with an error status
    /// - The answer carries no audio, or the audio is not valid base64
    pub fn generate_guided_meditation(&self, topic: &str, minutes: u32) -> AppResult<Vec<u8>> {
        let body = json!({
            "contents": [{ "parts": [{ "text": meditation_prompt(topic, minutes) }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": SPEECH_VOICE } }
                }
            }
        });

        let response = self.generate(SPEECH_MODEL, &body)?;
        let encoded = response
            .first_part()
            .and_then(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .ok_or_else(|| AIError::InvalidResponse("No audio data returned".to_string()))?;

        let audio = STANDARD
            .decode(encoded)
            .map_err(|e| AIError::InvalidResponse(format!("Invalid audio encoding: {}", e)))?;
        debug!("Received {} bytes of meditation audio", audio.len());
        Ok(audio)
    }

    fn generate(&self, model: &str, body: &Value) -> AppResult<GenerateResponse> {
        let api_key = self.api_key.as_deref().ok_or(AIError::MissingApiKey)?;
        debug!("Sending generateContent request with model: {}", model);

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .map_err(AIError::Offline)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(
                AIError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into(),
            );
        }

        let parsed: GenerateResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse generateContent response: {}", e))
        })?;
        Ok(parsed)
    }
}
