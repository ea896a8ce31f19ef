//! Tone analysis
//!
//! Produces [`EmotionScores`] for a chat message. Two providers are available:
//! - `http`: a Watson-style tone analyzer REST API
//! - `lexicon`: an offline keyword lexicon compiled into the binary
//!
//! # Examples
//!
//! ```rust,no_run
//! use moodmap::config::AppConfig;
//! use moodmap::tone::ToneService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = ToneService::new(&config)?;
//!
//!     let scores = service.analyze("What a lovely day!").await?;
//!     println!("joy = {:.2}", scores.get(moodmap::models::Emotion::Joy));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod lexicon;

use std::fmt;
use std::str::FromStr;

pub use client::ToneClient;
pub use lexicon::LexiconAnalyzer;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::MoodMapError;
use crate::errors::Result;
use crate::models::EmotionScores;

/// Supported tone providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneProvider {
    /// Remote tone analyzer API
    Http,
    /// Built-in keyword lexicon
    #[default]
    Lexicon,
}

impl fmt::Display for ToneProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneProvider::Http => f.write_str("http"),
            ToneProvider::Lexicon => f.write_str("lexicon"),
        }
    }
}

impl FromStr for ToneProvider {
    type Err = MoodMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ToneProvider::Http),
            "lexicon" => Ok(ToneProvider::Lexicon),
            other => Err(MoodMapError::ConfigError(format!(
                "unknown tone provider: {other}"
            ))),
        }
    }
}

enum Backend {
    Http(ToneClient),
    Lexicon(LexiconAnalyzer),
}

/// Tone analysis front end used by the bot
pub struct ToneService {
    backend: Backend,
}

impl ToneService {
    /// Create the service for the configured provider
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = match config.tone.provider {
            ToneProvider::Http => {
                let api_key = config.tone_api_key().ok_or_else(|| {
                    MoodMapError::ConfigError(format!(
                        "tone provider is http but ${} is not set",
                        config.tone.api_key_env
                    ))
                })?;
                Backend::Http(ToneClient::new(
                    config.tone.endpoint.clone(),
                    api_key,
                    config.tone.version_date.clone(),
                    config.tone.timeout_secs,
                )?)
            }
            ToneProvider::Lexicon => Backend::Lexicon(LexiconAnalyzer::new()),
        };

        Ok(Self { backend })
    }

    /// Service backed by an already built HTTP client
    pub fn with_client(client: ToneClient) -> Self {
        Self {
            backend: Backend::Http(client),
        }
    }

    /// Service backed by the built-in lexicon
    pub fn lexicon() -> Self {
        Self {
            backend: Backend::Lexicon(LexiconAnalyzer::new()),
        }
    }

    pub fn provider(&self) -> ToneProvider {
        match self.backend {
            Backend::Http(_) => ToneProvider::Http,
            Backend::Lexicon(_) => ToneProvider::Lexicon,
        }
    }

    /// Score the emotions of `text`. Blank text scores zero everywhere
    /// without reaching the provider.
    pub async fn analyze(&self, text: &str) -> Result<EmotionScores> {
        if text.trim().is_empty() {
            return Ok(EmotionScores::new());
        }

        let scores = match &self.backend {
            Backend::Http(client) => client.analyze(text).await?,
            Backend::Lexicon(lexicon) => lexicon.analyze(text),
        };
        debug!("Tone scores ({}): {:?}", self.provider(), scores);
        Ok(scores)
    }
}
