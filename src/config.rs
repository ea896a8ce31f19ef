use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::feedback::FeedbackKind;
use crate::models::Emotion;
use crate::tone::ToneProvider;

/// Prefix for environment overrides, e.g. `MOODMAP__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "MOODMAP";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily-rolling log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
        }
    }
}

/// Per-emotion weights for one display axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWeights {
    pub joy: f64,
    pub anger: f64,
    pub sadness: f64,
    pub fear: f64,
    pub disgust: f64,
}

impl AxisWeights {
    pub fn weight(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Anger => self.anger,
            Emotion::Sadness => self.sadness,
            Emotion::Fear => self.fear,
            Emotion::Disgust => self.disgust,
        }
    }
}

fn default_x_weights() -> AxisWeights {
    AxisWeights {
        joy: 0.5,
        anger: -0.8,
        sadness: -0.6,
        fear: -0.6,
        disgust: -0.8,
    }
}

fn default_y_weights() -> AxisWeights {
    AxisWeights {
        joy: 0.9,
        anger: 0.6,
        sadness: -0.8,
        fear: 0.5,
        disgust: -0.6,
    }
}

/// Constants of the mood projection. The defaults were tuned by eye for the
/// chat demo and have no derivation beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Weight of the previous smoothed value
    pub prior_weight: f64,
    /// Weight of the new reading
    pub reading_weight: f64,
    pub gain: f64,
    pub offset: f64,
    pub min: u8,
    pub max: u8,
    pub x_weights: AxisWeights,
    pub y_weights: AxisWeights,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            prior_weight: 0.6,
            reading_weight: 0.4,
            gain: 50.0,
            offset: 50.0,
            min: 0,
            max: 100,
            x_weights: default_x_weights(),
            y_weights: default_y_weights(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub provider: ToneProvider,
    pub endpoint: String,
    pub version_date: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Minimum score for an emotion to be reported in emoji feedback
    pub threshold: f64,
    pub timeout_secs: u64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            provider: ToneProvider::Lexicon,
            endpoint: "http://localhost:8090".to_string(),
            version_date: "2017-09-21".to_string(),
            api_key_env: "MOODMAP_TONE_API_KEY".to_string(),
            threshold: 0.5,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    /// Number of smoothed readings kept per user for the line chart
    pub history_limit: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8091/chart".to_string(),
            width: 500,
            height: 400,
            history_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            enable_cors: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub default_feedback: FeedbackKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// JSON snapshot of all conversations, loaded at startup and written at shutdown
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub projector: ProjectorConfig,
    pub tone: ToneConfig,
    pub chart: ChartConfig,
    pub server: ServerConfig,
    pub bot: BotConfig,
    pub state: StateConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default file locations, layered with
    /// `MOODMAP__*` environment overrides
    pub fn load() -> crate::Result<Self> {
        // Try config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::load_layered(Some(Path::new("config.toml")))
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::load_layered(Some(Path::new("config.example.toml")))
        } else {
            Self::load_layered(None)
        }
    }

    /// Load from an explicit file (if any) plus environment overrides
    pub fn load_layered(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the projection or the charts meaningless
    pub fn validate(&self) -> crate::Result<()> {
        let p = &self.projector;
        if p.prior_weight < 0.0 || p.reading_weight < 0.0 {
            return Err(crate::MoodMapError::ConfigError(
                "projector smoothing weights must not be negative".to_string(),
            ));
        }
        if p.prior_weight + p.reading_weight <= 0.0 {
            return Err(crate::MoodMapError::ConfigError(
                "projector smoothing weights must not both be zero".to_string(),
            ));
        }
        if p.min > p.max {
            return Err(crate::MoodMapError::ConfigError(format!(
                "projector bounds are inverted: min {} > max {}",
                p.min, p.max
            )));
        }
        if !p.gain.is_finite() || !p.offset.is_finite() {
            return Err(crate::MoodMapError::ConfigError(
                "projector gain and offset must be finite".to_string(),
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(crate::MoodMapError::ConfigError(
                "chart width and height must be positive".to_string(),
            ));
        }
        if self.chart.history_limit == 0 {
            return Err(crate::MoodMapError::ConfigError(
                "chart history_limit must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tone.threshold) {
            return Err(crate::MoodMapError::ConfigError(format!(
                "tone threshold {} is outside [0, 1]",
                self.tone.threshold
            )));
        }
        Ok(())
    }

    /// Read the tone API key from the configured environment variable
    pub fn tone_api_key(&self) -> Option<String> {
        std::env::var(&self.tone.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Get chart history capacity
    pub fn history_limit(&self) -> usize {
        self.chart.history_limit
    }
}
