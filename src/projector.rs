//! Mood projection
//!
//! Turns emotion readings into smoothed per-user channels, projects the
//! channels onto the 2D mood display, and encodes a conversation's points as
//! a chart series.
//!
//! Everything here is a pure function of its arguments. Keeping a
//! [`MoodSpace`] across messages is up to the caller.

use std::fmt;

use tracing::debug;

use crate::config::AxisWeights;
use crate::config::ProjectorConfig;
use crate::models::clamp_unit;
use crate::models::Emotion;
use crate::models::EmotionChannels;
use crate::models::EmotionScores;
use crate::models::MoodPoint;
use crate::models::MoodSpace;

/// Separator between values of one list
pub const VALUE_SEPARATOR: char = ',';
/// Separator between the X list, the Y list and between labels
pub const LIST_SEPARATOR: char = '|';

#[derive(Debug, Clone, Default)]
pub struct MoodProjector {
    config: ProjectorConfig,
}

impl MoodProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Blend a new reading into the prior smoothed channels.
    ///
    /// On the first observation the reading is taken as-is, so a new user
    /// does not start out biased towards zero.
    pub fn update_emotion(
        &self,
        prior: &EmotionChannels,
        reading: &EmotionScores,
        first_observation: bool,
    ) -> EmotionChannels {
        if first_observation {
            return EmotionChannels::from(reading);
        }

        let prior_weight = self.config.prior_weight;
        let reading_weight = self.config.reading_weight;
        let total = prior_weight + reading_weight;

        let mut smoothed = EmotionChannels::default();
        for emotion in Emotion::ALL {
            let blended = (prior_weight * clamp_unit(prior.get(emotion))
                + reading_weight * reading.get(emotion))
                / total;
            smoothed.set(emotion, blended);
        }
        smoothed
    }

    /// Project smoothed channels onto the display. Deterministic, and always
    /// inside the configured bounds.
    pub fn project(&self, channels: &EmotionChannels) -> MoodPoint {
        let magnitude: f64 = Emotion::ALL
            .iter()
            .map(|&e| clamp_unit(channels.get(e)).abs())
            .sum();
        let norm = magnitude.max(1.0);

        MoodPoint {
            x: self.project_axis(channels, &self.config.x_weights, norm),
            y: self.project_axis(channels, &self.config.y_weights, norm),
        }
    }

    fn project_axis(&self, channels: &EmotionChannels, weights: &AxisWeights, norm: f64) -> u8 {
        let sum: f64 = Emotion::ALL
            .iter()
            .map(|&e| weights.weight(e) * clamp_unit(channels.get(e)))
            .sum();

        // Unvalidated configs may carry inverted bounds
        let (low, high) = if self.config.min <= self.config.max {
            (self.config.min, self.config.max)
        } else {
            (self.config.max, self.config.min)
        };
        let min = f64::from(low);
        let max = f64::from(high);
        let raw = self.config.offset + (self.config.gain * sum / norm).round();
        if raw.is_finite() {
            raw.clamp(min, max) as u8
        } else {
            self.config.offset.clamp(min, max) as u8
        }
    }

    /// Fold one reading for `user_id` into the space, creating the user on
    /// first sight, and return the user's new point.
    pub fn observe(
        &self,
        space: &mut MoodSpace,
        user_id: &str,
        name: &str,
        reading: &EmotionScores,
        history_limit: usize,
    ) -> MoodPoint {
        let user = space.get_or_insert(user_id, name);
        if !name.is_empty() && user.name != name {
            user.name = name.to_string();
        }

        let smoothed = self.update_emotion(&user.channels, reading, user.is_new());
        let point = self.project(&smoothed);

        user.channels = smoothed;
        user.x = point.x;
        user.y = point.y;
        user.observations += 1;
        user.updated_at = chrono::Utc::now();
        user.push_history(smoothed, history_limit);

        debug!(
            "Observed {} (#{}) -> {}",
            user_id, user.observations, point
        );
        point
    }
}

/// The three lists of a rendered series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesEncoding {
    /// X values, comma separated
    pub x: String,
    /// Y values, comma separated
    pub y: String,
    /// Display names, pipe separated
    pub labels: String,
}

impl SeriesEncoding {
    /// Chart data parameter value: `t:{x}|{y}`
    pub fn data(&self) -> String {
        format!("t:{}{LIST_SEPARATOR}{}", self.x, self.y)
    }
}

/// Renders as `chd=t:{x}|{y}&chl={labels}`
impl fmt::Display for SeriesEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chd={}&chl={}", self.data(), self.labels)
    }
}

/// Encode every user's point and name in space order
pub fn encode_series(space: &MoodSpace) -> SeriesEncoding {
    let mut x = String::new();
    let mut y = String::new();
    let mut labels = String::new();

    for user in space {
        x.push_str(&user.x.to_string());
        x.push(VALUE_SEPARATOR);
        y.push_str(&user.y.to_string());
        y.push(VALUE_SEPARATOR);
        labels.push_str(&user.name);
        labels.push(LIST_SEPARATOR);
    }

    SeriesEncoding {
        x: strip_trailing(x, VALUE_SEPARATOR),
        y: strip_trailing(y, VALUE_SEPARATOR),
        labels: strip_trailing(labels, LIST_SEPARATOR),
    }
}

/// Text form of [`encode_series`]
pub fn render_series(space: &MoodSpace) -> String {
    encode_series(space).to_string()
}

fn strip_trailing(mut s: String, separator: char) -> String {
    if s.ends_with(separator) {
        s.pop();
    }
    s
}
