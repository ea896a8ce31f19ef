//! Reply rendering for the four feedback kinds

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::config::ChartConfig;
use crate::errors::MoodMapError;
use crate::errors::Result;
use crate::models::Emotion;
use crate::models::EmotionScores;
use crate::models::UserMood;
use crate::models::MoodSpace;
use crate::projector::encode_series;
use crate::projector::LIST_SEPARATOR;
use crate::projector::VALUE_SEPARATOR;

/// Smoothed intensity below which a channel counts as silent in narratives
const CALM_FLOOR: f64 = 0.05;
/// Intensity at which a channel is described as strong
const STRONG_BAND: f64 = 0.5;

/// How the bot answers a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Emoji,
    Line,
    Scatter,
    Empathy,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 4] = [
        FeedbackKind::Emoji,
        FeedbackKind::Line,
        FeedbackKind::Scatter,
        FeedbackKind::Empathy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Emoji => "emoji",
            FeedbackKind::Line => "line",
            FeedbackKind::Scatter => "scatter",
            FeedbackKind::Empathy => "empathy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FeedbackKind::Emoji => "an emoji for each emotion in your message",
            FeedbackKind::Line => "a line chart of your mood over time",
            FeedbackKind::Scatter => "a scatter plot of everyone's mood",
            FeedbackKind::Empathy => "a few words about how you seem to feel",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = MoodMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emoji" => Ok(FeedbackKind::Emoji),
            "line" => Ok(FeedbackKind::Line),
            "scatter" => Ok(FeedbackKind::Scatter),
            "empathy" => Ok(FeedbackKind::Empathy),
            other => Err(MoodMapError::Custom(format!("unknown feedback kind: {other}"))),
        }
    }
}

/// One line per emotion at or above `threshold`, strongest first
pub fn emoji_reply(reading: &EmotionScores, threshold: f64) -> String {
    let hits = reading.above(threshold);
    if hits.is_empty() {
        return "No tone detected.".to_string();
    }

    hits.iter()
        .map(|(emotion, score)| {
            format!(
                "You feel '{}' with a score of: {:.2}\n {}",
                emotion.display_name(),
                score,
                emotion.emoji()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short narrative about the user's smoothed mood
pub fn empathy_reply(user: &UserMood) -> String {
    let name = if user.name.is_empty() {
        "friend"
    } else {
        user.name.as_str()
    };

    let Some((emotion, intensity)) = user.channels.dominant(CALM_FLOOR) else {
        return format!(
            "You seem calm and steady, {name}. I'm here if you want to talk about anything."
        );
    };

    let strong = intensity >= STRONG_BAND;
    let body = match (emotion, strong) {
        (Emotion::Joy, true) => "You're glowing! It's wonderful to see you this happy.",
        (Emotion::Joy, false) => "You sound in good spirits. I'm glad things are going well.",
        (Emotion::Anger, true) => {
            "That sounds really infuriating. It's okay to be angry; take a breath, I'm listening."
        }
        (Emotion::Anger, false) => "Something seems to be bothering you. Want to tell me more?",
        (Emotion::Sadness, true) => {
            "I'm sorry you're going through this. You don't have to carry it alone."
        }
        (Emotion::Sadness, false) => "You seem a little down. Is there anything that would help?",
        (Emotion::Fear, true) => {
            "That sounds frightening. Let's take it one step at a time together."
        }
        (Emotion::Fear, false) => {
            "It sounds like something is worrying you. What's on your mind?"
        }
        (Emotion::Disgust, true) => "That sounds really unpleasant. No wonder you're put off.",
        (Emotion::Disgust, false) => "Something doesn't sit right with you, does it?",
    };

    format!(
        "{name}, {} {body} (mood {})",
        mood_word(emotion, strong),
        user.point()
    )
}

fn mood_word(emotion: Emotion, strong: bool) -> String {
    let adverb = if strong { "very" } else { "a bit" };
    let adjective = match emotion {
        Emotion::Joy => "joyful",
        Emotion::Anger => "angry",
        Emotion::Sadness => "sad",
        Emotion::Fear => "afraid",
        Emotion::Disgust => "disgusted",
    };
    format!("I sense you're feeling {adverb} {adjective}.")
}

/// Builds chart image URLs for an external chart-rendering endpoint
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    base_url: Url,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            width: config.width,
            height: config.height,
        })
    }

    fn base(&self, chart_type: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("cht", chart_type)
            .append_pair("chs", &format!("{}x{}", self.width, self.height));
        url
    }

    /// Scatter plot of every user's point
    pub fn scatter_url(&self, space: &MoodSpace) -> Url {
        let encoding = encode_series(space);
        let mut url = self.base("s");
        url.query_pairs_mut()
            .append_pair("chd", &encoding.data())
            .append_pair("chl", &encoding.labels)
            .append_pair("chds", "0,100")
            .append_pair("chxt", "x,y");
        url
    }

    /// Line chart of one user's smoothed history, one line per emotion
    pub fn line_url(&self, user: &UserMood) -> Url {
        let rows: Vec<String> = Emotion::ALL
            .iter()
            .map(|&emotion| {
                user.history
                    .iter()
                    .map(|channels| ((channels.get(emotion) * 100.0).round() as u8).to_string())
                    .collect::<Vec<_>>()
                    .join(&VALUE_SEPARATOR.to_string())
            })
            .collect();
        let legend: Vec<&str> = Emotion::ALL.iter().map(|e| e.display_name()).collect();

        let mut url = self.base("lc");
        url.query_pairs_mut()
            .append_pair("chd", &format!("t:{}", rows.join(&LIST_SEPARATOR.to_string())))
            .append_pair("chdl", &legend.join(&LIST_SEPARATOR.to_string()))
            .append_pair("chds", "0,100")
            .append_pair("chtt", &format!("{}'s mood", user.name));
        url
    }
}
