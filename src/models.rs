use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Emotion channels tracked per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anger,
    Sadness,
    Fear,
    Disgust,
}

impl Emotion {
    /// All channels in display order
    pub const ALL: [Emotion; 5] = [
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
        }
    }

    /// Capitalized name used in replies and chart legends
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Joy => "Joy",
            Emotion::Anger => "Anger",
            Emotion::Sadness => "Sadness",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Emotion::Joy => "\u{1F60A}",
            Emotion::Anger => "\u{1F620}",
            Emotion::Sadness => "\u{1F622}",
            Emotion::Fear => "\u{1F628}",
            Emotion::Disgust => "\u{1F922}",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "joy" => Ok(Emotion::Joy),
            "anger" => Ok(Emotion::Anger),
            "sadness" => Ok(Emotion::Sadness),
            "fear" => Ok(Emotion::Fear),
            "disgust" => Ok(Emotion::Disgust),
            other => Err(format!("unknown emotion: {other}")),
        }
    }
}

/// Clamp an intensity into [0,1]; NaN and infinities read as 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One reading of emotion intensities for a message
///
/// Missing emotions read as 0 and stored values are always within [0,1].
/// Deserializing skips names outside the tracked channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmotionScores(BTreeMap<Emotion, f64>);

impl<'de> Deserialize<'de> for EmotionScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(name, score)| name.parse::<Emotion>().ok().map(|e| (e, score)))
            .collect())
    }
}

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, emotion: Emotion, score: f64) -> Self {
        self.set(emotion, score);
        self
    }

    pub fn set(&mut self, emotion: Emotion, score: f64) {
        self.0.insert(emotion, clamp_unit(score));
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0.get(&emotion).copied().map_or(0.0, clamp_unit)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|score| clamp_unit(*score) == 0.0)
    }

    /// Emotions at or above `threshold`, strongest first
    pub fn above(&self, threshold: f64) -> Vec<(Emotion, f64)> {
        let mut hits: Vec<(Emotion, f64)> = Emotion::ALL
            .iter()
            .map(|&e| (e, self.get(e)))
            .filter(|(_, score)| *score > 0.0 && *score >= threshold)
            .collect();
        hits.sort_by(|a, b| b.1.total_cmp(&a.1));
        hits
    }
}

impl FromIterator<(Emotion, f64)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (Emotion, f64)>>(iter: I) -> Self {
        let mut scores = EmotionScores::new();
        for (emotion, score) in iter {
            scores.set(emotion, score);
        }
        scores
    }
}

/// Smoothed intensity per emotion channel, each in [0,1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionChannels {
    pub joy: f64,
    pub anger: f64,
    pub sadness: f64,
    pub fear: f64,
    pub disgust: f64,
}

impl EmotionChannels {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Anger => self.anger,
            Emotion::Sadness => self.sadness,
            Emotion::Fear => self.fear,
            Emotion::Disgust => self.disgust,
        }
    }

    pub fn set(&mut self, emotion: Emotion, value: f64) {
        let value = clamp_unit(value);
        match emotion {
            Emotion::Joy => self.joy = value,
            Emotion::Anger => self.anger = value,
            Emotion::Sadness => self.sadness = value,
            Emotion::Fear => self.fear = value,
            Emotion::Disgust => self.disgust = value,
        }
    }

    /// Strongest channel, or `None` when every channel is below `floor`
    pub fn dominant(&self, floor: f64) -> Option<(Emotion, f64)> {
        Emotion::ALL
            .iter()
            .map(|&e| (e, self.get(e)))
            .filter(|(_, v)| *v >= floor)
            .fold(None, |best: Option<(Emotion, f64)>, cur| match best {
                Some(b) if b.1 >= cur.1 => Some(b),
                _ => Some(cur),
            })
    }
}

impl From<&EmotionScores> for EmotionChannels {
    fn from(scores: &EmotionScores) -> Self {
        let mut channels = EmotionChannels::default();
        for emotion in Emotion::ALL {
            channels.set(emotion, scores.get(emotion));
        }
        channels
    }
}

/// Position on the mood display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub x: u8,
    pub y: u8,
}

impl Default for MoodPoint {
    fn default() -> Self {
        Self { x: 50, y: 50 }
    }
}

impl fmt::Display for MoodPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mood state of one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMood {
    pub id: String,
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub channels: EmotionChannels,
    /// Number of readings folded into `channels`
    pub observations: u64,
    /// Smoothed channels after each reading, newest last
    #[serde(default)]
    pub history: VecDeque<EmotionChannels>,
    pub updated_at: DateTime<Utc>,
}

impl UserMood {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let point = MoodPoint::default();
        Self {
            id: id.into(),
            name: name.into(),
            x: point.x,
            y: point.y,
            channels: EmotionChannels::default(),
            observations: 0,
            history: VecDeque::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn point(&self) -> MoodPoint {
        MoodPoint {
            x: self.x,
            y: self.y,
        }
    }

    pub fn is_new(&self) -> bool {
        self.observations == 0
    }

    /// Append to history, dropping the oldest entries beyond `limit`
    pub fn push_history(&mut self, channels: EmotionChannels, limit: usize) {
        self.history.push_back(channels);
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}

/// All participants of one conversation, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodSpace {
    users: Vec<UserMood>,
}

impl MoodSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserMood> {
        self.users.iter()
    }

    pub fn get(&self, id: &str) -> Option<&UserMood> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut UserMood> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Find the user by id or append a fresh entry at the end
    pub fn get_or_insert(&mut self, id: &str, name: &str) -> &mut UserMood {
        let index = match self.users.iter().position(|u| u.id == id) {
            Some(index) => index,
            None => {
                self.users.push(UserMood::new(id, name));
                self.users.len() - 1
            }
        };
        &mut self.users[index]
    }

    /// Insert or replace an entry, keeping the original position of an existing id
    pub fn upsert(&mut self, user: UserMood) {
        if let Some(existing) = self.get_mut(&user.id) {
            *existing = user;
        } else {
            self.users.push(user);
        }
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }
}

impl<'a> IntoIterator for &'a MoodSpace {
    type Item = &'a UserMood;
    type IntoIter = std::slice::Iter<'a, UserMood>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}
