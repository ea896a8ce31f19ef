//! HTTP client for a Watson-style tone analyzer API

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::errors::MoodMapError;
use crate::errors::Result;
use crate::models::Emotion;
use crate::models::EmotionScores;

/// Client for `POST {endpoint}/v3/tone`
pub struct ToneClient {
    endpoint: String,
    api_key: String,
    version_date: String,
    client: Client,
}

#[derive(Serialize)]
struct ToneRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ToneResponse {
    document_tone: DocumentTone,
}

#[derive(Debug, Deserialize)]
struct DocumentTone {
    #[serde(default)]
    tones: Vec<ToneScore>,
}

#[derive(Debug, Deserialize)]
struct ToneScore {
    score: f64,
    tone_id: String,
}

impl ToneClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        version_date: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MoodMapError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            version_date,
            client,
        })
    }

    /// Analyze the document tone of `text`
    pub async fn analyze(&self, text: &str) -> Result<EmotionScores> {
        let url = format!("{}/v3/tone", self.endpoint);
        debug!("Calling tone analyzer: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("version", self.version_date.as_str()), ("sentences", "false")])
            .basic_auth("apikey", Some(&self.api_key))
            .json(&ToneRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MoodMapError::ToneError(format!(
                "tone analyzer error ({status}): {error_text}"
            )));
        }

        let body: ToneResponse = response
            .json()
            .await
            .map_err(|e| MoodMapError::ToneError(format!("Failed to parse response: {e}")))?;

        Ok(scores_from_tones(&body.document_tone.tones))
    }
}

/// Map analyzer tone ids onto emotion channels. Customer-engagement tones
/// (the chat endpoint vocabulary) are folded into the nearest emotion; the
/// rest are ignored. The strongest tone wins when several map to one channel.
fn scores_from_tones(tones: &[ToneScore]) -> EmotionScores {
    let mut scores = EmotionScores::new();
    for tone in tones {
        let Some(emotion) = tone_to_emotion(&tone.tone_id) else {
            debug!("Ignoring tone {}", tone.tone_id);
            continue;
        };
        if !(0.0..=1.0).contains(&tone.score) {
            warn!("Tone {} out of range: {}", tone.tone_id, tone.score);
        }
        if tone.score > scores.get(emotion) {
            scores.set(emotion, tone.score);
        }
    }
    scores
}

fn tone_to_emotion(tone_id: &str) -> Option<Emotion> {
    if let Ok(emotion) = tone_id.parse::<Emotion>() {
        return Some(emotion);
    }
    match tone_id.to_ascii_lowercase().as_str() {
        "excited" | "satisfied" => Some(Emotion::Joy),
        "frustrated" => Some(Emotion::Anger),
        "sad" => Some(Emotion::Sadness),
        "impolite" => Some(Emotion::Disgust),
        _ => None,
    }
}
