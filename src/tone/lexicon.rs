//! Offline keyword lexicon for tone analysis

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::Emotion;
use crate::models::EmotionScores;

// Load emotion lexicon at compile time
const EMOTION_LEXICON: &str = include_str!("../../data/emotion_lexicon.txt");

/// Accumulated keyword weight that maps to a full score of 1.0
const SATURATION_WEIGHT: f64 = 2.0;

/// Words that cancel a keyword within the two preceding tokens
const NEGATIONS: [&str; 8] = [
    "not", "no", "never", "dont", "don't", "isn't", "wasn't", "without",
];

const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

lazy_static! {
    /// word -> (emotion, weight)
    static ref LEXICON: HashMap<String, (Emotion, f64)> = {
        let mut map = HashMap::new();
        for line in EMOTION_LEXICON.lines() {
            if line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(word), Some(emotion), Some(weight)) =
                (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            let parsed = (emotion.parse::<Emotion>(), weight.trim().parse::<f64>());
            if let (Ok(emotion), Ok(weight)) = parsed {
                map.insert(word.to_lowercase(), (emotion, weight));
            }
        }
        map
    };
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Number of words in the lexicon
    pub fn len(&self) -> usize {
        LEXICON.len()
    }

    pub fn is_empty(&self) -> bool {
        LEXICON.is_empty()
    }

    pub fn analyze(&self, text: &str) -> EmotionScores {
        let mut totals: HashMap<Emotion, f64> = HashMap::new();

        // Negation never reaches across a sentence boundary
        for sentence in text.split(SENTENCE_ENDINGS) {
            let tokens = tokenize(sentence);
            for (i, token) in tokens.iter().enumerate() {
                let Some(&(emotion, weight)) = LEXICON.get(token.as_str()) else {
                    continue;
                };
                let negated = tokens[i.saturating_sub(2)..i]
                    .iter()
                    .any(|t| NEGATIONS.contains(&t.as_str()));
                if negated {
                    continue;
                }
                *totals.entry(emotion).or_insert(0.0) += weight;
            }
        }

        totals
            .into_iter()
            .map(|(emotion, total)| (emotion, (total / SATURATION_WEIGHT).min(1.0)))
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
