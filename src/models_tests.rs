//! Unit tests for the mood data model

#[cfg(test)]
mod tests {
    use crate::models::*;

    // ====== Emotion Tests ======

    #[test]
    fn test_emotion_parse_case_insensitive() {
        assert_eq!("Joy".parse::<Emotion>().unwrap(), Emotion::Joy);
        assert_eq!(" SADNESS ".parse::<Emotion>().unwrap(), Emotion::Sadness);
        assert!("analytical".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_emotion_serde_lowercase() {
        let json = serde_json::to_string(&Emotion::Disgust).unwrap();
        assert_eq!(json, "\"disgust\"");
    }

    // ====== EmotionScores Tests ======

    #[test]
    fn test_missing_scores_read_as_zero() {
        let scores = EmotionScores::new().with(Emotion::Joy, 0.7);
        assert_eq!(scores.get(Emotion::Joy), 0.7);
        assert_eq!(scores.get(Emotion::Fear), 0.0);
    }

    #[test]
    fn test_scores_are_clamped() {
        let scores = EmotionScores::new()
            .with(Emotion::Joy, 1.7)
            .with(Emotion::Anger, -0.3)
            .with(Emotion::Fear, f64::NAN);
        assert_eq!(scores.get(Emotion::Joy), 1.0);
        assert_eq!(scores.get(Emotion::Anger), 0.0);
        assert_eq!(scores.get(Emotion::Fear), 0.0);
    }

    #[test]
    fn test_scores_deserialized_out_of_range_are_clamped_on_read() {
        let scores: EmotionScores =
            serde_json::from_str(r#"{"joy": 3.0, "sadness": 0.25}"#).unwrap();
        assert_eq!(scores.get(Emotion::Joy), 1.0);
        assert_eq!(scores.get(Emotion::Sadness), 0.25);
    }

    #[test]
    fn test_scores_deserialize_skips_unknown_emotions() {
        let scores: EmotionScores =
            serde_json::from_str(r#"{"Fear": 0.4, "analytical": 0.9, "tentative": 0.2}"#)
                .unwrap();
        assert_eq!(scores.get(Emotion::Fear), 0.4);
        assert_eq!(scores, EmotionScores::new().with(Emotion::Fear, 0.4));
    }

    #[test]
    fn test_scores_above_threshold_strongest_first() {
        let scores = EmotionScores::new()
            .with(Emotion::Joy, 0.6)
            .with(Emotion::Anger, 0.9)
            .with(Emotion::Fear, 0.2);
        let hits = scores.above(0.5);
        assert_eq!(hits, vec![(Emotion::Anger, 0.9), (Emotion::Joy, 0.6)]);
    }

    // ====== EmotionChannels Tests ======

    #[test]
    fn test_channels_dominant() {
        let channels = EmotionChannels {
            joy: 0.2,
            sadness: 0.8,
            ..Default::default()
        };
        assert_eq!(channels.dominant(0.05), Some((Emotion::Sadness, 0.8)));
        assert_eq!(EmotionChannels::default().dominant(0.05), None);
    }

    // ====== MoodSpace Tests ======

    #[test]
    fn test_new_user_defaults() {
        let user = UserMood::new("u1", "Ada");
        assert_eq!(user.point(), MoodPoint { x: 50, y: 50 });
        assert_eq!(user.channels, EmotionChannels::default());
        assert!(user.is_new());
    }

    #[test]
    fn test_mood_space_keeps_insertion_order_and_unique_ids() {
        let mut space = MoodSpace::new();
        space.get_or_insert("b", "Bea");
        space.get_or_insert("a", "Al");
        space.get_or_insert("b", "Bea again");

        let ids: Vec<&str> = space.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(space.get("b").unwrap().name, "Bea");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut user = UserMood::new("u1", "Ada");
        for i in 0..5 {
            let channels = EmotionChannels {
                joy: f64::from(i) / 10.0,
                ..Default::default()
            };
            user.push_history(channels, 3);
        }
        assert_eq!(user.history.len(), 3);
        assert_eq!(user.history.front().unwrap().joy, 0.2);
        assert_eq!(user.history.back().unwrap().joy, 0.4);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut space = MoodSpace::new();
        space.get_or_insert("a", "A");
        space.get_or_insert("b", "B");
        let mut replacement = UserMood::new("a", "A2");
        replacement.x = 10;
        space.upsert(replacement);

        assert_eq!(space.iter().next().unwrap().name, "A2");
        assert_eq!(space.get("a").unwrap().x, 10);
        assert_eq!(space.len(), 2);
    }
}
