use moodmap::config::ProjectorConfig;
use moodmap::models::*;
use moodmap::projector::render_series;
use moodmap::MoodProjector;
use proptest::prelude::*;

fn channels_from(values: [f64; 5]) -> EmotionChannels {
    let mut channels = EmotionChannels::default();
    for (emotion, value) in Emotion::ALL.iter().zip(values) {
        channels.set(*emotion, value);
    }
    channels
}

fn scores_from(values: [f64; 5]) -> EmotionScores {
    Emotion::ALL.iter().copied().zip(values).collect()
}

fn unit_vector() -> impl Strategy<Value = [f64; 5]> {
    prop::array::uniform5(0.0f64..=1.0)
}

proptest! {
    #[test]
    fn update_emotion_stays_in_unit_range(
        prior in unit_vector(),
        reading in unit_vector(),
        first in any::<bool>(),
    ) {
        let projector = MoodProjector::default();
        let smoothed =
            projector.update_emotion(&channels_from(prior), &scores_from(reading), first);
        for emotion in Emotion::ALL {
            let v = smoothed.get(emotion);
            prop_assert!((0.0..=1.0).contains(&v), "{emotion} = {v}");
        }
    }

    #[test]
    fn update_emotion_clamps_malformed_readings(
        prior in unit_vector(),
        reading in prop::array::uniform5(-10.0f64..10.0),
    ) {
        let projector = MoodProjector::default();
        let smoothed =
            projector.update_emotion(&channels_from(prior), &scores_from(reading), false);
        for emotion in Emotion::ALL {
            prop_assert!((0.0..=1.0).contains(&smoothed.get(emotion)));
        }
    }

    #[test]
    fn project_stays_in_display_bounds(values in unit_vector()) {
        let projector = MoodProjector::default();
        let point = projector.project(&channels_from(values));
        prop_assert!(point.x <= 100);
        prop_assert!(point.y <= 100);
    }

    #[test]
    fn project_is_deterministic(values in unit_vector()) {
        let projector = MoodProjector::default();
        let channels = channels_from(values);
        prop_assert_eq!(projector.project(&channels), projector.project(&channels));
    }

    #[test]
    fn sequential_updates_compose(
        r1 in unit_vector(),
        r2 in unit_vector(),
    ) {
        let projector = MoodProjector::default();
        let mut space = MoodSpace::new();
        projector.observe(&mut space, "u", "U", &scores_from(r1), 20);
        let after_r1 = space.get("u").unwrap().channels;
        projector.observe(&mut space, "u", "U", &scores_from(r2), 20);

        let expected = projector.update_emotion(&after_r1, &scores_from(r2), false);
        prop_assert_eq!(space.get("u").unwrap().channels, expected);
        prop_assert_eq!(space.get("u").unwrap().point(), projector.project(&expected));
    }
}

#[test]
fn all_zero_input_projects_to_center() {
    let projector = MoodProjector::default();
    let point = projector.project(&EmotionChannels::default());
    assert_eq!((point.x, point.y), (50, 50));
}

#[test]
fn new_user_with_pure_joy() {
    let projector = MoodProjector::default();
    let reading = EmotionScores::new()
        .with(Emotion::Joy, 1.0)
        .with(Emotion::Anger, 0.0)
        .with(Emotion::Sadness, 0.0)
        .with(Emotion::Fear, 0.0)
        .with(Emotion::Disgust, 0.0);

    let smoothed = projector.update_emotion(&EmotionChannels::default(), &reading, true);
    assert_eq!(smoothed.joy, 1.0);

    let point = projector.project(&smoothed);
    assert_eq!((point.x, point.y), (75, 95));
}

#[test]
fn repeated_reading_converges_without_oscillating() {
    let projector = MoodProjector::default();
    let reading = EmotionScores::new()
        .with(Emotion::Joy, 0.8)
        .with(Emotion::Fear, 0.3);
    let mut channels = EmotionChannels {
        joy: 0.1,
        fear: 0.9,
        anger: 0.5,
        ..Default::default()
    };

    let mut last_distance = f64::INFINITY;
    for _ in 0..60 {
        channels = projector.update_emotion(&channels, &reading, false);
        let distance: f64 = Emotion::ALL
            .iter()
            .map(|&e| (channels.get(e) - reading.get(e)).abs())
            .sum();
        assert!(distance <= last_distance + 1e-12, "distance grew: {distance} > {last_distance}");
        last_distance = distance;
    }
    assert!(last_distance < 1e-9);
}

#[test]
fn custom_weights_are_honored() {
    let config = ProjectorConfig {
        gain: 20.0,
        ..ProjectorConfig::default()
    };
    let projector = MoodProjector::new(config);
    let channels = EmotionChannels {
        joy: 1.0,
        ..Default::default()
    };
    let point = projector.project(&channels);
    assert_eq!((point.x, point.y), (60, 68));
}

#[test]
fn inverted_bounds_are_reordered() {
    let projector = MoodProjector::new(ProjectorConfig {
        min: 80,
        max: 20,
        ..ProjectorConfig::default()
    });

    let joyful = EmotionChannels {
        joy: 1.0,
        ..Default::default()
    };
    assert_eq!(projector.project(&joyful), MoodPoint { x: 75, y: 80 });

    let furious = EmotionChannels {
        anger: 1.0,
        ..Default::default()
    };
    assert_eq!(projector.project(&furious), MoodPoint { x: 20, y: 80 });
}

#[test]
fn render_series_follows_space_order() {
    let projector = MoodProjector::default();
    let mut space = MoodSpace::new();
    projector.observe(&mut space, "b", "B", &EmotionScores::new(), 20);
    projector.observe(
        &mut space,
        "a",
        "A",
        &EmotionScores::new().with(Emotion::Joy, 1.0),
        20,
    );

    assert_eq!(render_series(&space), "chd=t:50,75|50,95&chl=B|A");
}
