//! One-shot analysis handler

use serde_json::json;

use crate::cli::output::*;
use crate::models::EmotionChannels;
use crate::projector::MoodProjector;
use crate::tone::ToneService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_analyze(config: &AppConfig, text: &str, as_json: bool) -> Result<()> {
    let tone = ToneService::new(config)?;
    let projector = MoodProjector::new(config.projector.clone());

    let scores = tone.analyze(text).await?;
    let channels = projector.update_emotion(&EmotionChannels::default(), &scores, true);
    let point = projector.project(&channels);

    if as_json {
        let output = json!({
            "text": text,
            "provider": tone.provider().to_string(),
            "scores": scores,
            "point": point,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_info(&format!("Tone provider: {}", tone.provider()));
    print_scores(&scores);
    print_point(point);
    Ok(())
}
