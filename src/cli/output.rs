//! CLI output formatting utilities

use crate::config::AppConfig;
use crate::models::Emotion;
use crate::models::EmotionScores;
use crate::models::MoodPoint;

/// Horizontal bar for a score in [0,1]
#[must_use]
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = (score.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print every emotion score with a bar
pub fn print_scores(scores: &EmotionScores) {
    for emotion in Emotion::ALL {
        let score = scores.get(emotion);
        println!(
            "  {} {:<8} {} {:.2}",
            emotion.emoji(),
            emotion.display_name(),
            score_bar(score, 20),
            score
        );
    }
}

pub fn print_point(point: MoodPoint) {
    println!("📍 Mood point: x={} y={}", point.x, point.y);
}

/// Hide all but the first and last two characters
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    format!(
        "{}{}{}",
        chars[..2].iter().collect::<String>(),
        "*".repeat(chars.len() - 4),
        chars[chars.len() - 2..].iter().collect::<String>()
    )
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 moodmap Configuration:");
    println!("  Logging:");
    println!("    Level: {}", config.logging.level);
    println!("    Directory: {}", config.logging.directory);
    println!("  Projector:");
    println!(
        "    Smoothing: prior {} / reading {}",
        config.projector.prior_weight, config.projector.reading_weight
    );
    println!(
        "    Gain: {}  Offset: {}  Bounds: [{}, {}]",
        config.projector.gain, config.projector.offset, config.projector.min, config.projector.max
    );
    println!("    X weights: {:?}", config.projector.x_weights);
    println!("    Y weights: {:?}", config.projector.y_weights);
    println!("  Tone:");
    println!("    Provider: {}", config.tone.provider);
    println!("    Endpoint: {}", config.tone.endpoint);
    println!("    Version: {}", config.tone.version_date);
    println!(
        "    API key (${}): {}",
        config.tone.api_key_env,
        config
            .tone_api_key()
            .map_or_else(|| "not set".to_string(), |key| mask_secret(&key))
    );
    println!("    Threshold: {}", config.tone.threshold);
    println!("  Chart:");
    println!("    Base URL: {}", config.chart.base_url);
    println!("    Size: {}x{}", config.chart.width, config.chart.height);
    println!("    History: {}", config.chart.history_limit);
    println!("  Server:");
    println!("    Address: {}", config.bind_address());
    println!("    CORS: {}", config.server.enable_cors);
    println!("  Bot:");
    println!("    Default feedback: {}", config.bot.default_feedback);
    println!("  State:");
    println!(
        "    Snapshot: {}",
        config.state.snapshot_path.as_deref().unwrap_or("disabled")
    );
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

pub fn print_prompt(msg: &str) {
    print!("{msg}");
    std::io::Write::flush(&mut std::io::stdout()).ok();
}
