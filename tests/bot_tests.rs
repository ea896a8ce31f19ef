use std::sync::Arc;
use std::time::Duration;

use moodmap::bot::IncomingMessage;
use moodmap::conversation::ConversationStore;
use moodmap::feedback::FeedbackKind;
use moodmap::models::MoodPoint;
use moodmap::tone::ToneClient;
use moodmap::tone::ToneService;
use moodmap::AppConfig;
use moodmap::MoodBot;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.chart.base_url = "https://charts.example.com/chart".to_string();
    config
}

fn lexicon_bot() -> MoodBot {
    let config = test_config();
    let store = Arc::new(ConversationStore::new(config.bot.default_feedback));
    MoodBot::with_parts(&config, ToneService::lexicon(), store).unwrap()
}

fn msg(conversation: &str, user: &str, text: &str) -> IncomingMessage {
    IncomingMessage::new(conversation, user, user.to_uppercase(), text)
}

#[tokio::test]
async fn emoji_feedback_by_default() {
    let bot = lexicon_bot();

    let reply = bot
        .handle_message(&msg("room", "ada", "I am so happy and excited!"))
        .await
        .unwrap();

    assert_eq!(reply.feedback, FeedbackKind::Emoji);
    assert!(reply.text.contains("You feel 'Joy'"));
    assert!(reply.image_url.is_none());
    let point = reply.point.unwrap();
    assert!(point.x > 50 && point.y > 50);
}

#[tokio::test]
async fn neutral_message_reports_no_tone() {
    let bot = lexicon_bot();

    let reply = bot
        .handle_message(&msg("room", "ada", "The train leaves at nine."))
        .await
        .unwrap();

    assert_eq!(reply.text, "No tone detected.");
    assert_eq!(reply.point, Some(MoodPoint { x: 50, y: 50 }));
}

#[tokio::test]
async fn commands_switch_feedback_per_conversation() {
    let bot = lexicon_bot();

    let reply = bot.handle_message(&msg("room", "ada", "/scatter")).await.unwrap();
    assert_eq!(reply.feedback, FeedbackKind::Scatter);
    assert!(reply.point.is_none());

    bot.handle_message(&msg("room", "ada", "so happy")).await.unwrap();
    let reply = bot
        .handle_message(&msg("room", "bob", "I'm angry and annoyed"))
        .await
        .unwrap();

    assert_eq!(reply.feedback, FeedbackKind::Scatter);
    let url = reply.image_url.unwrap();
    assert!(url.starts_with("https://charts.example.com/chart?cht=s"));
    assert!(url.contains("chl=ADA%7CBOB"));

    // Other conversations keep the default
    let reply = bot.handle_message(&msg("lobby", "ada", "hello")).await.unwrap();
    assert_eq!(reply.feedback, FeedbackKind::Emoji);
}

#[tokio::test]
async fn line_feedback_charts_speaker_history() {
    let bot = lexicon_bot();
    bot.handle_message(&msg("room", "ada", "/line")).await.unwrap();
    bot.handle_message(&msg("room", "ada", "happy")).await.unwrap();
    let reply = bot.handle_message(&msg("room", "ada", "sad")).await.unwrap();

    let url = reply.image_url.unwrap();
    assert!(url.contains("cht=lc"));
    let state = bot.store().snapshot("room").await.unwrap();
    assert_eq!(state.space.get("ada").unwrap().history.len(), 2);
}

#[tokio::test]
async fn empathy_feedback_names_the_speaker() {
    let bot = lexicon_bot();
    bot.handle_message(&msg("room", "ada", "/empathy")).await.unwrap();
    let reply = bot
        .handle_message(&msg("room", "ada", "I'm terrified and anxious"))
        .await
        .unwrap();

    assert!(reply.text.starts_with("ADA, I sense you're feeling very afraid."));
}

#[tokio::test]
async fn mood_and_reset_commands() {
    let bot = lexicon_bot();

    let reply = bot.handle_message(&msg("room", "ada", "/mood")).await.unwrap();
    assert!(reply.point.is_none());

    bot.handle_message(&msg("room", "ada", "happy happy joy")).await.unwrap();
    let reply = bot.handle_message(&msg("room", "ada", "/mood")).await.unwrap();
    assert!(reply.point.is_some());

    bot.handle_message(&msg("room", "ada", "/reset")).await.unwrap();
    assert!(bot.store().load_mood_space("room").await.is_empty());
}

#[tokio::test]
async fn turn_count_tracks_scored_messages_only() {
    let bot = lexicon_bot();
    bot.handle_message(&msg("room", "ada", "/help")).await.unwrap();
    bot.handle_message(&msg("room", "ada", "hello")).await.unwrap();
    bot.handle_message(&msg("room", "bob", "hi")).await.unwrap();

    let state = bot.store().snapshot("room").await.unwrap();
    assert_eq!(state.turn_count, 2);
    let ids: Vec<&str> = state.space.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["ada", "bob"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_messages_lose_no_update() {
    // A slow tone backend keeps every analysis suspended at once
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/tone"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "document_tone": {
                        "tones": [{"score": 0.8, "tone_id": "joy", "tone_name": "Joy"}]
                    }
                }))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let config = test_config();
    let client = ToneClient::new(server.uri(), "key".to_string(), "2017-09-21".to_string(), 5)
        .unwrap();
    let store = Arc::new(ConversationStore::default());
    let bot = Arc::new(
        MoodBot::with_parts(&config, ToneService::with_client(client), store).unwrap(),
    );

    let mut tasks = Vec::new();
    for i in 0..32 {
        let bot = bot.clone();
        tasks.push(tokio::spawn(async move {
            bot.handle_message(&msg("room", "ada", &format!("message {i}")))
                .await
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let state = bot.store().snapshot("room").await.unwrap();
    assert_eq!(state.turn_count, 32);
    let ada = state.space.get("ada").unwrap();
    assert_eq!(ada.observations, 32);
    assert_eq!(ada.history.len(), config.history_limit().min(32));
}

#[tokio::test]
async fn tone_failure_leaves_state_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/tone"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let config = test_config();
    let client = ToneClient::new(server.uri(), "key".to_string(), "2017-09-21".to_string(), 5)
        .unwrap();
    let store = Arc::new(ConversationStore::default());
    let bot = MoodBot::with_parts(&config, ToneService::with_client(client), store).unwrap();

    let reply = bot.handle_message(&msg("room", "ada", "hello")).await.unwrap();

    assert!(reply.text.starts_with("Sorry"));
    assert!(reply.point.is_none());
    assert!(bot.store().snapshot("room").await.is_none());
    assert!(bot.store().is_empty());
}
