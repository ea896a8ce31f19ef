//! Chat turn handling
//!
//! [`MoodBot`] is the glue between a transport (HTTP API, stdin chat) and the
//! mood projection: it scores the message, folds the reading into the
//! conversation's mood space under the conversation lock, and renders the
//! conversation's selected feedback.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::conversation::ConversationState;
use crate::conversation::ConversationStore;
use crate::errors::Result;
use crate::feedback::emoji_reply;
use crate::feedback::empathy_reply;
use crate::feedback::ChartRenderer;
use crate::feedback::FeedbackKind;
use crate::models::EmotionScores;
use crate::models::MoodPoint;
use crate::projector::MoodProjector;
use crate::tone::ToneService;

const DEFAULT_CONVERSATION: &str = "default";
const ANONYMOUS: &str = "anonymous";
const TONE_FAILURE_REPLY: &str =
    "Sorry, I couldn't read the tone of that message. Please try again later!";

/// A chat message delivered by a transport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
}

impl IncomingMessage {
    pub fn new(
        conversation_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            text: text.into(),
        }
    }

    /// Fill missing identifiers: the user id falls back to the name, then
    /// `anonymous`; the name falls back to the id.
    fn normalized(&self) -> (String, String, String) {
        let conversation = non_empty(&self.conversation_id).unwrap_or(DEFAULT_CONVERSATION);
        let user_id = non_empty(&self.user_id)
            .or_else(|| non_empty(&self.user_name))
            .unwrap_or(ANONYMOUS);
        let user_name = non_empty(&self.user_name).unwrap_or(user_id);
        (
            conversation.to_string(),
            user_id.to_string(),
            user_name.to_string(),
        )
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The bot's answer to one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotReply {
    pub text: String,
    /// Chart image for the line and scatter feedback kinds
    pub image_url: Option<String>,
    /// The speaker's point after this message, when it was scored
    pub point: Option<MoodPoint>,
    pub feedback: FeedbackKind,
}

impl BotReply {
    fn text(text: impl Into<String>, feedback: FeedbackKind) -> Self {
        Self {
            text: text.into(),
            image_url: None,
            point: None,
            feedback,
        }
    }
}

/// Chat commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    SetFeedback(FeedbackKind),
    Mood,
    Reset,
    Help,
}

impl BotCommand {
    /// Parse `/command`; unknown commands map to help. `None` for plain text.
    pub fn parse(text: &str) -> Option<Self> {
        let command = text.trim().strip_prefix('/')?;
        let name = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Some(match name.as_str() {
            "mood" => BotCommand::Mood,
            "reset" => BotCommand::Reset,
            other => match other.parse::<FeedbackKind>() {
                Ok(kind) => BotCommand::SetFeedback(kind),
                Err(_) => BotCommand::Help,
            },
        })
    }
}

pub fn help_text() -> String {
    let mut text = String::from("Talk to me and I'll reflect your mood back. Commands:\n");
    for kind in FeedbackKind::ALL {
        text.push_str(&format!("  /{kind} - {}\n", kind.description()));
    }
    text.push_str("  /mood - show your current mood point\n");
    text.push_str("  /reset - forget everyone's mood in this conversation\n");
    text.push_str("  /help - show this message");
    text
}

pub struct MoodBot {
    projector: MoodProjector,
    tone: ToneService,
    charts: ChartRenderer,
    store: Arc<ConversationStore>,
    threshold: f64,
    history_limit: usize,
}

impl MoodBot {
    /// Build the bot and its collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(ConversationStore::new(config.bot.default_feedback));
        Self::with_parts(config, ToneService::new(config)?, store)
    }

    /// Build the bot around an existing tone service and store
    pub fn with_parts(
        config: &AppConfig,
        tone: ToneService,
        store: Arc<ConversationStore>,
    ) -> Result<Self> {
        Ok(Self {
            projector: MoodProjector::new(config.projector.clone()),
            tone,
            charts: ChartRenderer::new(&config.chart)?,
            store,
            threshold: config.tone.threshold,
            history_limit: config.history_limit(),
        })
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn projector(&self) -> &MoodProjector {
        &self.projector
    }

    pub fn charts(&self) -> &ChartRenderer {
        &self.charts
    }

    pub fn tone(&self) -> &ToneService {
        &self.tone
    }

    /// Handle one chat message and produce the reply
    pub async fn handle_message(&self, message: &IncomingMessage) -> Result<BotReply> {
        let (conversation_id, user_id, user_name) = message.normalized();

        if let Some(command) = BotCommand::parse(&message.text) {
            return Ok(self
                .handle_command(command, &conversation_id, &user_id)
                .await);
        }

        // Scored outside the lock; only the state update is serialized
        let reading = match self.tone.analyze(&message.text).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(
                    "Tone analysis failed for {} in {}: {}",
                    user_id, conversation_id, e
                );
                let feedback = match self.store.get(&conversation_id) {
                    Some(handle) => {
                        let state = handle.lock().await;
                        state.feedback
                    }
                    None => self.store.default_feedback(),
                };
                return Ok(BotReply::text(TONE_FAILURE_REPLY, feedback));
            }
        };

        let handle = self.store.handle(&conversation_id);
        let mut state = handle.lock().await;
        state.turn_count += 1;
        let point = self.projector.observe(
            &mut state.space,
            &user_id,
            &user_name,
            &reading,
            self.history_limit,
        );
        info!(
            "Turn {} in {}: {} -> {}",
            state.turn_count, conversation_id, user_id, point
        );

        Ok(self.render(&state, &user_id, &reading, point))
    }

    fn render(
        &self,
        state: &ConversationState,
        user_id: &str,
        reading: &EmotionScores,
        point: MoodPoint,
    ) -> BotReply {
        let feedback = state.feedback;
        let mut reply = match feedback {
            FeedbackKind::Emoji => BotReply::text(emoji_reply(reading, self.threshold), feedback),
            FeedbackKind::Empathy => match state.space.get(user_id) {
                Some(user) => BotReply::text(empathy_reply(user), feedback),
                None => BotReply::text(emoji_reply(reading, self.threshold), feedback),
            },
            FeedbackKind::Line => {
                let mut reply = BotReply::text("Here's how your mood has been going:", feedback);
                reply.image_url = state
                    .space
                    .get(user_id)
                    .map(|user| self.charts.line_url(user).to_string());
                reply
            }
            FeedbackKind::Scatter => {
                let mut reply = BotReply::text("Here's where everyone stands:", feedback);
                reply.image_url = Some(self.charts.scatter_url(&state.space).to_string());
                reply
            }
        };
        reply.point = Some(point);
        reply
    }

    async fn handle_command(
        &self,
        command: BotCommand,
        conversation_id: &str,
        user_id: &str,
    ) -> BotReply {
        let handle = self.store.handle(conversation_id);
        let mut state = handle.lock().await;

        match command {
            BotCommand::SetFeedback(kind) => {
                state.feedback = kind;
                info!("Feedback for {} set to {}", conversation_id, kind);
                BotReply::text(
                    format!("Okay, from now on I'll reply with {}.", kind.description()),
                    kind,
                )
            }
            BotCommand::Mood => {
                let feedback = state.feedback;
                match state.space.get(user_id) {
                    Some(user) => {
                        let mut reply = BotReply::text(
                            format!("Your mood point is {}.", user.point()),
                            feedback,
                        );
                        reply.point = Some(user.point());
                        reply
                    }
                    None => BotReply::text(
                        "I haven't heard from you yet. Tell me how you're doing!",
                        feedback,
                    ),
                }
            }
            BotCommand::Reset => {
                state.space.clear();
                info!("Mood space of {} reset", conversation_id);
                BotReply::text("Okay, I've forgotten everyone's mood.", state.feedback)
            }
            BotCommand::Help => BotReply::text(help_text(), state.feedback),
        }
    }
}
