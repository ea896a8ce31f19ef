//! Per-conversation state and its in-memory store
//!
//! Every conversation owns one [`ConversationState`] behind its own async
//! mutex. Handlers hold that lock for the whole read-modify-write of a turn,
//! so two messages of the same conversation never race on a user's smoothed
//! channels, while different conversations proceed independently.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::Result;
use crate::feedback::FeedbackKind;
use crate::models::MoodSpace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub conversation_id: String,
    pub turn_count: u64,
    pub feedback: FeedbackKind,
    pub space: MoodSpace,
    pub created_at: DateTime<Utc>,
}

impl ConversationState {
    pub fn new(conversation_id: impl Into<String>, feedback: FeedbackKind) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            turn_count: 0,
            feedback,
            space: MoodSpace::new(),
            created_at: Utc::now(),
        }
    }
}

pub type ConversationHandle = Arc<Mutex<ConversationState>>;

/// In-memory conversation store keyed by conversation id
pub struct ConversationStore {
    conversations: DashMap<String, ConversationHandle>,
    default_feedback: FeedbackKind,
}

impl ConversationStore {
    pub fn new(default_feedback: FeedbackKind) -> Self {
        Self {
            conversations: DashMap::new(),
            default_feedback,
        }
    }

    /// Handle for `id`, creating an empty conversation on first use
    pub fn handle(&self, id: &str) -> ConversationHandle {
        self.conversations
            .entry(id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationState::new(id, self.default_feedback)))
            })
            .clone()
    }

    /// Existing handle for `id` without creating one
    pub fn get(&self, id: &str) -> Option<ConversationHandle> {
        self.conversations.get(id).map(|entry| entry.value().clone())
    }

    /// Feedback kind given to new conversations
    pub fn default_feedback(&self) -> FeedbackKind {
        self.default_feedback
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Sorted conversation ids
    pub fn conversation_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .conversations
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Copy of a conversation's state
    pub async fn snapshot(&self, id: &str) -> Option<ConversationState> {
        let handle = self.get(id)?;
        let state = handle.lock().await;
        Some(state.clone())
    }

    /// Mood space of `id`; empty for unknown conversations
    pub async fn load_mood_space(&self, id: &str) -> MoodSpace {
        match self.get(id) {
            Some(handle) => handle.lock().await.space.clone(),
            None => MoodSpace::new(),
        }
    }

    /// Replace the mood space of `id`
    pub async fn save_mood_space(&self, id: &str, space: MoodSpace) {
        let handle = self.handle(id);
        handle.lock().await.space = space;
    }

    /// Clear a conversation's mood space, keeping its settings
    pub async fn reset(&self, id: &str) -> bool {
        match self.get(id) {
            Some(handle) => {
                handle.lock().await.space.clear();
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        self.conversations.remove(id).is_some()
    }

    /// Write every conversation to a JSON file
    pub async fn save_to_path(&self, path: impl AsRef<Path>) -> Result<usize> {
        let mut all = BTreeMap::new();
        let handles: Vec<(String, ConversationHandle)> = self
            .conversations
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        for (id, handle) in handles {
            all.insert(id, handle.lock().await.clone());
        }

        let json = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(path.as_ref(), json).await?;
        info!(
            "Saved {} conversations to {}",
            all.len(),
            path.as_ref().display()
        );
        Ok(all.len())
    }

    /// Load conversations from a JSON file written by [`Self::save_to_path`],
    /// replacing any in-memory conversation with the same id
    pub async fn load_from_path(&self, path: impl AsRef<Path>) -> Result<usize> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let all: BTreeMap<String, ConversationState> = serde_json::from_str(&json)?;
        let count = all.len();
        for (id, state) in all {
            self.conversations.insert(id, Arc::new(Mutex::new(state)));
        }
        info!(
            "Loaded {} conversations from {}",
            count,
            path.as_ref().display()
        );
        Ok(count)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(FeedbackKind::default())
    }
}
