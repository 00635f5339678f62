//! Chat layer: prompt assembly and the external completion call
//!
//! This is deliberately thin plumbing around the ranker. It merges a fixed
//! system instruction, the ranked context block, a bounded window of recent
//! conversation turns, and the user's message into one chat-completion
//! payload, and makes a single attempt against an OpenAI-compatible
//! endpoint. No retries, no streaming; a failed call surfaces as an error
//! for the caller to turn into an apology.

use crate::config::ChatConfig;
use crate::ranker::Ranker;
use crate::{Result, ScoutError};
use serde::{Deserialize, Serialize};

/// Substituted for an empty ranker result before prompting
pub const NO_CONTEXT_PLACEHOLDER: &str = "No specific information found in the database.";

const SYSTEM_PROMPT: &str = "You are a helpful insurance advisor bot trained on PolicyAdvisor's data. \
You can answer questions about PolicyAdvisor's services, company information, leadership, and insurance products. \
Pay special attention to metadata like authors and publication dates when answering questions about the company. \
For leadership questions, note that article authors may be key company figures. \
Use the provided context to answer questions accurately and comprehensively. \
If you're not sure about something, say so rather than making assumptions.";

/// One request or response in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A chat session owning its bounded conversation history
pub struct ChatSession {
    config: ChatConfig,
    client: reqwest::Client,
    api_key: String,
    history: Vec<ConversationTurn>,
}

impl ChatSession {
    /// Creates a session, reading the API key from the configured env var
    pub fn new(config: ChatConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ScoutError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::with_api_key(config, api_key))
    }

    /// Creates a session with an explicit API key
    pub fn with_api_key(config: ChatConfig, api_key: String) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            api_key,
            history: Vec::new(),
        }
    }

    /// Answers one user message using ranked corpus context
    ///
    /// On success the request/response pair is appended to the history and
    /// the history is trimmed to the configured exchange window.
    pub async fn ask(&mut self, ranker: &Ranker, message: &str) -> Result<String> {
        let context = ranker.rank(message);
        let payload = self.build_payload(&context, message);

        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Completion(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let answer = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ScoutError::Completion("response contained no message content".to_string())
            })?
            .trim()
            .to_string();

        self.push_exchange(message, &answer);
        Ok(answer)
    }

    /// Builds the completion request payload
    fn build_payload(&self, context: &str, message: &str) -> serde_json::Value {
        let context = if context.is_empty() {
            NO_CONTEXT_PLACEHOLDER
        } else {
            context
        };

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": SYSTEM_PROMPT,
        })];

        for turn in self.recent_history() {
            messages.push(serde_json::json!({
                "role": turn.role,
                "content": turn.content,
            }));
        }

        messages.push(serde_json::json!({
            "role": "user",
            "content": format!("Context:\n{}\n\nQuestion: {}", context, message),
        }));

        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": 0.7,
            "max_tokens": 500,
        })
    }

    /// The last N exchanges (N request/response pairs) from the history
    fn recent_history(&self) -> &[ConversationTurn] {
        let window = self.config.max_history_exchanges * 2;
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    fn push_exchange(&mut self, message: &str, answer: &str) {
        self.history.push(ConversationTurn {
            role: Role::User,
            content: message.to_string(),
        });
        self.history.push(ConversationTurn {
            role: Role::Assistant,
            content: answer.to_string(),
        });

        // The stored history is bounded, not just the prompt window
        let window = self.config.max_history_exchanges * 2;
        if self.history.len() > window {
            self.history.drain(..self.history.len() - window);
        }
    }

    /// Number of stored conversation turns
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
