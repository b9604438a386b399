#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use anyhow::Result;
use uuid::Uuid;

use super::reply::extract_reply;
use super::reply::ERROR_REPLY;
use crate::domain::models::Agent;
use crate::domain::models::AgentPrompt;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Sender;

/// Conversation state for one process lifetime.
///
/// A submission moves the session from idle to awaiting a reply and back.
/// Only one request may be outstanding, and every accepted user message is
/// answered by exactly one bot message, either the reply, a fallback when the
/// reply can't be located, or a fixed error.
pub struct ChatSession {
    session_id: String,
    messages: Vec<Message>,
    pending_input: String,
    busy: bool,
}

impl Default for ChatSession {
    fn default() -> ChatSession {
        return ChatSession::new(&Uuid::new_v4().to_string());
    }
}

impl ChatSession {
    pub fn new(session_id: &str) -> ChatSession {
        tracing::debug!(session_id = session_id, "New chat session");

        return ChatSession {
            session_id: session_id.to_string(),
            messages: vec![],
            pending_input: "".to_string(),
            busy: false,
        };
    }

    pub fn session_id(&self) -> &str {
        return &self.session_id;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn pending_input(&self) -> &str {
        return &self.pending_input;
    }

    pub fn set_pending_input(&mut self, text: &str) {
        self.pending_input = text.to_string();
    }

    pub fn is_busy(&self) -> bool {
        return self.busy;
    }

    pub fn can_submit(&self, text: &str) -> bool {
        return !self.busy && !text.trim().is_empty();
    }

    /// First half of a submission. Records the user message and marks the
    /// session busy, returning the prompt to send. Returns `None` without
    /// touching any state when the text is blank or a reply is pending.
    pub fn begin_submit(&mut self, text: &str) -> Option<AgentPrompt> {
        if !self.can_submit(text) {
            return None;
        }

        let text = text.trim();
        self.messages.push(Message::new(Sender::User, text));
        self.pending_input = "".to_string();
        self.busy = true;

        tracing::info!(session_id = %self.session_id, "Sending message to agent");

        return Some(AgentPrompt::new(text, &self.session_id));
    }

    /// Second half of a submission. Appends the bot message for the
    /// outstanding request and returns the session to idle.
    pub fn resolve(&mut self, result: Result<serde_json::Value>) {
        if !self.busy {
            tracing::warn!("Ignoring agent response with no request outstanding");
            return;
        }

        match result {
            Ok(body) => {
                let reply = extract_reply(&body);
                self.messages.push(Message::new(Sender::Bot, &reply));
            }
            Err(err) => {
                tracing::error!(error = ?err, "Agent request failed");
                self.messages.push(Message::new_with_type(
                    Sender::Bot,
                    MessageType::Error,
                    ERROR_REPLY,
                ));
            }
        }

        self.busy = false;
        tracing::debug!(session_id = %self.session_id, "Agent call finished");
    }

    pub async fn submit<A: Agent + ?Sized>(&mut self, agent: &A, text: &str) {
        if let Some(prompt) = self.begin_submit(text) {
            let res = agent.run(prompt).await;
            self.resolve(res);
        }
    }

    pub async fn submit_pending<A: Agent + ?Sized>(&mut self, agent: &A) {
        let text = self.pending_input.to_string();
        self.submit(agent, &text).await;
    }
}
