#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;

use super::BubbleList;
use super::ChatSession;
use super::Scroll;
use crate::domain::models::Agent;
use crate::domain::models::AgentPrompt;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Sender;
use crate::domain::models::TypingIndicator;

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub notice: Option<Message>,
    pub scroll: Scroll,
    pub session: ChatSession,
    pub typing: TypingIndicator,
}

impl AppState {
    pub fn new(session: ChatSession, username: &str, agent: &dyn Agent) -> AppState {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(username),
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            scroll: Scroll::default(),
            session,
            typing: TypingIndicator::default(),
        };

        if let Err(err) = agent.validate() {
            tracing::warn!(error = ?err, "Agent configuration is incomplete");
            app_state.notice = Some(Message::new_with_type(
                Sender::Bot,
                MessageType::Error,
                &format!("Hey, it looks like I'm not fully configured, so I can't reach the agent yet. Every message will fail until this is fixed.\n\nError: {err}"),
            ));
        }

        return app_state;
    }

    /// No conversation yet. A configuration notice doesn't count, the welcome
    /// text is drawn below it.
    pub fn is_empty(&self) -> bool {
        return self.session.messages().is_empty() && !self.session.is_busy();
    }

    /// Starts a submission, returning the prompt to hand to the agent.
    pub fn submit(&mut self, text: &str) -> Option<AgentPrompt> {
        let prompt = self.session.begin_submit(text)?;
        self.typing.reset();
        self.sync_dependants();
        self.scroll.last();

        return Some(prompt);
    }

    pub fn handle_agent_response(&mut self, result: Result<serde_json::Value>) {
        self.session.resolve(result);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn tick(&mut self) {
        if self.session.is_busy() {
            self.typing.advance();
            self.sync_dependants();
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    fn display_messages(&self) -> Vec<Message> {
        let mut messages = vec![];
        if let Some(notice) = &self.notice {
            messages.push(notice.clone());
        }

        messages.extend(self.session.messages().iter().cloned());

        if self.session.is_busy() {
            messages.push(self.typing.message());
        }

        return messages;
    }

    fn sync_dependants(&mut self) {
        let messages = self.display_messages();
        self.bubble_list
            .set_messages(&messages, self.last_known_width);

        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);

        if self.session.is_busy() {
            self.scroll.last();
        }
    }
}
