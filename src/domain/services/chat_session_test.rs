use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value;

use super::ChatSession;
use crate::domain::models::Agent;
use crate::domain::models::AgentPrompt;
use crate::domain::models::MessageType;
use crate::domain::models::Sender;
use crate::domain::services::reply::ERROR_REPLY;
use crate::domain::services::reply::FALLBACK_REPLY;

#[derive(Default)]
struct MockAgent {
    replies: Mutex<VecDeque<Result<Value>>>,
    prompts: Mutex<Vec<AgentPrompt>>,
}

impl MockAgent {
    fn with_replies(replies: Vec<Result<Value>>) -> MockAgent {
        return MockAgent {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(vec![]),
        };
    }

    fn prompts(&self) -> Vec<AgentPrompt> {
        return self.prompts.lock().unwrap().clone();
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn validate(&self) -> Result<()> {
        return Ok(());
    }

    async fn run(&self, prompt: AgentPrompt) -> Result<Value> {
        self.prompts.lock().unwrap().push(prompt);
        return self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| return Err(anyhow!("No reply queued")));
    }
}

#[test]
fn it_generates_a_session_id() {
    let first = ChatSession::default();
    let second = ChatSession::default();

    assert!(!first.session_id().is_empty());
    assert_ne!(first.session_id(), second.session_id());
    assert!(first.messages().is_empty());
    assert!(!first.is_busy());
}

#[test]
fn it_appends_user_message_before_any_reply() {
    let mut session = ChatSession::new("session-1");
    session.set_pending_input("  Hello agent  ");

    let prompt = session.begin_submit("  Hello agent  ").unwrap();

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].sender, Sender::User);
    assert_eq!(session.messages()[0].text, "Hello agent");
    assert_eq!(session.pending_input(), "");
    assert!(session.is_busy());
    assert_eq!(prompt, AgentPrompt::new("Hello agent", "session-1"));
}

#[test]
fn it_ignores_submissions_while_busy() {
    let mut session = ChatSession::new("session-1");
    session.begin_submit("first").unwrap();

    assert!(session.begin_submit("second").is_none());
    assert_eq!(session.messages().len(), 1);
    assert!(session.is_busy());
}

#[test]
fn it_ignores_blank_submissions() {
    let mut session = ChatSession::new("session-1");

    assert!(session.begin_submit("").is_none());
    assert!(session.begin_submit("   \n\t ").is_none());
    assert!(session.messages().is_empty());
    assert!(!session.is_busy());
}

#[test]
fn it_is_busy_only_until_resolved() {
    let mut session = ChatSession::new("session-1");
    assert!(!session.is_busy());

    session.begin_submit("Hello").unwrap();
    assert!(session.is_busy());

    session.resolve(Ok(json!({"message": "top"})));
    assert!(!session.is_busy());
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].sender, Sender::Bot);
    assert_eq!(session.messages()[1].text, "top");
}

#[test]
fn it_ignores_resolutions_without_a_request() {
    let mut session = ChatSession::new("session-1");
    session.resolve(Ok(json!({"message": "stray"})));

    assert!(session.messages().is_empty());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn it_appends_the_extracted_reply() {
    let agent = MockAgent::with_replies(vec![Ok(
        json!({"outputs":[{"outputs":[{"messages":[{"message":"hi"}]}]}]}),
    )]);
    let mut session = ChatSession::new("session-1");

    session.submit(&agent, "Hello").await;

    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].text, "hi");
    assert_eq!(session.messages()[1].message_type(), MessageType::Normal);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn it_appends_the_fallback_for_unknown_shapes() {
    let agent = MockAgent::with_replies(vec![Ok(json!({}))]);
    let mut session = ChatSession::new("session-1");

    session.submit(&agent, "Hello").await;

    assert_eq!(session.messages()[1].text, FALLBACK_REPLY);
    assert_eq!(session.messages()[1].message_type(), MessageType::Normal);
}

#[tokio::test]
async fn it_appends_the_error_on_failure() {
    let agent = MockAgent::with_replies(vec![Err(anyhow!("connection refused"))]);
    let mut session = ChatSession::new("session-1");

    session.submit(&agent, "Hello").await;

    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].sender, Sender::Bot);
    assert_eq!(session.messages()[1].text, ERROR_REPLY);
    assert_eq!(session.messages()[1].message_type(), MessageType::Error);
    assert!(!session.is_busy());
    assert_eq!(agent.prompts().len(), 1);
}

#[tokio::test]
async fn it_reuses_the_session_id_across_submits() {
    let agent = MockAgent::with_replies(vec![
        Ok(json!({"message": "one"})),
        Ok(json!({"message": "two"})),
    ]);
    let mut session = ChatSession::default();
    let session_id = session.session_id().to_string();

    session.submit(&agent, "first").await;
    session.submit(&agent, "second").await;

    let prompts = agent.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].session_id, session_id);
    assert_eq!(prompts[1].session_id, session_id);
    assert_eq!(session.session_id(), session_id);

    let texts = session
        .messages()
        .iter()
        .map(|message| return message.text.to_string())
        .collect::<Vec<String>>();
    assert_eq!(texts, vec!["first", "one", "second", "two"]);
}

#[tokio::test]
async fn it_never_requests_for_blank_input() {
    let agent = MockAgent::default();
    let mut session = ChatSession::new("session-1");

    session.submit(&agent, "   ").await;

    assert!(agent.prompts().is_empty());
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn it_submits_pending_input() {
    let agent = MockAgent::with_replies(vec![Ok(json!({"message": "done"}))]);
    let mut session = ChatSession::new("session-1");
    session.set_pending_input("What's new?\n");

    session.submit_pending(&agent).await;

    assert_eq!(agent.prompts()[0].text, "What's new?");
    assert_eq!(session.pending_input(), "");
    assert_eq!(session.messages()[1].text, "done");
}
