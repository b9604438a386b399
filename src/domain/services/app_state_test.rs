use anyhow::anyhow;
use serde_json::json;

use super::AppState;
use crate::domain::models::MessageType;
use crate::domain::services::ChatSession;
use crate::infrastructure::agents::Langflow;

fn configured() -> AppState {
    let agent = Langflow::new("http://localhost:7860/api/v1/run/flow", "org", "tok");
    let mut app_state = AppState::new(ChatSession::new("session-1"), "dana", &agent);
    app_state.last_known_width = 60;
    app_state.last_known_height = 20;

    return app_state;
}

#[test]
fn it_starts_empty_when_configured() {
    let app_state = configured();
    assert!(app_state.notice.is_none());
    assert!(app_state.is_empty());
}

#[test]
fn it_warns_when_unconfigured() {
    let agent = Langflow::new("http://localhost:7860/api/v1/run/flow", "", "");
    let app_state = AppState::new(ChatSession::new("session-1"), "dana", &agent);

    let notice = app_state.notice.as_ref().unwrap();
    assert_eq!(notice.message_type(), MessageType::Error);
    assert!(notice.text.contains("token is not defined"));
    assert!(app_state.is_empty());
    assert!(app_state.session.messages().is_empty());
}

#[test]
fn it_keeps_the_notice_above_the_conversation() {
    let agent = Langflow::new("http://localhost:7860/api/v1/run/flow", "", "");
    let mut app_state = AppState::new(ChatSession::new("session-1"), "dana", &agent);
    app_state.last_known_width = 60;
    app_state.last_known_height = 20;
    app_state.sync_dependants();
    let notice_lines = app_state.bubble_list.len();
    assert!(notice_lines > 0);

    app_state.submit("Hello").unwrap();
    assert!(!app_state.is_empty());
    assert!(app_state.bubble_list.len() > notice_lines);
}

#[test]
fn it_shows_typing_while_waiting() {
    let mut app_state = configured();

    let prompt = app_state.submit("Hello").unwrap();
    assert_eq!(prompt.session_id, "session-1");
    assert!(app_state.session.is_busy());
    assert!(!app_state.is_empty());

    // User bubble plus the typing bubble.
    assert_eq!(app_state.bubble_list.len(), 6);
    assert!(app_state.submit("Again").is_none());

    app_state.tick();
    assert_eq!(app_state.typing.message().text, "typing..");
}

#[test]
fn it_replaces_typing_with_the_reply() {
    let mut app_state = configured();
    app_state.submit("Hello").unwrap();

    app_state.handle_agent_response(Ok(json!({"message": "Hi!"})));

    assert!(!app_state.session.is_busy());
    assert_eq!(app_state.session.messages().len(), 2);
    assert_eq!(app_state.session.messages()[1].text, "Hi!");
    assert_eq!(app_state.bubble_list.len(), 6);
}

#[test]
fn it_replaces_typing_with_the_error() {
    let mut app_state = configured();
    app_state.submit("Hello").unwrap();

    app_state.handle_agent_response(Err(anyhow!("timed out")));

    assert!(!app_state.session.is_busy());
    assert_eq!(
        app_state.session.messages()[1].message_type(),
        MessageType::Error
    );
}

#[test]
fn it_only_animates_while_busy() {
    let mut app_state = configured();
    app_state.tick();
    assert_eq!(app_state.typing.message().text, "typing.");
}
