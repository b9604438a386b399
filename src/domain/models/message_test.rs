use test_utils::long_reply_fixture;

use super::Message;
use super::MessageType;
use super::Sender;

#[test]
fn it_executes_new() {
    let msg = Message::new(Sender::Bot, "Hi there!");
    assert_eq!(msg.sender, Sender::Bot);
    assert_eq!(msg.sender.to_string(), "bot");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
}

#[test]
fn it_keeps_text_unchanged() {
    let msg = Message::new(Sender::User, "\tHi there!");
    assert_eq!(msg.text, "\tHi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Sender::Bot, MessageType::Error, "It broke!");
    assert_eq!(msg.sender, Sender::Bot);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_labels_senders() {
    assert_eq!(Sender::User.label("dana"), "dana");
    assert_eq!(Sender::Bot.label("dana"), "Macento");
}

#[test]
fn it_splits_display_lines() {
    let msg = Message::new(Sender::Bot, long_reply_fixture());
    let lines = msg.display_lines();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Hello! I'm the Macento agent.");
    assert_eq!(lines[1], "");
    assert_eq!(lines[3], "  Tabs are replaced by two spaces.");
}

#[test]
fn it_keeps_one_line_for_empty_text() {
    let msg = Message::new(Sender::Bot, "");
    assert_eq!(msg.display_lines(), vec!["".to_string()]);
}
