#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Sender;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    mtype: MessageType,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Message {
        return Message {
            sender,
            text: text.to_string(),
            mtype: MessageType::Normal,
        };
    }

    pub fn new_with_type(sender: Sender, mtype: MessageType, text: &str) -> Message {
        return Message {
            sender,
            text: text.to_string(),
            mtype,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    /// Text as it is drawn in a bubble. Tabs are expanded and an empty message
    /// still occupies one line.
    pub fn display_lines(&self) -> Vec<String> {
        let lines = self
            .text
            .replace('\t', "  ")
            .lines()
            .map(|line| return line.to_string())
            .collect::<Vec<String>>();

        if lines.is_empty() {
            return vec!["".to_string()];
        }

        return lines;
    }
}
