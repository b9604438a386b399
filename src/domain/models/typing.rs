use super::Message;
use super::Sender;

/// Bot bubble shown while the agent is working on a reply.
#[derive(Default)]
pub struct TypingIndicator {
    tick: usize,
}

impl TypingIndicator {
    pub fn advance(&mut self) {
        self.tick = (self.tick + 1) % 3;
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }

    pub fn message(&self) -> Message {
        let dots = ["."].repeat(self.tick + 1).join("");
        return Message::new(Sender::Bot, &format!("typing{dots}"));
    }
}

#[cfg(test)]
mod tests {
    use super::TypingIndicator;

    #[test]
    fn it_cycles_dots() {
        let mut typing = TypingIndicator::default();
        assert_eq!(typing.message().text, "typing.");
        typing.advance();
        assert_eq!(typing.message().text, "typing..");
        typing.advance();
        assert_eq!(typing.message().text, "typing...");
        typing.advance();
        assert_eq!(typing.message().text, "typing.");
        typing.advance();
        typing.reset();
        assert_eq!(typing.message().text, "typing.");
    }
}
