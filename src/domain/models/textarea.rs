use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

const MAX_VISIBLE_LINES: usize = 6;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(TextArea::block(false));

        return textarea;
    }

    /// Title flips to `...` while a reply is pending, mirroring a disabled
    /// send button. Blank input doesn't change it.
    pub fn title(busy: bool) -> &'static str {
        if busy {
            return "Message Macento... (...)";
        }

        return "Message Macento... (Enter: Send)";
    }

    pub fn block(busy: bool) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(TextArea::title(busy))
            .padding(Padding::new(1, 1, 0, 0));
    }

    /// Rows needed to show the input, growing with its content up to a cap.
    pub fn height(lines: &[String]) -> u16 {
        let visible = lines.len().clamp(1, MAX_VISIBLE_LINES);

        // Top and bottom border.
        return (visible + 2) as u16;
    }
}
