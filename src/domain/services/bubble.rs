#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Sender;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    label: String,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn str_width(text: &str) -> usize {
    return text.width();
}

/// Splits off the longest prefix that fits in `width` columns. Always takes
/// at least one character so a wide character in a narrow column still
/// makes progress.
fn split_at_width(text: &str, width: usize) -> (String, String) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width && idx > 0 {
            return (text[..idx].to_string(), text[idx..].to_string());
        }
        used += ch_width;
    }

    return (text.to_string(), "".to_string());
}

/// Greedy word wrap measured in terminal columns. Words longer than the width
/// are split mid-word. Leading indentation stays on the first row when it
/// leaves room for text.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    let content = line.trim_start_matches(' ');
    let mut current = line[..line.len() - content.len()].to_string();
    if str_width(&current) >= width {
        current = "".to_string();
    }
    let mut has_words = false;

    for word in content.split(' ') {
        let mut word = word.to_string();
        while str_width(&word) > width {
            if has_words {
                lines.push(current);
                current = "".to_string();
                has_words = false;
            }
            let (head, tail) = split_at_width(&word, width - str_width(&current));
            lines.push(format!("{current}{head}"));
            current = "".to_string();
            word = tail;
        }

        // Rows never start with the space between two words.
        if word.is_empty() && !has_words && current.is_empty() {
            continue;
        }

        if !has_words {
            if str_width(&current) + str_width(&word) > width {
                current = "".to_string();
            }
            current = format!("{current}{word}");
        } else if str_width(&current) + 1 + str_width(&word) <= width {
            current = format!("{current} {word}");
        } else {
            lines.push(current);
            current = word;
        }
        has_words = true;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    return lines;
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        username: &str,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
            label: message.sender.label(username),
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Both vertical bars and the single space of padding inside each.
            bubble_padding: 4,
            // Bubble padding + scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();

        let lines = self
            .message
            .display_lines()
            .iter()
            .flat_map(|line| return wrap_line(line, max_line_length))
            .map(|line| return self.text_to_line(&line, max_line_length))
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn outer_padding(&self, max_line_length: usize) -> String {
        let bubble_width = max_line_length + Bubble::style_config().bubble_padding;
        return " ".repeat(self.window_max_width.saturating_sub(bubble_width));
    }

    fn text_to_line(&self, text: &str, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(str_width(text)));
        let outer_padding = self.outer_padding(max_line_length);

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            self.highlight_span(format!("{text}{fill}")),
            self.highlight_span(" │".to_string()),
        ];

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_padding)];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Keep at least 4% of the window free on the far side of the bubble.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(1);

        let longest = self
            .message
            .display_lines()
            .iter()
            .map(|line| return str_width(line))
            .max()
            .unwrap_or(0);

        return longest.min(available).max(str_width(&self.label)).max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the inner padding.
        let bar_width = max_line_length + 2;
        let label_fill = "─".repeat(bar_width.saturating_sub(str_width(&self.label)));
        let top_bar = format!("╭{}{label_fill}╮", self.label);
        let bottom_bar = format!("╰{}╯", "─".repeat(bar_width));
        let outer_padding = self.outer_padding(max_line_length);

        let (top, bottom) = if self.alignment == BubbleAlignment::Left {
            (
                format!("{top_bar}{outer_padding}"),
                format!("{bottom_bar}{outer_padding}"),
            )
        } else {
            (
                format!("{outer_padding}{top_bar}"),
                format!("{outer_padding}{bottom_bar}"),
            )
        };

        let mut res = vec![self.highlight_line(top)];
        res.extend(lines);
        res.push(self.highlight_line(bottom));

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(text, Style::default().fg(Color::Red));
        } else if self.message.sender == Sender::Bot {
            return Span::styled(text, Style::default().fg(Color::LightBlue));
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
