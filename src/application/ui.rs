use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatSession;
use crate::infrastructure::agents::Langflow;

fn render_header(frame: &mut Frame, rect: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "MACENTO AGENT",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Conversational Intelligence",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::BOTTOM))
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_welcome(frame: &mut Frame, rect: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("How can I help you today?"),
        Line::from(""),
        Line::from(Span::styled(
            "Tip: Press Enter to send • Shift/Alt + Enter for a new line",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn render_footer(frame: &mut Frame, rect: Rect) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Macento • Experimental • Do not share sensitive info",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str("What can you help me with?");
        app_state
            .session
            .set_pending_input(&textarea.lines().join("\n"));
    }

    loop {
        textarea.set_block(TextArea::block(app_state.session.is_busy()));

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(TextArea::height(textarea.lines())),
                    Constraint::Length(1),
                ])
                .split(frame.size());

            render_header(frame, layout[0]);

            if usize::from(layout[1].width) != app_state.last_known_width
                || usize::from(layout[1].height) != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            if app_state.is_empty() {
                let notice_height = u16::try_from(app_state.bubble_list.len())
                    .unwrap_or(u16::MAX)
                    .min(layout[1].height);
                let welcome_layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(vec![
                        Constraint::Length(notice_height),
                        Constraint::Min(1),
                    ])
                    .split(layout[1]);

                app_state.bubble_list.render(frame, welcome_layout[0], 0);
                render_welcome(frame, welcome_layout[1]);
            } else {
                app_state
                    .bubble_list
                    .render(frame, layout[1], app_state.scroll.position);
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    layout[1].inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            frame.render_widget(textarea.widget(), layout[2]);
            render_footer(frame, layout[3]);
        })?;

        match events.next().await? {
            Event::AgentResponse(res) => {
                app_state.handle_agent_response(res);
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
                app_state
                    .session
                    .set_pending_input(&textarea.lines().join("\n"));
            }
            Event::KeyboardNewline() => {
                textarea.insert_newline();
                app_state
                    .session
                    .set_pending_input(&textarea.lines().join("\n"));
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(text);
                app_state
                    .session
                    .set_pending_input(&textarea.lines().join("\n"));
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                let input_str = app_state.session.pending_input().to_string();
                if let Some(prompt) = app_state.submit(&input_str) {
                    textarea = TextArea::default();
                    tx.send(Action::AgentRequest(prompt))?;
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
            }
            Event::UIResize() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(
        ChatSession::default(),
        &Config::get(ConfigKey::Username),
        &Langflow::default(),
    );
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
