use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseEventKind};
use futures::{Stream, StreamExt};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::config::AppConfig;
use crate::tui::colors::palette;
use crate::tui::components::log_indicator::{AutoScroll, LogIndicator};
use crate::tui::handler_result::KeyHandlerResult;
use crate::tui::styles::{BUILTIN_SKINS, StyleRegistry, Styles};
use crate::tui::terminal_lifecycle::{LogdeckTerminal, init_terminal, restore_terminal};

const KEY_HELP: [(&str, &str); 7] = [
    ("s", "toggle autoscroll"),
    ("f", "toggle full screen"),
    ("t", "toggle timestamps"),
    ("w", "toggle wrap"),
    ("r", "redraw indicator"),
    ("k", "cycle bundled skins"),
    ("q", "quit"),
];

pub struct AppState {
    pub indicator: LogIndicator,
    styles: Arc<StyleRegistry>,
    skin_index: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, styles: Arc<StyleRegistry>) -> Self {
        let indicator = LogIndicator::new(config, &styles);
        Self {
            indicator,
            styles,
            skin_index: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyHandlerResult {
        if key.kind != KeyEventKind::Press {
            return KeyHandlerResult::NotHandled;
        }

        match key.code {
            KeyCode::Char('s') => self.indicator.toggle_auto_scroll(),
            KeyCode::Char('f') => self.indicator.toggle_full_screen(),
            KeyCode::Char('t') => self.indicator.toggle_timestamp(),
            KeyCode::Char('w') => self.indicator.toggle_text_wrap(),
            KeyCode::Char('r') => self.indicator.refresh(),
            KeyCode::Char('k') => self.next_skin(),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return KeyHandlerResult::ShouldQuit;
            }
            _ => return KeyHandlerResult::NotHandled,
        }

        KeyHandlerResult::Handled
    }

    fn next_skin(&mut self) {
        self.skin_index = (self.skin_index + 1) % BUILTIN_SKINS.len();
        let name = BUILTIN_SKINS[self.skin_index];
        if let Some(styles) = Styles::builtin(name) {
            self.styles.update(styles);
            self.status_message = Some(format!("Skin: {}", name));
        }
    }

    /// Lines shown in the pane body, prefixed with the wall clock when
    /// timestamps are on.
    pub fn pane_lines(&self, now: &str) -> Vec<Line<'static>> {
        KEY_HELP
            .iter()
            .map(|(key, action)| {
                let text = format!("{:>3}  {}", key, action);
                if self.indicator.timestamp() {
                    Line::from(format!("{} {}", now, text))
                } else {
                    Line::from(text)
                }
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame) {
        let full_screen = self.indicator.is_full_screen();
        let header_height = if full_screen { 0 } else { 1 };
        let [header, body, indicator] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        if !full_screen {
            let title = self
                .status_message
                .clone()
                .unwrap_or_else(|| "logdeck".to_string());
            frame.render_widget(
                Paragraph::new(title).style(
                    Style::default()
                        .fg(palette::HEADER_TITLE)
                        .add_modifier(Modifier::BOLD),
                ),
                header,
            );
        }

        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        let mut pane = Paragraph::new(self.pane_lines(&now))
            .style(Style::default().fg(palette::PRIMARY_TEXT))
            .block(
                Block::default()
                    .borders(if full_screen { Borders::NONE } else { Borders::ALL })
                    .border_style(Style::default().fg(palette::PRIMARY_BORDER)),
            );
        if self.indicator.text_wrap() {
            pane = pane.wrap(Wrap { trim: false });
        }
        frame.render_widget(pane, body);
        frame.render_widget(&self.indicator, indicator);
    }
}

/// Forwards terminal events to the render loop. Scrolling up is handled here,
/// off the render thread, by switching autoscroll off through the shared handle.
/// A read error is forwarded and ends the task.
async fn forward_input<S>(
    mut events: S,
    auto_scroll: AutoScroll,
    tx: mpsc::UnboundedSender<io::Result<Event>>,
) where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Mouse(mouse)) if mouse.kind == MouseEventKind::ScrollUp => {
                auto_scroll.disable();
            }
            Ok(event) => {
                if tx.send(Ok(event)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}

async fn run_event_loop(terminal: &mut LogdeckTerminal, app: &mut AppState) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_task = tokio::spawn(forward_input(
        EventStream::new(),
        app.indicator.auto_scroll_handle(),
        event_tx,
    ));
    let mut render_interval = interval(Duration::from_millis(100));

    let result = loop {
        tokio::select! {
            _ = render_interval.tick() => {}
            event = event_rx.recv() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        app.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        break Err(anyhow::Error::from(e).context("Failed to read terminal input"));
                    }
                    None => break Ok(()),
                }
            }
        }

        if app.should_quit {
            break Ok(());
        }

        app.indicator.sync_auto_scroll();
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }
    };

    input_task.abort();
    result
}

pub async fn run(config: AppConfig, styles: Arc<StyleRegistry>) -> Result<()> {
    let mut app = AppState::new(&config, styles);
    let mut terminal = init_terminal()?;

    if let Err(e) = terminal.clear() {
        restore_terminal(terminal)?;
        return Err(e.into());
    }

    let result = run_event_loop(&mut terminal, &mut app).await;
    restore_terminal(terminal)?;
    result
}
