//! Terminal chat widget
//!
//! The visual surface of the [`ConversationController`]: a language selector
//! followed by the chat view. Proxy requests run on spawned tasks and their
//! results come back over a channel, so the UI keeps drawing (and the
//! in-flight guard keeps rejecting input) while a reply is pending.

mod tui;
mod ui;

pub use ui::render;

use crate::api::{ChatRequest, ChatResponse};
use crate::client::{ChatTransport, HttpChatTransport, TransportError};
use crate::config::WidgetConfig;
use crate::controller::ConversationController;
use crate::conversation::Phase;
use crate::language::Language;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tui::AppEvent;

/// Selector grid width, in buttons
pub(crate) const SELECTOR_COLUMNS: usize = 3;

/// Widget state layered over the controller
pub struct WidgetApp {
    pub controller: ConversationController,
    /// Highlighted button on the selector screen
    pub selected: usize,
    /// Messages scrolled back from the newest one
    pub scroll_back: usize,
    /// Animation frame for the typing indicator
    pub frame: usize,
    pub should_quit: bool,
}

impl Default for WidgetApp {
    fn default() -> Self {
        Self::new(ConversationController::new())
    }
}

impl WidgetApp {
    pub fn new(controller: ConversationController) -> Self {
        Self {
            controller,
            selected: 0,
            scroll_back: 0,
            frame: 0,
            should_quit: false,
        }
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Apply a key press; returns a request to dispatch when a message was
    /// accepted
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChatRequest> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return None;
        }

        match self.controller.phase() {
            Phase::SelectingLanguage => {
                self.handle_selector_key(key);
                None
            }
            Phase::Chatting => self.handle_chat_key(key),
        }
    }

    /// Record a finished request and follow the transcript to its end
    pub fn handle_response(&mut self, result: Result<ChatResponse, TransportError>) {
        self.controller.complete_request(result);
        self.follow_latest();
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        let count = Language::all().len();
        match key.code {
            KeyCode::Left => self.selected = (self.selected + count - 1) % count,
            KeyCode::Right | KeyCode::Tab => self.selected = (self.selected + 1) % count,
            KeyCode::Up => self.selected = self.selected.saturating_sub(SELECTOR_COLUMNS),
            KeyCode::Down => {
                self.selected = (self.selected + SELECTOR_COLUMNS).min(count - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .map_or(usize::MAX, |d| d - 1);
                if index < count {
                    self.selected = index;
                    self.choose_language();
                }
            }
            KeyCode::Enter => self.choose_language(),
            _ => {}
        }
    }

    fn choose_language(&mut self) {
        if let Some(language) = Language::all().get(self.selected) {
            self.controller.select_language(language);
            self.follow_latest();
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<ChatRequest> {
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.controller.change_language();
            self.selected = self
                .controller
                .language()
                .and_then(|current| Language::all().iter().position(|l| l == current))
                .unwrap_or(0);
            return None;
        }

        match key.code {
            KeyCode::PageUp | KeyCode::Up => {
                let visible = self.controller.visible_messages().count();
                self.scroll_back = (self.scroll_back + 1).min(visible.saturating_sub(1));
                None
            }
            KeyCode::PageDown | KeyCode::Down => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
                None
            }
            _ => self.handle_input_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<ChatRequest> {
        // Input is disabled while a reply is pending
        if self.controller.is_awaiting_reply() {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                let request = self.controller.submit_input();
                self.follow_latest();
                request
            }
            KeyCode::Backspace => {
                self.controller.input_mut().pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.input_mut().push(c);
                None
            }
            _ => None,
        }
    }

    fn follow_latest(&mut self) {
        if self.controller.take_scroll_request() {
            self.scroll_back = 0;
        }
    }
}

/// Run the widget until the user quits
pub async fn run(config: &WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpChatTransport::new(&config.proxy_url)?);
    tracing::info!(proxy = %config.proxy_url, "Starting widget");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = event_loop(&mut terminal, transport).await;
    tui::restore()?;
    result
}

async fn event_loop(
    terminal: &mut tui::Tui,
    transport: Arc<dyn ChatTransport>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = WidgetApp::default();
    let mut events = tui::EventHandler::new();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

    while !app.should_quit {
        terminal.draw(|frame| render(frame, &app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => {
                    if let Some(request) = app.handle_key(key) {
                        let transport = transport.clone();
                        let reply_tx = reply_tx.clone();
                        tokio::spawn(async move {
                            let result = transport.send(&request).await;
                            // Receiver gone means the widget is shutting down
                            let _ = reply_tx.send(result);
                        });
                    }
                }
                Some(AppEvent::Tick) => app.tick(),
                Some(AppEvent::Resize) => {}
                None => break,
            },
            Some(result) = reply_rx.recv() => app.handle_response(result),
        }
    }

    Ok(())
}
