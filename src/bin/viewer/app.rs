//! Main application state and event handling
//!
//! The App struct brings together:
//! - the expression being edited and its cursor
//! - the latest analysis (or the error it produced)
//! - which pane has focus and how far each pane is scrolled

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use exparse::expr::analysis::{analyze, Analysis};
use exparse::expr::config::ExparseConfig;
use exparse::expr::error::AnalysisError;

/// The three output panes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Tokens,
    Steps,
    Tree,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tokens => Focus::Steps,
            Focus::Steps => Focus::Tree,
            Focus::Tree => Focus::Tokens,
        }
    }

    fn index(self) -> usize {
        match self {
            Focus::Tokens => 0,
            Focus::Steps => 1,
            Focus::Tree => 2,
        }
    }
}

/// The main application
pub struct App {
    /// The expression as typed
    pub input: String,
    /// Cursor position in characters
    pub cursor: usize,
    pub config: ExparseConfig,
    /// `None` while the input is empty
    pub result: Option<Result<Analysis, AnalysisError>>,
    pub focus: Focus,
    scroll: [u16; 3],
    pub should_quit: bool,
}

impl App {
    pub fn new(input: String, config: ExparseConfig) -> Self {
        let mut app = App {
            cursor: input.chars().count(),
            input,
            config,
            result: None,
            focus: Focus::default(),
            scroll: [0; 3],
            should_quit: false,
        };
        app.reanalyze();
        app
    }

    pub fn scroll(&self, focus: Focus) -> u16 {
        self.scroll[focus.index()]
    }

    /// Run the lexer and parser over the current input
    fn reanalyze(&mut self) {
        self.scroll = [0; 3];
        self.result = if self.input.is_empty() {
            None
        } else {
            Some(analyze(&self.input, &self.config))
        };
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::Up => {
                let slot = &mut self.scroll[self.focus.index()];
                *slot = slot.saturating_sub(1);
            }
            KeyCode::Down => {
                let slot = &mut self.scroll[self.focus.index()];
                *slot = slot.saturating_add(1);
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let offset = self.byte_offset(self.cursor);
                self.input.remove(offset);
                self.reanalyze();
            }
            KeyCode::Delete => {
                if self.cursor >= self.input.chars().count() {
                    return false;
                }
                let offset = self.byte_offset(self.cursor);
                self.input.remove(offset);
                self.reanalyze();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let offset = self.byte_offset(self.cursor);
                self.input.insert(offset, c);
                self.cursor += 1;
                self.reanalyze();
            }
            _ => return false,
        }
        true
    }
}
