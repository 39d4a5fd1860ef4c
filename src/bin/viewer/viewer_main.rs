//! Terminal setup and the event loop
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use exparse::expr::config::ExparseConfig;
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use super::app::App;
use super::ui;

/// Run the viewer starting from `initial`
pub fn run_viewer(initial: String, config: ExparseConfig) -> io::Result<()> {
    let mut app = App::new(initial, config);

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Windows reports releases too; only presses edit the input
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                // The next draw() picks up the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}
