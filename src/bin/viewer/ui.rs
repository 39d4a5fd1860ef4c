//! Layout and rendering for the viewer
//!
//! An input line on top, three panes (tokens, derivation steps, tree) below it,
//! and a one-line help bar. A failed analysis replaces the panes with its message.

use super::app::{App, Focus};
use exparse::expr::formats::to_treeviz_str_with_width;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame, app: &App) {
    let [input_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_input(frame, app, input_area);

    match &app.result {
        None => {
            let hint = Paragraph::new("Type an expression, e.g. sin(2+3)*4!")
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM))
                .block(Block::bordered());
            frame.render_widget(hint, body_area);
        }
        Some(Err(err)) => {
            let message = Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title("Error"));
            frame.render_widget(message, body_area);
        }
        Some(Ok(analysis)) => {
            let [tokens_area, steps_area, tree_area] = Layout::horizontal([
                Constraint::Percentage(25),
                Constraint::Percentage(35),
                Constraint::Percentage(40),
            ])
            .areas(body_area);

            let tokens: Vec<Line> = analysis
                .token_pairs()
                .into_iter()
                .map(|(kind, lexeme)| Line::from(format!("{:<10} {}", kind, lexeme)))
                .collect();
            render_pane(frame, app, Focus::Tokens, "Tokens", tokens, tokens_area);

            let steps: Vec<Line> = analysis
                .step_labels()
                .into_iter()
                .enumerate()
                .map(|(i, label)| Line::from(format!("{:>3}. {}", i + 1, label)))
                .collect();
            render_pane(frame, app, Focus::Steps, "Derivation steps", steps, steps_area);

            let tree = to_treeviz_str_with_width(&analysis.tree, app.config.output.truncate_labels);
            let tree: Vec<Line> = tree.lines().map(|l| Line::from(l.to_string())).collect();
            render_pane(frame, app, Focus::Tree, "AST", tree, tree_area);
        }
    }

    let help = Paragraph::new("Tab: switch pane  ↑/↓: scroll  Esc/Ctrl+C: quit")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(help, help_area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.as_str()).block(Block::bordered().title("Expression"));
    frame.render_widget(input, area);

    // Inside the border: one column and one row in
    let cursor = u16::try_from(app.cursor).unwrap_or(u16::MAX);
    let cursor_x = area.x.saturating_add(1).saturating_add(cursor);
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position((cursor_x.min(max_x), area.y + 1));
}

fn render_pane(
    frame: &mut Frame,
    app: &App,
    focus: Focus,
    title: &str,
    lines: Vec<Line>,
    area: Rect,
) {
    let border_style = if app.focus == focus {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let pane = Paragraph::new(lines)
        .scroll((app.scroll(focus), 0))
        .block(Block::bordered().title(title.to_string()).border_style(border_style));
    frame.render_widget(pane, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use exparse::expr::config::ExparseConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_all_panes() {
        let app = App::new("2+3".to_string(), ExparseConfig::default());
        let screen = draw(&app);
        assert!(screen.contains("Tokens"));
        assert!(screen.contains("Derivation steps"));
        assert!(screen.contains("NUMBER"));
        assert!(screen.contains("E -> T E'"));
        assert!(screen.contains("Binary: +"));
    }

    #[test]
    fn test_cursor_past_the_visible_width() {
        let app = App::new("1".repeat(70_000), ExparseConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let position = terminal.get_cursor_position().unwrap();
        assert_eq!((position.x, position.y), (98, 1));
    }

    #[test]
    fn test_renders_error() {
        let app = App::new("2@".to_string(), ExparseConfig::default());
        let screen = draw(&app);
        assert!(screen.contains("Error: Lexical error"));
    }
}
