use crate::tui::state::BrowserState;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_preview(f: &mut Frame, state: &BrowserState) {
    let title = state
        .preview_path
        .as_ref()
        .map(|p| format!(" {} ", p.display()))
        .unwrap_or_else(|| " Preview ".to_string());

    let contents = state.preview.clone().unwrap_or_default();
    let paragraph = Paragraph::new(contents)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().fg(Color::Cyan))),
        );

    f.render_widget(paragraph, f.area());
}
