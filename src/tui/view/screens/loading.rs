use crate::tui::state::BrowserState;
use crate::tui::view::components::centered_rect;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_loading(f: &mut Frame, state: &BrowserState) {
    let area = centered_rect(50, 25, f.area());

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Scanning {}", state.current_path.display()),
            Style::default().fg(Color::Cyan),
        )),
    ];

    if let Some(info) = &state.loading {
        if info.total > 0 {
            text.push(Line::from(Span::styled(
                format!("{}/{} entries", info.done, info.total),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(current) = &info.current {
            let name = current
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            text.push(Line::from(Span::styled(
                name,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let loading = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(loading, area);
}
