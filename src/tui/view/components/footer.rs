use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_browser_footer(f: &mut Frame, area: Rect, auto_refresh: bool) {
    let auto_indicator = if auto_refresh {
        Span::styled(" [Auto]", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" [Manual]", Style::default().fg(Color::DarkGray))
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::raw(" Nav  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" Open  "),
        Span::styled("Esc/←", Style::default().fg(Color::Cyan)),
        Span::raw(" Up  "),
        Span::styled("Del", Style::default().fg(Color::Cyan)),
        Span::raw(" Delete  "),
        Span::styled("s", Style::default().fg(Color::Cyan)),
        Span::raw(" Sort  "),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::raw(" Refresh  "),
        Span::styled("a", Style::default().fg(Color::Cyan)),
        Span::raw(" Auto  "),
        Span::styled("o", Style::default().fg(Color::Cyan)),
        Span::raw(" Reveal  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
        auto_indicator,
    ]))
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
