use crate::tui::state::ConfirmRequest;
use crate::tui::view::components::centered_rect;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_confirm_modal(f: &mut Frame, request: &ConfirmRequest) {
    let area = centered_rect(60, 30, f.area());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            request.message.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Confirm     "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(" Confirm ").borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
