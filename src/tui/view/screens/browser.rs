use crate::fs::aggregate::active_scans;
use crate::tui::state::BrowserState;
use crate::tui::view::components::footer::render_browser_footer;
use crate::utils::format_size;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListState;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

pub fn render_browser(f: &mut Frame, list_state: &mut ListState, state: &mut BrowserState) {
    if !state.entries.is_empty() && list_state.selected().is_none() {
        list_state.select(Some(0));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, state, chunks[0]);

    let total: u64 = state.entries.iter().map(|e| e.size).sum();
    let max_size = state.entries.iter().map(|e| e.size).max().unwrap_or(1);
    let bar_width = 20usize;
    let selected_idx = list_state.selected();

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let is_focused = selected_idx == Some(idx);

            let filled = if max_size > 0 {
                ((entry.size as f64 / max_size as f64) * bar_width as f64) as usize
            } else {
                0
            };
            let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

            let name_style = if is_focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let dir_indicator = if entry.is_dir { "/" } else { "" };
            let percent = if total > 0 && entry.size > 0 {
                (entry.size as f64 / total as f64 * 100.0) as u8
            } else {
                0
            };

            let count_text = if entry.is_dir {
                format!(" {:>5}", entry.count)
            } else {
                "      ".to_string()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<30}", format!("{}{}", entry.name, dir_indicator)),
                    name_style,
                ),
                Span::styled(bar, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(
                    format!("{:>12}", format_size(entry.size, true)),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(count_text, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!(" {:>3}%", percent),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE).title(Span::styled(
            format!("Contents ({})", format_size(total, true)),
            Style::default().fg(Color::Yellow),
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], list_state);

    render_browser_footer(f, chunks[2], state.auto_refresh);
}

fn render_title(f: &mut Frame, state: &BrowserState, area: ratatui::layout::Rect) {
    let timing = match (state.last_elapsed, state.updated_at) {
        (Some(elapsed), Some(at)) => format!(
            " {}ms @ {}",
            elapsed.as_millis(),
            at.format("%H:%M:%S")
        ),
        _ => String::new(),
    };
    let scans = active_scans();
    let scan_info = if scans > 0 {
        format!(" [{} scanning]", scans)
    } else {
        String::new()
    };

    let mut spans = vec![
        Span::styled(
            " dirscope ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            state.current_path.display().to_string(),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(state.sort.label(), Style::default().fg(Color::Yellow)),
        Span::styled(scan_info, Style::default().fg(Color::Yellow)),
        Span::styled(timing, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(error) = &state.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    let title =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}
