//! Loading screen shown until the first refresh cycle completes.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_loading(f: &mut Frame, location: &str, tick: usize) {
    let lines: Vec<Line> = vec![
        Span::styled(
            format!("AIRDROP INTEL v{}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .into(),
        Line::from(Span::raw(" ")),
        Span::styled(
            format!("{} LOADING...", SPINNER[tick % SPINNER.len()]),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .into(),
        Span::styled(
            "Fetching airdrop data...",
            Style::default().fg(Color::Gray),
        )
        .into(),
        Span::styled(
            location.to_string(),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        )
        .into(),
    ];

    let block_height = (lines.len() + 2) as u16;

    // Vertically center using layout
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min((f.area().height.saturating_sub(block_height)) / 2),
            Constraint::Length(block_height),
            Constraint::Min((f.area().height.saturating_sub(block_height + 1)) / 2),
        ])
        .split(f.area());

    let centered_area: Rect = vertical_chunks[1];

    let loading = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));

    f.render_widget(loading, centered_area);
}
