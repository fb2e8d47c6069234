//! Dashboard header component
//!
//! Renders the title and the refresh countdown gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let uptime = state.start_time.elapsed().as_secs();
    let title_text = format!(
        "AIRDROP INTEL v{} | Last Update: {} | Uptime {}h {}m",
        version,
        state.snapshot().refreshed_at,
        uptime / 3600,
        (uptime % 3600) / 60
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge fills up as the next refresh approaches
    let interval_secs = state.refresh_interval.as_secs().max(1);
    let (progress_text, progress_percent) = match state.seconds_until_refresh() {
        Some(remaining) => {
            let elapsed = interval_secs.saturating_sub(remaining);
            let percent = ((elapsed as f64 / interval_secs as f64) * 100.0) as u16;
            (
                format!(
                    "NEXT REFRESH in {}m {}s | {}",
                    remaining / 60,
                    remaining % 60,
                    state.location
                ),
                percent.min(100),
            )
        }
        None => (format!("REFRESHING | {}", state.location), 100),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
