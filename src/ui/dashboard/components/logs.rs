//! Dashboard logs panel component
//!
//! Renders refresher activity, newest first

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::events::EventType;
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn status_icon(event_type: EventType, level: LogLevel) -> &'static str {
    match (event_type, level) {
        (EventType::Success, _) => "✅",
        (EventType::Error, LogLevel::Warn) => "⚠️",
        (EventType::Error, _) => "❌",
        (EventType::Refresh, _) => "🔄",
        (EventType::SnapshotReady, _) => "",
    }
}

/// Render the activity log panel.
pub fn render_logs_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Borders plus padding take three rows
    let log_count = (area.height.saturating_sub(3) as usize).max(1);

    let log_lines: Vec<Line> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let worker_color = get_worker_color(&event.worker);
            let compact_time = format_compact_timestamp(&event.timestamp);
            let cleaned_msg = clean_http_error_message(&event.msg);

            Line::from(vec![
                Span::raw(format!(
                    "{} ",
                    status_icon(event.event_type, event.log_level)
                )),
                Span::styled(
                    format!("{} ", compact_time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(cleaned_msg, Style::default().fg(worker_color)),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Waiting for first refresh...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("ACTIVITY LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        log_paragraph.block(logs_block).wrap(Wrap { trim: true }),
        area,
    );
}
