//! Dashboard statistics component
//!
//! Renders the summary counters over the current snapshot

use super::super::state::DashboardState;
use crate::model::KnownSource;
use crate::stats::Statistics;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use strum::IntoEnumIterator;

fn source_color(source: KnownSource) -> Color {
    match source {
        KnownSource::AirdropsIo => Color::Green,
        KnownSource::CoinMarketCap => Color::Cyan,
        KnownSource::IcoMarks => Color::Yellow,
        KnownSource::AltcoinTrading => Color::Magenta,
    }
}

/// A `LABEL value` pair followed by a separator.
fn stat_spans(label: &str, value: String, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{} ", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ]
}

/// Render the statistics panel. Counters are recomputed on every frame.
pub fn render_stats_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let snapshot = state.snapshot();
    let stats = Statistics::compute(&snapshot.events, &snapshot.wallets, &snapshot.alerts);

    let headline = [
        ("TOTAL EVENTS", stats.total, Color::Cyan),
        ("ACTIVE", stats.active, Color::Green),
        ("UPCOMING", stats.upcoming, Color::Yellow),
        ("ALERTS", stats.alerts, Color::Red),
    ];
    let secondary = [
        ("ENDED", stats.ended.to_string(), Color::DarkGray),
        ("POTENTIAL", stats.potential.to_string(), Color::Cyan),
        (
            "WALLETS",
            format!("{} ({} DeFi)", stats.wallets, stats.wallets_with_activity),
            Color::LightCyan,
        ),
        ("HIGH PRIORITY", stats.high_alerts.to_string(), Color::Red),
    ];

    let mut lines = Vec::new();
    lines.push(Line::from(
        headline
            .iter()
            .flat_map(|(label, value, color)| stat_spans(label, value.to_string(), *color))
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(
        secondary
            .into_iter()
            .flat_map(|(label, value, color)| stat_spans(label, value, color))
            .collect::<Vec<_>>(),
    ));

    let mut by_source = vec![Span::styled(
        "BY SOURCE  ",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    for source in KnownSource::iter() {
        by_source.extend(stat_spans(
            source.display_name(),
            stats.sources.get(source).to_string(),
            source_color(source),
        ));
    }
    lines.push(Line::from(by_source));

    let stats_block = Block::default()
        .title("STATISTICS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(stats_block), area);
}
