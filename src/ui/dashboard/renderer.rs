//! Dashboard main renderer

use super::components::{airdrop_list, footer, header, logs, stats_panel};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    stats_panel::render_stats_panel(f, main_chunks[1], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[2]);

    airdrop_list::render_airdrop_list(f, content_chunks[0], state);
    logs::render_logs_panel(f, content_chunks[1], state);
    footer::render_footer(f, main_chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::model::{AirdropEvent, Alert, Snapshot};
    use crate::ui::app::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::{Duration, Instant};

    fn screen_text(state: &DashboardState) -> String {
        let backend = TestBackend::new(160, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn state_with(snapshot: Snapshot) -> DashboardState {
        let mut state = DashboardState::new(
            "http://localhost:3000".to_string(),
            Instant::now(),
            UIConfig::new(false, Duration::from_secs(300)),
        );
        state.add_event(Event::snapshot_ready(snapshot));
        state.update();
        state
    }

    #[test]
    fn test_empty_snapshot_renders_placeholder() {
        let state = state_with(Snapshot::empty("2024-01-01 00:00:00".to_string()));
        let text = screen_text(&state);
        assert!(text.contains("NO AIRDROPS FOUND"));
        assert!(text.contains("TOTAL EVENTS 0"));
        assert!(text.contains("AIRDROP LIST (0)"));
        assert!(text.contains("Last Update: 2024-01-01 00:00:00"));
    }

    #[test]
    fn test_matching_alert_renders_badge() {
        let snapshot = Snapshot {
            events: vec![AirdropEvent {
                project: "X".to_string(),
                status: "active".to_string(),
                source: "cmc_airdrops".to_string(),
                ..Default::default()
            }],
            alerts: vec![Alert {
                project: "X".to_string(),
                priority: "medium".to_string(),
                ..Default::default()
            }],
            refreshed_at: "2024-01-01 00:00:00".to_string(),
            ..Default::default()
        };
        let text = screen_text(&state_with(snapshot));
        assert!(text.contains("[MEDIUM PRIORITY] X"));
        assert!(text.contains("TOTAL EVENTS 1"));
        assert!(text.contains("CoinMarketCap 1"));
        assert!(!text.contains("NO AIRDROPS FOUND"));
    }
}
