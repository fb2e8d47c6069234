//! Dashboard airdrop list component
//!
//! Renders the filter bar and one card per visible event

use super::super::state::DashboardState;
use super::super::utils::{priority_color, status_color};
use crate::consts::cli_consts::EMPTY_LIST_PLACEHOLDER;
use crate::listing::{Card, StatusFilter};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use strum::IntoEnumIterator;

fn filter_bar(state: &DashboardState) -> Line<'static> {
    let view = state.view();
    let mut spans = Vec::new();
    for (index, filter) in StatusFilter::iter().enumerate() {
        let label = format!(" {} {} ", index + 1, filter.as_ref().to_uppercase());
        let style = if filter == view.filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("  Sort: {}", view.sort),
        Style::default().fg(Color::LightCyan),
    ));
    Line::from(spans)
}

fn card_lines(card: &Card<'_>) -> Vec<Line<'static>> {
    let event = card.event;
    let mut lines = Vec::new();

    let mut title = Vec::new();
    if let (Some(priority), Some(badge)) = (card.priority, card.badge()) {
        title.push(Span::styled(
            format!("[{}] ", badge),
            Style::default()
                .fg(priority_color(priority))
                .add_modifier(Modifier::BOLD),
        ));
    }
    title.push(Span::styled(
        event.project.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    title.push(Span::raw("  "));
    title.push(Span::styled(
        event.status.to_uppercase(),
        Style::default().fg(status_color(&event.status)),
    ));
    title.push(Span::styled(
        format!("  {}", event.source),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(title));

    for detail in card.detail_lines() {
        lines.push(Line::from(Span::styled(
            format!("  {}", detail),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines
}

/// Render the filtered, sorted airdrop list.
pub fn render_airdrop_list(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let snapshot = state.snapshot();
    let cards = state.view().cards(&snapshot.events, &snapshot.alerts);

    let list_block = Block::default()
        .title(format!("AIRDROP LIST ({})", cards.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = list_block.inner(area);
    f.render_widget(list_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Fill(1)])
        .split(inner);

    f.render_widget(Paragraph::new(filter_bar(state)), chunks[0]);

    if cards.is_empty() {
        let placeholder = Paragraph::new(EMPTY_LIST_PLACEHOLDER)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(placeholder, chunks[1]);
        return;
    }

    let lines: Vec<Line> = cards
        .iter()
        .skip(state.scroll())
        .flat_map(card_lines)
        .collect();

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[1],
    );
}
