//! Dashboard footer component
//!
//! Renders footer with key bindings

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer with key bindings.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect) {
    let footer_text =
        "[←/→ or 1-5] Filter | [S] Sort | [↑/↓] Scroll | [Q] Quit | Airdrop Intel Dashboard"
            .to_string();

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
