//! Plain-text rendering of one snapshot for the `report` command.

use crate::consts::cli_consts::EMPTY_LIST_PLACEHOLDER;
use crate::listing::ListView;
use crate::model::{KnownSource, Snapshot};
use crate::stats::Statistics;
use std::fmt::Write;
use strum::IntoEnumIterator;

fn stat_row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<16}{}", label, value);
}

pub fn render_report(snapshot: &Snapshot, view: ListView) -> String {
    let stats = Statistics::compute(&snapshot.events, &snapshot.wallets, &snapshot.alerts);
    let mut out = String::new();

    let _ = writeln!(out, "AIRDROP INTEL | Last Update: {}", snapshot.refreshed_at);
    let _ = writeln!(out);
    let _ = writeln!(out, "STATISTICS");
    stat_row(&mut out, "TOTAL EVENTS", stats.total);
    stat_row(&mut out, "ACTIVE", stats.active);
    stat_row(&mut out, "UPCOMING", stats.upcoming);
    stat_row(&mut out, "ALERTS", stats.alerts);
    stat_row(&mut out, "ENDED", stats.ended);
    stat_row(&mut out, "POTENTIAL", stats.potential);
    stat_row(
        &mut out,
        "WALLETS",
        format!(
            "{} ({} with DeFi activity)",
            stats.wallets, stats.wallets_with_activity
        ),
    );
    stat_row(&mut out, "HIGH PRIORITY", stats.high_alerts);
    let _ = writeln!(out);
    let _ = writeln!(out, "BY SOURCE");
    for source in KnownSource::iter() {
        stat_row(&mut out, source.display_name(), stats.sources.get(source));
    }
    let _ = writeln!(out);

    let cards = view.cards(&snapshot.events, &snapshot.alerts);
    let _ = writeln!(
        out,
        "AIRDROP LIST ({}) | Filter: {} | Sort: {}",
        cards.len(),
        view.filter.as_ref().to_uppercase(),
        view.sort
    );
    if cards.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_LIST_PLACEHOLDER);
        return out;
    }
    for card in cards {
        let _ = writeln!(out);
        if let Some(badge) = card.badge() {
            let _ = writeln!(out, "  [{}]", badge);
        }
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            card.event.project,
            card.event.status.to_uppercase(),
            card.event.source
        );
        for line in card.detail_lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}
