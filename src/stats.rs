//! Summary statistics over one snapshot.

use crate::model::{AirdropEvent, Alert, KnownSource, Priority, Status, WalletReport};

/// Per-source event counts. Unknown sources are not broken out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub airdrops_io: usize,
    pub cmc: usize,
    pub icomarks: usize,
    pub altcoin: usize,
}

impl SourceCounts {
    pub fn get(&self, source: KnownSource) -> usize {
        match source {
            KnownSource::AirdropsIo => self.airdrops_io,
            KnownSource::CoinMarketCap => self.cmc,
            KnownSource::IcoMarks => self.icomarks,
            KnownSource::AltcoinTrading => self.altcoin,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub active: usize,
    pub upcoming: usize,
    pub ended: usize,
    pub potential: usize,
    pub sources: SourceCounts,
    pub wallets: usize,
    pub wallets_with_activity: usize,
    pub alerts: usize,
    pub high_alerts: usize,
}

impl Statistics {
    /// Derive every counter from the three collections. Never cached.
    pub fn compute(events: &[AirdropEvent], wallets: &[WalletReport], alerts: &[Alert]) -> Self {
        let mut stats = Statistics {
            total: events.len(),
            wallets: wallets.len(),
            wallets_with_activity: wallets.iter().filter(|w| w.has_defi_activity).count(),
            alerts: alerts.len(),
            high_alerts: alerts
                .iter()
                .filter(|a| a.priority() == Some(Priority::High))
                .count(),
            ..Default::default()
        };

        for event in events {
            match event.lifecycle() {
                Some(Status::Active) => stats.active += 1,
                Some(Status::Upcoming) => stats.upcoming += 1,
                Some(Status::Ended) => stats.ended += 1,
                Some(Status::Potential) => stats.potential += 1,
                None => {}
            }
            match event.known_source() {
                Some(KnownSource::AirdropsIo) => stats.sources.airdrops_io += 1,
                Some(KnownSource::CoinMarketCap) => stats.sources.cmc += 1,
                Some(KnownSource::IcoMarks) => stats.sources.icomarks += 1,
                Some(KnownSource::AltcoinTrading) => stats.sources.altcoin += 1,
                None => {}
            }
        }
        stats
    }

    pub fn status_count(&self, status: Status) -> usize {
        match status {
            Status::Active => self.active,
            Status::Upcoming => self.upcoming,
            Status::Ended => self.ended,
            Status::Potential => self.potential,
        }
    }
}
