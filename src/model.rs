//! Feed record types
//!
//! Records are decoded leniently: every field falls back to its default when
//! the producer leaves it out, writes `null`, or writes a value of the wrong
//! JSON type. Only the offending field is lost, never the record.
//! Enum-like fields keep the raw string so that filtering and sorting
//! operate on exactly what the producer wrote; the typed views (`Status`, `Priority`, `KnownSource`) are derived on demand.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Field decoder that maps `null` and mistyped values to the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A tracked airdrop campaign from `events_sources.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AirdropEvent {
    #[serde(deserialize_with = "lenient")]
    pub token: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub project: String,
    #[serde(deserialize_with = "lenient")]
    pub campaign_name: String,
    /// Scraper identifier, e.g. `cmc_airdrops`.
    #[serde(deserialize_with = "lenient")]
    pub source: String,
    /// Lifecycle status as written by the producer.
    #[serde(deserialize_with = "lenient")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub event_type: String,
    #[serde(deserialize_with = "lenient")]
    pub reward_type: String,
    #[serde(deserialize_with = "lenient")]
    pub est_value_usd: Option<f64>,
    /// ISO 8601 date or date-time.
    #[serde(deserialize_with = "lenient")]
    pub deadline: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub requirements: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub links: EventLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EventLinks {
    #[serde(deserialize_with = "lenient")]
    pub details: Option<String>,
}

impl AirdropEvent {
    /// Typed lifecycle status, `None` for values outside the known set.
    pub fn lifecycle(&self) -> Option<Status> {
        Status::from_str(&self.status).ok()
    }

    pub fn known_source(&self) -> Option<KnownSource> {
        KnownSource::from_str(&self.source).ok()
    }
}

/// A monitored wallet from `wallets_report.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WalletReport {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub chain: String,
    #[serde(deserialize_with = "lenient")]
    pub address: String,
    #[serde(deserialize_with = "lenient")]
    pub tx_count: u64,
    #[serde(deserialize_with = "lenient")]
    pub has_defi_activity: bool,
}

/// An alert from `alerts.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Alert {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub alert_type: String,
    #[serde(deserialize_with = "lenient")]
    pub priority: String,
    /// Matched against `AirdropEvent::project` by exact equality.
    #[serde(deserialize_with = "lenient")]
    pub project: String,
    #[serde(deserialize_with = "lenient")]
    pub message: String,
    #[serde(deserialize_with = "lenient")]
    pub links: BTreeMap<String, Option<String>>,
}

impl Alert {
    pub fn priority(&self) -> Option<Priority> {
        Priority::from_str(&self.priority).ok()
    }
}

/// Airdrop lifecycle phase.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Active,
    Upcoming,
    Ended,
    Potential,
}

/// Alert priority, rendered as a badge on matching cards.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// The four scrapers with a dedicated row in the statistics panel.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, strum::EnumString, strum::AsRefStr, strum::EnumIter,
)]
pub enum KnownSource {
    #[strum(serialize = "airdrops_io")]
    AirdropsIo,
    #[strum(serialize = "cmc_airdrops")]
    CoinMarketCap,
    #[strum(serialize = "icomarks_airdrops")]
    IcoMarks,
    #[strum(serialize = "altcointrading_airdrops")]
    AltcoinTrading,
}

impl KnownSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            KnownSource::AirdropsIo => "Airdrops.io",
            KnownSource::CoinMarketCap => "CoinMarketCap",
            KnownSource::IcoMarks => "ICOMarks",
            KnownSource::AltcoinTrading => "AltcoinTrading",
        }
    }
}

/// One complete load cycle. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub events: Vec<AirdropEvent>,
    pub wallets: Vec<WalletReport>,
    pub alerts: Vec<Alert>,
    /// Local time the cycle finished, e.g. `2024-05-01 12:00:00`.
    pub refreshed_at: String,
}

impl Snapshot {
    /// All three collections empty, stamped with `refreshed_at`.
    pub fn empty(refreshed_at: String) -> Self {
        Self {
            refreshed_at,
            ..Default::default()
        }
    }
}
