//! Filtering, sorting and badge lookup for the airdrop list.

use crate::model::{AirdropEvent, Alert, Status};
use chrono::{DateTime, NaiveDate};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// Status filter applied to the list. Defaults to showing everything.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Upcoming,
    Ended,
    Potential,
}

impl StatusFilter {
    pub fn matches(&self, event: &AirdropEvent) -> bool {
        match self.status() {
            None => true,
            Some(status) => event.status == status.as_ref(),
        }
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(Status::Active),
            StatusFilter::Upcoming => Some(Status::Upcoming),
            StatusFilter::Ended => Some(Status::Ended),
            StatusFilter::Potential => Some(Status::Potential),
        }
    }

    /// Next filter in button order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Upcoming,
            StatusFilter::Upcoming => StatusFilter::Ended,
            StatusFilter::Ended => StatusFilter::Potential,
            StatusFilter::Potential => StatusFilter::All,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Potential,
            StatusFilter::Active => StatusFilter::All,
            StatusFilter::Upcoming => StatusFilter::Active,
            StatusFilter::Ended => StatusFilter::Upcoming,
            StatusFilter::Potential => StatusFilter::Ended,
        }
    }
}

/// Field the list is ordered by.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Status,
    Source,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Status,
            SortKey::Status => SortKey::Source,
            SortKey::Source => SortKey::Name,
        }
    }

    fn field<'a>(&self, event: &'a AirdropEvent) -> &'a str {
        match self {
            SortKey::Name => &event.project,
            SortKey::Status => &event.status,
            SortKey::Source => &event.source,
        }
    }
}

/// Root-locale collation, the ordering of an untailored `localeCompare`.
pub struct LocaleOrder {
    collator: Option<Collator>,
}

impl LocaleOrder {
    pub fn new() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| log::warn!("collation data unavailable, sorting by code point: {}", e))
            .ok();
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for LocaleOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority of the first alert whose project equals `project` exactly.
pub fn priority_badge<'a>(project: &str, alerts: &'a [Alert]) -> Option<&'a str> {
    alerts
        .iter()
        .find(|alert| alert.project == project)
        .map(|alert| alert.priority.as_str())
        .filter(|priority| !priority.is_empty())
}

/// An event ready for display together with its badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card<'a> {
    pub event: &'a AirdropEvent,
    pub priority: Option<&'a str>,
}

impl Card<'_> {
    /// Badge text, e.g. `HIGH PRIORITY`.
    pub fn badge(&self) -> Option<String> {
        self.priority
            .map(|priority| format!("{} PRIORITY", priority.to_uppercase()))
    }

    /// Optional card rows, in display order. Absent fields produce no row.
    pub fn detail_lines(&self) -> Vec<String> {
        let event = self.event;
        let mut lines = Vec::new();
        if !event.reward_type.is_empty() {
            lines.push(format!("Reward: {}", event.reward_type));
        }
        if !event.requirements.is_empty() {
            lines.push(format!(
                "Requirements: {} task(s)",
                event.requirements.len()
            ));
        }
        if let Some(deadline) = event.deadline.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("Deadline: {}", format_deadline(deadline)));
        }
        if let Some(details) = event.links.details.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("Details: {}", details));
        }
        lines
    }
}

/// Date part of an ISO deadline; unparseable values are shown as written.
pub fn format_deadline(raw: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Transient list view state: the only things a user can change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListView {
    pub filter: StatusFilter,
    pub sort: SortKey,
}

impl ListView {
    pub fn new(filter: StatusFilter, sort: SortKey) -> Self {
        Self { filter, sort }
    }

    /// Filter, then stable-sort, then attach badges.
    pub fn cards<'a>(&self, events: &'a [AirdropEvent], alerts: &'a [Alert]) -> Vec<Card<'a>> {
        let mut visible: Vec<&AirdropEvent> =
            events.iter().filter(|e| self.filter.matches(e)).collect();
        let order = LocaleOrder::new();
        visible.sort_by(|a, b| order.compare(self.sort.field(a), self.sort.field(b)));

        visible
            .into_iter()
            .map(|event| Card {
                event,
                priority: priority_badge(&event.project, alerts),
            })
            .collect()
    }
}
