//! Event System
//!
//! Types and implementations for refresher events and logging

use crate::feed::Resource;
use crate::logging::{LogLevel, should_log_with_env};
use crate::model::Snapshot;
use chrono::Local;
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// The periodic refresh loop.
    Refresher,
    /// A single document fetch inside a cycle.
    Feed(Resource),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// Carries a completed snapshot; not shown in the activity log.
    SnapshotReady,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Completed load cycle for `SnapshotReady` events
    pub snapshot: Option<Arc<Snapshot>>,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.worker == other.worker
            && self.msg == other.msg
            && self.timestamp == other.timestamp
            && self.event_type == other.event_type
            && self.log_level == other.log_level
            && self.snapshot == other.snapshot
    }
}

impl Eq for Event {}

pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: now_timestamp(),
            event_type,
            log_level,
            snapshot: None,
        }
    }

    pub fn snapshot_ready(snapshot: Snapshot) -> Self {
        Self {
            worker: Worker::Refresher,
            msg: format!(
                "Loaded {} events, {} wallets, {} alerts",
                snapshot.events.len(),
                snapshot.wallets.len(),
                snapshot.alerts.len()
            ),
            timestamp: snapshot.refreshed_at.clone(),
            event_type: EventType::SnapshotReady,
            log_level: LogLevel::Info,
            snapshot: Some(Arc::new(snapshot)),
        }
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn feed_with_level(
        resource: Resource,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::Feed(resource), msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Snapshot events are applied to state, not logged
        if self.event_type == EventType::SnapshotReady {
            return false;
        }
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
