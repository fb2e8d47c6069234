//! Core worker utilities

use crate::events::{Event, EventType};
use crate::feed::Resource;
use crate::logging::LogLevel;
use crate::model::Snapshot;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send_refresh_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::refresher_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_feed_event(
        &self,
        resource: Resource,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::feed_with_level(
                resource, message, event_type, log_level,
            ))
            .await;
    }

    pub async fn send_snapshot(&self, snapshot: Snapshot) {
        let _ = self.sender.send(Event::snapshot_ready(snapshot)).await;
    }
}
