//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::feed::Resource;
use crate::model::{Priority, Status};
use ratatui::prelude::Color;
use std::str::FromStr;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Refresher => Color::Cyan,
        Worker::Feed(Resource::Events) => Color::LightGreen,
        Worker::Feed(Resource::Wallets) => Color::LightBlue,
        Worker::Feed(Resource::Alerts) => Color::LightRed,
    }
}

/// Lifecycle status color; unknown statuses are gray.
pub fn status_color(status: &str) -> Color {
    match Status::from_str(status) {
        Ok(Status::Active) => Color::Green,
        Ok(Status::Upcoming) => Color::Yellow,
        Ok(Status::Ended) => Color::DarkGray,
        Ok(Status::Potential) => Color::Cyan,
        Err(_) => Color::Gray,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match Priority::from_str(priority) {
        Ok(Priority::High) => Color::Red,
        Ok(Priority::Medium) => Color::Yellow,
        Ok(Priority::Low) => Color::Cyan,
        Err(_) => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            // Extract MM-DD from date and HH:MM from time
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min) = time_part.get(0..5) {
                    return format!("{} {}", month_day, hour_min);
                }
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Replace verbose reqwest error patterns with cleaner messages
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return msg
            .split(": ")
            .next()
            .map(|prefix| format!("{}: request timed out", prefix))
            .unwrap_or_else(|| msg.to_string());
    }
    if msg.contains("Reqwest error") {
        return msg
            .split(": ")
            .next()
            .map(|prefix| format!("{}: network error", prefix))
            .unwrap_or_else(|| msg.to_string());
    }
    msg.to_string()
}
