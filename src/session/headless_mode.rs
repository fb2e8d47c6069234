//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::EventType;
use crate::logging::init_console_logger;
use crate::model::{Snapshot, Status};
use crate::stats::Statistics;
use std::error::Error;
use strum::IntoEnumIterator;

/// One-line summary printed after every refresh.
pub fn summary_line(snapshot: &Snapshot) -> String {
    let stats = Statistics::compute(&snapshot.events, &snapshot.wallets, &snapshot.alerts);
    let by_status = Status::iter()
        .map(|status| format!("{} {}", stats.status_count(status), status))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[{}] {} events ({}) | {} wallets | {} alerts ({} high)",
        snapshot.refreshed_at,
        stats.total,
        by_status,
        stats.wallets,
        stats.alerts,
        stats.high_alerts
    )
}

/// Runs the refresher in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    print_session_starting("headless", &session.location);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.event_type == EventType::SnapshotReady {
                    if let Some(snapshot) = &event.snapshot {
                        println!("{}", summary_line(snapshot));
                    }
                } else if event.should_display() {
                    println!("{}", event);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AirdropEvent, Alert};

    #[test]
    fn test_summary_line_counts() {
        let snapshot = Snapshot {
            events: vec![AirdropEvent {
                status: "active".to_string(),
                ..Default::default()
            }],
            alerts: vec![Alert {
                priority: "high".to_string(),
                ..Default::default()
            }],
            refreshed_at: "2024-01-01 00:00:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            summary_line(&snapshot),
            "[2024-01-01 00:00:00] 1 events (1 active, 0 upcoming, 0 ended, 0 potential) | 0 wallets | 1 alerts (1 high)"
        );
    }
}
