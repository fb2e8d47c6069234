//! Session setup and initialization

use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::core::EventSender;
use crate::workers::refresher::Refresher;
use std::error::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for refresher events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Where the documents are read from
    pub location: String,
    pub settings: Settings,
}

/// Sets up a refresh session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Builds the feed source for the configured location
/// 2. Sets up the event and shutdown channels
/// 3. Starts the refresher, which loads immediately and then once per interval
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The feed source could not be built
pub fn setup_session(settings: Settings) -> Result<SessionData, Box<dyn Error>> {
    let source = settings.feed_source()?;
    let location = source.location();

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let refresher = Refresher::new(
        source,
        EventSender::new(event_sender),
        settings.refresh_interval,
    );
    let join_handles = vec![refresher.run(shutdown_sender.subscribe())];

    Ok(SessionData {
        event_receiver,
        join_handles,
        shutdown_sender,
        location,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedLocation;
    use crate::events::EventType;
    use std::time::Duration;

    #[tokio::test]
    async fn test_session_delivers_first_snapshot_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            location: FeedLocation::Directory(dir.path().to_path_buf()),
            refresh_interval: Duration::from_secs(300),
            with_background_color: false,
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(1),
        };
        let mut session = setup_session(settings).unwrap();

        let snapshot = loop {
            let event = session.event_receiver.recv().await.unwrap();
            if event.event_type == EventType::SnapshotReady {
                break event.snapshot.unwrap();
            }
        };
        assert!(snapshot.events.is_empty());
        assert!(snapshot.wallets.is_empty());
        assert!(snapshot.alerts.is_empty());

        session.shutdown_sender.send(()).unwrap();
        for handle in session.join_handles {
            handle.await.unwrap();
        }
    }
}
