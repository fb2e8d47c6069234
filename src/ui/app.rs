//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::events::{Event as WorkerEvent, EventType};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::loading::render_loading;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

use crate::consts::cli_consts::UI_POLL_MS;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub refresh_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval: Duration) -> Self {
        Self {
            with_background_color,
            refresh_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Shown until the first snapshot arrives. Log events are held back.
    Loading(VecDeque<WorkerEvent>),
    /// Dashboard screen displaying statistics and the airdrop list.
    Dashboard(Box<DashboardState>),
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// Where documents are read from, shown in the header.
    location: String,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from the refresher.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Broadcasts shutdown signal to the refresher.
    shutdown_sender: broadcast::Sender<()>,

    ui_config: UIConfig,

    /// Frames drawn so far, drives the loading spinner.
    tick: usize,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        location: String,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            location,
            current_screen: Screen::Loading(VecDeque::new()),
            event_receiver,
            shutdown_sender,
            ui_config,
            tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.current_screen, Screen::Loading(_))
    }

    /// Route one refresher event to the current screen.
    ///
    /// The first snapshot switches to the dashboard; there is no way back.
    pub fn receive(&mut self, event: WorkerEvent) {
        match &mut self.current_screen {
            Screen::Dashboard(state) => state.add_event(event),
            Screen::Loading(held) => {
                if event.event_type != EventType::SnapshotReady {
                    held.push_back(event);
                    return;
                }
                let mut state = DashboardState::new(
                    self.location.clone(),
                    self.start_time,
                    self.ui_config.clone(),
                );
                for held_event in held.drain(..) {
                    state.add_event(held_event);
                }
                state.add_event(event);
                self.current_screen = Screen::Dashboard(Box::new(state));
            }
        }
    }

    fn shutdown(&self) {
        let _ = self.shutdown_sender.send(());
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.receive(event);
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        app.tick += 1;
        terminal.draw(|f| render(f, &app))?;

        // Poll for key events
        if event::poll(Duration::from_millis(UI_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    app.shutdown();
                    return Ok(());
                }

                if let Screen::Dashboard(state) = &mut app.current_screen {
                    state.handle_key(key.code);
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match &app.current_screen {
        Screen::Loading(_) => render_loading(f, &app.location, app.tick),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::logging::LogLevel;
    use crate::model::Snapshot;

    fn app() -> App {
        let (_event_sender, event_receiver) = mpsc::channel(8);
        let (shutdown_sender, _) = broadcast::channel(1);
        App::new(
            "http://localhost:3000".to_string(),
            event_receiver,
            shutdown_sender,
            UIConfig::new(false, Duration::from_secs(300)),
        )
    }

    fn refreshing() -> WorkerEvent {
        Event::refresher_with_level(
            "Refreshing from http://localhost:3000".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        )
    }

    #[test]
    fn test_log_events_keep_loading_screen() {
        let mut app = app();
        app.receive(refreshing());
        assert!(app.is_loading());
    }

    #[test]
    fn test_first_snapshot_leaves_loading_once() {
        let mut app = app();
        app.receive(refreshing());
        app.receive(Event::snapshot_ready(Snapshot::empty(
            "2024-01-01 00:00:00".to_string(),
        )));
        assert!(!app.is_loading());

        let Screen::Dashboard(state) = &mut app.current_screen else {
            panic!("expected dashboard");
        };
        state.update();
        // Held log event is replayed into the activity log
        assert_eq!(state.activity_logs.len(), 1);
        assert_eq!(state.refresh_count(), 1);

        app.receive(Event::snapshot_ready(Snapshot::empty(
            "2024-01-01 00:05:00".to_string(),
        )));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_loading_screen_renders() {
        use ratatui::backend::TestBackend;

        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("LOADING..."));
        assert!(text.contains("Fetching airdrop data..."));
    }
}
