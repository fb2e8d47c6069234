//! Dashboard state management
//!
//! Contains the dashboard state struct. All view state lives here and is
//! owned by the `App`; components only borrow it.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event as WorkerEvent;
use crate::listing::ListView;
use crate::model::Snapshot;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct DashboardState {
    /// Where the feed documents are read from.
    pub location: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Period between two refresh cycles.
    pub refresh_interval: Duration,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Latest complete load cycle
    snapshot: Arc<Snapshot>,
    /// When the latest snapshot was applied
    last_refresh: Option<Instant>,
    /// Number of snapshots applied so far
    refresh_count: usize,
    /// Status filter and sort key chosen by the user
    view: ListView,
    /// Index of the first card shown in the list
    scroll: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(location: String, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            location,
            start_time,
            refresh_interval: ui_config.refresh_interval,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            snapshot: Arc::new(Snapshot::default()),
            last_refresh: None,
            refresh_count: 0,
            view: ListView::default(),
            scroll: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn view(&self) -> ListView {
        self.view
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    pub fn last_refresh(&self) -> Option<Instant> {
        self.last_refresh
    }

    pub fn set_view(&mut self, view: ListView) {
        self.view = view;
        self.scroll = 0;
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll;
    }

    /// Replace the three collections wholesale.
    pub fn set_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = snapshot;
        self.last_refresh = Some(Instant::now());
        self.refresh_count += 1;
        self.clamp_scroll();
    }

    /// Number of cards under the current filter.
    pub fn visible_count(&self) -> usize {
        self.view
            .cards(&self.snapshot.events, &self.snapshot.alerts)
            .len()
    }

    pub fn clamp_scroll(&mut self) {
        let max = self.visible_count().saturating_sub(1);
        self.scroll = self.scroll.min(max);
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
