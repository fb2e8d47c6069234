//! Dashboard state update logic
//!
//! Applies refresher events and key presses to the dashboard state. Key
//! presses only change view state; they never trigger a fetch.

use super::state::DashboardState;

use crate::events::{Event as WorkerEvent, EventType};
use crate::listing::{ListView, StatusFilter};
use crossterm::event::KeyCode;

impl DashboardState {
    /// Apply all queued events in arrival order.
    pub fn update(&mut self) {
        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: WorkerEvent) {
        if event.event_type == EventType::SnapshotReady {
            if let Some(snapshot) = event.snapshot {
                self.set_snapshot(snapshot);
            }
            return;
        }
        self.add_to_activity_log(event);
    }

    /// Apply a key press. Returns true when the key was consumed.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let view = self.view();
        match code {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('f') => {
                self.set_view(ListView::new(view.filter.next(), view.sort));
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.set_view(ListView::new(view.filter.previous(), view.sort));
            }
            KeyCode::Char(c @ '1'..='5') => {
                let filter = match c {
                    '1' => StatusFilter::All,
                    '2' => StatusFilter::Active,
                    '3' => StatusFilter::Upcoming,
                    '4' => StatusFilter::Ended,
                    _ => StatusFilter::Potential,
                };
                self.set_view(ListView::new(filter, view.sort));
            }
            KeyCode::Char('s') => {
                self.set_view(ListView::new(view.filter, view.sort.next()));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.set_scroll(self.scroll() + 1);
                self.clamp_scroll();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.set_scroll(self.scroll().saturating_sub(1));
            }
            KeyCode::Home => self.set_scroll(0),
            _ => return false,
        }
        true
    }

    /// Seconds until the next scheduled refresh, if one has happened yet.
    pub fn seconds_until_refresh(&self) -> Option<u64> {
        let last = self.last_refresh()?;
        Some(
            self.refresh_interval
                .as_secs()
                .saturating_sub(last.elapsed().as_secs()),
        )
    }
}
