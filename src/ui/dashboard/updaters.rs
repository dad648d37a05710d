//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::{DashboardState, RefreshState};

use crate::events::{Event as WorkerEvent, EventType, Worker};

use std::time::Instant;

impl DashboardState {
    /// Advance one frame and apply queued events.
    pub fn update(&mut self) {
        self.tick += 1;
        self.spinner.advance();

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        match event.worker {
            Worker::AnalyticsRefresher => self.handle_refresher_event(event),
            // The applied theme is updated by its own subscriber.
            Worker::ThemeStore => {}
        }
    }

    fn handle_refresher_event(&mut self, event: &WorkerEvent) {
        match event.event_type {
            EventType::Refresh => {
                if !matches!(self.refresh_state(), RefreshState::Loading { .. }) {
                    self.set_refresh_state(RefreshState::Loading {
                        started_at: Instant::now(),
                    });
                }
            }
            EventType::Success => {
                if let Some(report) = &event.report {
                    self.report = Some(report.clone());
                    self.last_updated = Some(event.timestamp.clone());
                }
                self.set_refresh_state(RefreshState::Idle);
            }
            EventType::Error => {
                // Previous charts stay up; only the status changes.
                self.set_refresh_state(RefreshState::Failed(event.msg.clone()));
            }
            EventType::ThemeChange => {}
        }
    }
}
