//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::analytics::{AnalyticsFilter, AnalyticsReport};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::theme::{AppliedTheme, ThemePalette, TransitionSpinner};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

/// Where the latest chart refresh stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Loading { started_at: Instant },
    Failed(String),
}

#[derive(Debug)]
pub struct DashboardState {
    /// The dashboard the charts come from.
    pub environment: Environment,
    /// Filter applied to every refresh.
    pub filter: AnalyticsFilter,
    /// Theme the charts are painted with.
    pub applied_theme: AppliedTheme,
    /// Spinner shown in the header right after a theme toggle.
    pub spinner: TransitionSpinner,
    /// Latest report, if any refresh has succeeded yet.
    pub report: Option<Arc<AnalyticsReport>>,
    /// Timestamp of the latest successful refresh.
    pub last_updated: Option<String>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to paint the theme background
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    refresh_state: RefreshState,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        applied_theme: AppliedTheme,
        spinner: TransitionSpinner,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            filter: ui_config.filter,
            applied_theme,
            spinner,
            report: None,
            last_updated: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            refresh_state: RefreshState::Idle,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_theme(self.applied_theme.get())
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh_state
    }

    pub fn set_refresh_state(&mut self, state: RefreshState) {
        self.refresh_state = state;
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
