//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::analytics::AnalyticsFilter;
use crate::consts::cli_consts::SPLASH_DURATION_MS;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::theme::{AppliedTheme, ThemePalette, ThemePreferenceStore, TransitionSpinner};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::RefreshReason;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub filter: AnalyticsFilter,
}

impl UIConfig {
    pub fn new(with_background_color: bool, filter: AnalyticsFilter) -> Self {
        Self {
            with_background_color,
            filter,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the placement charts.
    Dashboard(Box<DashboardState>),
}

/// What the UI loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The dashboard the charts come from.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Owns the theme preference; toggled from the keyboard.
    theme_store: ThemePreferenceStore,

    /// Theme the renderer paints with, kept current by a store subscriber.
    applied_theme: AppliedTheme,

    /// Header spinner started by theme toggles.
    spinner: TransitionSpinner,

    /// Receives events from workers and theme subscribers.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Requests chart refreshes.
    refresh_sender: mpsc::Sender<RefreshReason>,

    /// Broadcasts shutdown signal to worker threads.
    shutdown_sender: broadcast::Sender<()>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        environment: Environment,
        theme_store: ThemePreferenceStore,
        applied_theme: AppliedTheme,
        spinner: TransitionSpinner,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        refresh_sender: mpsc::Sender<RefreshReason>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            current_screen: Screen::Splash,
            theme_store,
            applied_theme,
            spinner,
            event_receiver,
            refresh_sender,
            shutdown_sender,
            ui_config,
        }
    }

    /// Leaves the splash screen for the dashboard.
    pub fn show_dashboard(&mut self) {
        if let Screen::Dashboard(_) = self.current_screen {
            return;
        }
        let state = DashboardState::new(
            self.environment.clone(),
            self.applied_theme.clone(),
            self.spinner.clone(),
            self.ui_config.clone(),
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Moves queued worker events onto the dashboard.
    fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut self.current_screen {
                state.add_event(event);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
            let _ = self.shutdown_sender.send(());
            return KeyOutcome::Quit;
        }

        // Any key press will skip the splash screen
        if let Screen::Splash = self.current_screen {
            self.show_dashboard();
            return KeyOutcome::Continue;
        }
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return KeyOutcome::Continue;
        };

        match code {
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.theme_store.toggle();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let Err(e) = self.refresh_sender.try_send(RefreshReason::Manual) {
                    let msg = match e {
                        TrySendError::Full(_) => "Refresh already queued",
                        TrySendError::Closed(_) => "Refresh worker stopped",
                    };
                    state.add_event(WorkerEvent::refresher_with_level(
                        msg.to_string(),
                        EventType::Error,
                        LogLevel::Warn,
                    ));
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        app.drain_events();

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        let palette = ThemePalette::for_theme(app.applied_theme.get());
        terminal.draw(|f| render(f, &app.current_screen, &palette))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.show_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key.code) == KeyOutcome::Quit {
                    return Ok(());
                }
            }
        }

        // Let the refresh worker run between frames.
        tokio::task::yield_now().await;
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, palette: &ThemePalette) {
    match screen {
        Screen::Splash => render_splash(f, palette),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::theme::{AppliedTheme, RefreshTrigger, ThemePreference};

    struct Harness {
        app: App,
        refresh_rx: mpsc::Receiver<RefreshReason>,
        shutdown_rx: broadcast::Receiver<()>,
        storage: MemoryStorage,
    }

    fn harness(refresh_capacity: usize) -> Harness {
        let storage = MemoryStorage::new();
        let spinner = TransitionSpinner::new();
        let store = ThemePreferenceStore::new(Box::new(storage.clone()))
            .with_effects(Box::new(spinner.clone()));
        let applied = AppliedTheme::new(store.get_current());
        let _ = store.subscribe(applied.clone());

        let (refresh_tx, refresh_rx) = mpsc::channel(refresh_capacity);
        let _ = store.subscribe(RefreshTrigger::new(refresh_tx.clone()));
        let (_event_tx, event_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let app = App::new(
            Environment::Local,
            store,
            applied,
            spinner,
            event_rx,
            refresh_tx,
            shutdown_tx,
            UIConfig::new(false, AnalyticsFilter::default()),
        );
        Harness {
            app,
            refresh_rx,
            shutdown_rx,
            storage,
        }
    }

    #[test]
    fn test_any_key_leaves_splash() {
        let mut h = harness(4);
        assert_eq!(h.app.handle_key(KeyCode::Char('x')), KeyOutcome::Continue);
        assert!(matches!(h.app.current_screen, Screen::Dashboard(_)));
    }

    #[test]
    fn test_toggle_key_flips_and_persists_theme() {
        let mut h = harness(4);
        h.app.show_dashboard();

        h.app.handle_key(KeyCode::Char('t'));
        assert_eq!(h.app.applied_theme.get(), ThemePreference::Dark);
        assert_eq!(
            h.storage
                .get(crate::consts::cli_consts::THEME_STORAGE_KEY)
                .as_deref(),
            Some("dark")
        );
        assert_eq!(
            h.refresh_rx.try_recv().unwrap(),
            RefreshReason::ThemeChanged(ThemePreference::Dark)
        );
        assert!(h.app.spinner.is_active());
    }

    #[test]
    fn test_refresh_key_queues_manual_refresh() {
        let mut h = harness(1);
        h.app.show_dashboard();

        h.app.handle_key(KeyCode::Char('r'));
        assert_eq!(h.refresh_rx.try_recv().unwrap(), RefreshReason::Manual);

        // A full queue is reported in the activity log.
        h.app.handle_key(KeyCode::Char('r'));
        h.app.handle_key(KeyCode::Char('r'));
        let Screen::Dashboard(state) = &mut h.app.current_screen else {
            panic!("expected dashboard");
        };
        state.update();
        assert_eq!(
            state.activity_logs.back().map(|e| e.msg.as_str()),
            Some("Refresh already queued")
        );
    }

    #[test]
    fn test_quit_key_broadcasts_shutdown() {
        let mut h = harness(4);
        assert_eq!(h.app.handle_key(KeyCode::Char('q')), KeyOutcome::Quit);
        assert!(h.shutdown_rx.try_recv().is_ok());
    }
}
