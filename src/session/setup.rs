//! Session setup and initialization

use crate::analytics::{AnalyticsClient, AnalyticsFilter};
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::start_refresh_worker;
use crate::storage::{JsonFileStorage, MemoryStorage, PreferenceStorage, get_preferences_path};
use crate::theme::{
    ActivityNotifier, AppliedTheme, RefreshTrigger, ThemePreferenceStore, TransitionSpinner,
};
use crate::workers::RefreshReason;
use crate::workers::core::WorkerConfig;
use std::error::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Theme store, wired to the subscribers below
    pub theme_store: ThemePreferenceStore,
    /// Theme the dashboard paints with
    pub applied_theme: AppliedTheme,
    /// Header spinner driven by theme toggles
    pub spinner: TransitionSpinner,
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Refresh requests for the analytics worker
    pub refresh_sender: mpsc::Sender<RefreshReason>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Dashboard the session talks to
    pub environment: Environment,
    /// Filter applied to every refresh
    pub filter: AnalyticsFilter,
}

/// Preference storage under the user's home directory, or memory-only
/// storage when no home directory can be resolved.
pub fn open_preference_storage() -> Box<dyn PreferenceStorage> {
    match get_preferences_path() {
        Ok(path) => Box::new(JsonFileStorage::new(path)),
        Err(e) => {
            log::warn!("Theme preference will not persist: {}", e);
            Box::new(MemoryStorage::new())
        }
    }
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Builds the analytics client
/// 2. Sets up event and shutdown channels
/// 3. Starts the refresh worker
/// 4. Builds the theme store and registers its subscribers
/// 5. Queues the startup refresh
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - Session setup failed
pub fn setup_session(
    config: &Config,
    env: Environment,
    filter: AnalyticsFilter,
    storage: Box<dyn PreferenceStorage>,
) -> Result<SessionData, Box<dyn Error>> {
    filter.validate()?;

    let client = AnalyticsClient::new(env.clone(), config.session_id.clone())?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let mut worker_config = WorkerConfig::new(filter.clone());
    worker_config.refresh_interval = config.refresh_interval();
    let (refresh_sender, worker_handle) = start_refresh_worker(
        Box::new(client),
        worker_config,
        event_sender.clone(),
        shutdown_sender.subscribe(),
    );

    let spinner = TransitionSpinner::new();
    let theme_store = ThemePreferenceStore::new(storage).with_effects(Box::new(spinner.clone()));
    let applied_theme = AppliedTheme::new(theme_store.get_current());

    // Registered for the lifetime of the session.
    let _ = theme_store.subscribe(applied_theme.clone());
    let _ = theme_store.subscribe(RefreshTrigger::new(refresh_sender.clone()));
    let _ = theme_store.subscribe(ActivityNotifier::new(event_sender));

    if let Err(e) = refresh_sender.try_send(RefreshReason::Startup) {
        log::warn!("Startup refresh not queued: {}", e);
    }

    Ok(SessionData {
        theme_store,
        applied_theme,
        spinner,
        event_receiver,
        refresh_sender,
        join_handles: vec![worker_handle],
        shutdown_sender,
        environment: env,
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemePreference;

    #[tokio::test]
    async fn test_session_wires_theme_subscribers() {
        let storage = MemoryStorage::new();
        storage.insert(
            crate::consts::cli_consts::THEME_STORAGE_KEY,
            ThemePreference::Dark.as_str(),
        );

        let session = setup_session(
            &Config::default(),
            Environment::Local,
            AnalyticsFilter::default(),
            Box::new(storage),
        )
        .unwrap();

        assert_eq!(session.applied_theme.get(), ThemePreference::Dark);
        assert_eq!(session.theme_store.subscriber_count(), 3);

        session.theme_store.toggle();
        assert_eq!(session.applied_theme.get(), ThemePreference::Light);
        assert!(session.spinner.is_active());

        let _ = session.shutdown_sender.send(());
        for handle in session.join_handles {
            handle.await.unwrap();
        }
    }

    #[test]
    fn test_rejects_inverted_filter() {
        let filter = AnalyticsFilter {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let result = setup_session(
            &Config::default(),
            Environment::Local,
            filter,
            Box::new(MemoryStorage::new()),
        );
        assert!(result.is_err());
    }
}
