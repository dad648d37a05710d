pub mod cli_consts {
    //! Dashboard Client Constants
    //!
    //! This module contains the configuration constants for the dashboard
    //! client, organized by functional area.

    // =============================================================================
    // PREFERENCES & CONFIGURATION FILES
    // =============================================================================

    /// Storage key holding the theme preference. Shared with the web dashboard.
    pub const THEME_STORAGE_KEY: &str = "clinic-dashboard-theme";

    /// Directory under `$HOME` holding all client files.
    pub const APP_DIR_NAME: &str = ".clinic-dash";

    /// Client configuration (API URL, session cookie).
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Durable preferences (theme).
    pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

    /// Environment variable overriding the dashboard base URL.
    pub const API_URL_ENV_VAR: &str = "CLINIC_DASH_API_URL";

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events from workers
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of pending refresh requests. Extra requests are
    /// coalesced by the refresher anyway.
    pub const REFRESH_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long the splash screen stays up unless a key is pressed (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 2_000;

    /// Frames the header spinner runs after a theme toggle
    pub const THEME_TRANSITION_FRAMES: u16 = 5;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Analytics data endpoint, relative to the dashboard base URL.
    pub const ANALYTICS_ENDPOINT: &str = "/dashboard/api/analytics/";

    /// Django session cookie name.
    pub const SESSION_COOKIE_NAME: &str = "sessionid";

    /// Number of days covered by the analytics time series.
    pub const TIME_SERIES_DAYS: usize = 30;

    /// Analytics fetch retry configuration
    pub mod analytics_fetching {
        use std::time::Duration;

        /// Request and connect timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Initial delay before retrying a failed fetch (milliseconds)
        pub const INITIAL_BACKOFF_MS: u64 = 500;

        /// Maximum number of attempts per refresh
        pub const MAX_RETRIES: u32 = 3;

        /// Default interval between automatic refreshes (seconds)
        pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }

        /// Helper function to get initial backoff duration
        pub const fn initial_backoff() -> Duration {
            Duration::from_millis(INITIAL_BACKOFF_MS)
        }

        /// Helper function to get the default refresh interval
        pub const fn default_refresh_interval() -> Duration {
            Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)
        }
    }
}
