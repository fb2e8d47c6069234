pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Constants for the refresh loop, the feed endpoints and the UI,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Event buffer size between the refresher and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Refresh loop configuration
    pub mod refresh {
        /// Period between two load cycles (seconds).
        pub const INTERVAL_SECS: u64 = 5 * 60;

        /// Lower bound accepted for a user supplied interval (seconds)
        pub const MIN_INTERVAL_SECS: u64 = 5;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP feed client configuration
    pub mod http {
        /// Connection timeout for a single feed request (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout for a single feed request (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 30;

        /// Longest error body kept in an HTTP error message (characters)
        pub const MAX_ERROR_BODY_CHARS: usize = 120;

        /// User-Agent string with the dashboard version
        pub const USER_AGENT: &str = concat!("airdrop-intel/", env!("CARGO_PKG_VERSION"));
    }

    /// Relative locations of the three feed documents.
    pub mod paths {
        pub const EVENTS: &str = "/data/events_sources.json";
        pub const WALLETS: &str = "/data/wallets_report.json";
        pub const ALERTS: &str = "/data/alerts.json";
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// Keyboard poll timeout for the UI loop (milliseconds)
    pub const UI_POLL_MS: u64 = 100;

    /// Placeholder shown when the filtered list is empty.
    pub const EMPTY_LIST_PLACEHOLDER: &str = "NO AIRDROPS FOUND";
}
