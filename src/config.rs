//! Feed configuration.

use std::time::Duration;

/// The largest page size the launch provider accepts.
pub const PROVIDER_MAX_LIMIT: u32 = 100;

/// Configuration for a launch feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the launch provider, with trailing slash.
    pub base_url: String,

    /// Number of results requested per page. Clamped to
    /// [`PROVIDER_MAX_LIMIT`] when building requests.
    pub page_size: u32,

    /// Quiet period after the last keystroke before a search is committed.
    pub debounce: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ll.thespacedevs.com/2.3.0/".to_string(),
            page_size: 10,
            debounce: Duration::from_millis(500),
        }
    }
}
