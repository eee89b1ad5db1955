//! launchfeed - incremental search and pagination engine for spaceflight
//! launch data.
//!
//! launchfeed drives a search-as-you-type launch list against a public REST
//! provider: keystrokes are debounced into committed queries, results arrive
//! in cursor-paged batches, and a small state machine decides when another
//! page may be requested.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`client`] - Stateless HTTP query layer and the [`LaunchApi`] seam
//! - [`config`] - Feed configuration (provider URL, page size, debounce)
//! - [`core`] - Debouncer and the pagination controller
//! - [`models`] - serde data model for the provider's JSON schema
//!
//! The consumer pushes raw text edits and load-more triggers into a
//! [`Feed`] and observes it through a snapshot channel; all feed state is
//! owned by a single task, so there are no locks and no concurrent writers.
//!
//! # Example
//!
//! ```ignore
//! use launchfeed::{Feed, FeedConfig, LaunchClient, LoadState};
//!
//! let config = FeedConfig::default();
//! let client = LaunchClient::new(&config)?;
//! let feed = Feed::spawn(client, config);
//! let mut snapshots = feed.subscribe();
//!
//! // Wire the search box to the feed; commits fire after the quiet period.
//! feed.on_text_changed("falcon");
//!
//! while snapshots.changed().await.is_ok() {
//!     let snap = snapshots.borrow().clone();
//!     render(&snap.launches, &snap.state);
//!     if near_end_of_list() && snap.state == LoadState::Idle {
//!         feed.load_more();
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod models;

mod error;

// Re-export commonly used types for convenience
pub use client::{LaunchApi, LaunchClient};
pub use config::{FeedConfig, PROVIDER_MAX_LIMIT};
pub use crate::core::controller::{Feed, FeedSnapshot, LoadState, SessionState};
pub use crate::core::debounce::SearchDebouncer;
pub use error::{LaunchError, LaunchResult};
pub use models::{LaunchDetail, LaunchStatus, LaunchSummary};
