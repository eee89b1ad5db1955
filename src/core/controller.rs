//! Search-and-pagination controller for the launch list.
//!
//! The state machine lives in [`SessionState`], a plain synchronous type.
//! [`Feed`] wraps it in a spawned task that serializes every mutation
//! through a single command queue, so there is never more than one writer.
//! Network fetches run as their own tasks and report back into the queue
//! tagged with the query generation they were issued under; a result whose
//! generation no longer matches the current session is stale (the query
//! changed while it was in flight) and is discarded.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::client::LaunchApi;
use crate::config::FeedConfig;
use crate::core::debounce::SearchDebouncer;
use crate::error::{LaunchError, LaunchResult};
use crate::models::LaunchSummary;

/// Load status of the launch list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Ready to fetch; more pages may be available.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last page came back short; the result set is exhausted.
    EndOfData,
    /// The last fetch failed. Accumulated results are kept; only a new
    /// query commit leaves this state.
    Failed(LaunchError),
}

impl LoadState {
    /// Whether `load_more` is swallowed in this state.
    pub fn blocks_load_more(&self) -> bool {
        matches!(self, LoadState::EndOfData | LoadState::Failed(_))
    }
}

/// Accumulated results for one committed query.
///
/// `page` counts completed fetches since the last reset, so the next offset
/// is always `page * page_size`. Items are kept in arrival order; the list
/// only grows, or is emptied wholesale by a reset.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    query: String,
    page: u32,
    launches: Vec<LaunchSummary>,
    state: LoadState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn launches(&self) -> &[LaunchSummary] {
        &self.launches
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Offset of the next page for the given page size.
    pub fn next_offset(&self, page_size: u32) -> u32 {
        self.page * page_size
    }

    /// Begin a fresh session for a newly committed query.
    pub fn reset(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 0;
        self.launches.clear();
        self.state = LoadState::Idle;
    }

    /// Whether a fetch may start now. A session in `Loading` already has a
    /// request in flight, and `EndOfData`/`Failed` require a reset first.
    pub fn can_start_fetch(&self) -> bool {
        self.state == LoadState::Idle
    }

    pub fn begin_fetch(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Fold a successful page into the session. A fetch at offset 0 replaces
    /// the accumulated items (new query), any other offset appends. A short
    /// page marks the end of the result set.
    pub fn apply_page(&mut self, offset: u32, items: Vec<LaunchSummary>, page_size: u32) {
        let count = items.len() as u32;

        if offset == 0 {
            self.launches = items;
            self.page = 1;
        } else {
            self.launches.extend(items);
            self.page += 1;
        }

        self.state = if count < page_size {
            LoadState::EndOfData
        } else {
            LoadState::Idle
        };
    }

    /// Record a fetch failure. Previously accumulated items are kept.
    pub fn apply_error(&mut self, err: LaunchError) {
        self.state = LoadState::Failed(err);
    }

    fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            query: self.query.clone(),
            page: self.page,
            launches: self.launches.clone(),
            state: self.state.clone(),
        }
    }
}

/// Read-only view of the feed published after every state change.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub query: String,
    pub page: u32,
    pub launches: Vec<LaunchSummary>,
    pub state: LoadState,
}

enum Command {
    LoadMore,
}

struct FetchOutcome {
    generation: u64,
    offset: u32,
    result: LaunchResult<Vec<LaunchSummary>>,
}

/// Handle to a running launch feed.
///
/// The consumer pushes raw text edits and load-more triggers in, and
/// observes the feed exclusively through the snapshot channel. Dropping the
/// handle tears the feed down; in-flight work is cancelled and nothing
/// further is published.
pub struct Feed {
    debouncer: SearchDebouncer,
    cmd_tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<FeedSnapshot>,
    task: JoinHandle<()>,
}

impl Feed {
    /// Spawn a feed driven by `client`. Must be called from within a tokio
    /// runtime.
    pub fn spawn<C>(client: C, config: FeedConfig) -> Self
    where
        C: LaunchApi + Clone,
    {
        let (debouncer, commit_rx) = SearchDebouncer::spawn(config.debounce);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(FeedSnapshot::default());
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        let task = FeedTask {
            client,
            config,
            session: SessionState::new(),
            generation: 0,
            done_tx,
            snapshot_tx,
        };

        Self {
            debouncer,
            cmd_tx,
            snapshot_rx,
            task: tokio::spawn(task.run(commit_rx, cmd_rx, done_rx)),
        }
    }

    /// Forward a search-box edit. The query commits after the configured
    /// quiet period.
    pub fn on_text_changed(&self, text: impl Into<String>) {
        self.debouncer.on_text_changed(text);
    }

    /// Request the next page for the current query. Ignored while a fetch is
    /// in flight and in the `EndOfData` and `Failed` states.
    pub fn load_more(&self) {
        let _ = self.cmd_tx.send(Command::LoadMore);
    }

    /// Subscribe to feed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_rx.clone()
    }
}

impl Drop for Feed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The single owner of all feed state. Runs until its input channels close.
struct FeedTask<C> {
    client: C,
    config: FeedConfig,
    session: SessionState,
    generation: u64,
    done_tx: mpsc::UnboundedSender<FetchOutcome>,
    snapshot_tx: watch::Sender<FeedSnapshot>,
}

impl<C: LaunchApi + Clone> FeedTask<C> {
    async fn run(
        mut self,
        mut commit_rx: mpsc::UnboundedReceiver<String>,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
        mut done_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    ) {
        loop {
            tokio::select! {
                committed = commit_rx.recv() => match committed {
                    Some(text) => self.on_query_committed(&text),
                    None => break,
                },
                cmd = cmd_rx.recv() => match cmd {
                    Some(Command::LoadMore) => self.on_load_more(),
                    None => break,
                },
                // Never yields `None`: we hold a sender for the lifetime of
                // the task.
                Some(outcome) = done_rx.recv() => self.on_fetch_done(outcome),
            }
        }
    }

    fn on_query_committed(&mut self, text: &str) {
        tracing::debug!(query = %text, "query committed");

        // Any result still in flight belongs to the previous generation and
        // will be discarded on arrival.
        self.generation += 1;
        self.session.reset(text);
        self.publish();

        if text.is_empty() {
            tracing::debug!("empty query, skipping fetch");
            return;
        }

        self.start_fetch(0);
    }

    fn on_load_more(&mut self) {
        if self.session.state().blocks_load_more() {
            tracing::debug!(state = ?self.session.state(), "load_more ignored");
            return;
        }
        if self.session.query().is_empty() {
            return;
        }
        self.start_fetch(self.session.next_offset(self.config.page_size));
    }

    fn start_fetch(&mut self, offset: u32) {
        if !self.session.can_start_fetch() {
            tracing::debug!(offset, "fetch already in flight, dropping trigger");
            return;
        }

        self.session.begin_fetch();
        self.publish();

        let client = self.client.clone();
        let done_tx = self.done_tx.clone();
        let text = self.session.query().to_string();
        let limit = self.config.page_size;
        let generation = self.generation;

        tracing::debug!(query = %text, offset, limit, "fetch started");
        tokio::spawn(async move {
            let result = client.search_launches(&text, limit, offset).await;
            let _ = done_tx.send(FetchOutcome {
                generation,
                offset,
                result,
            });
        });
    }

    fn on_fetch_done(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            tracing::debug!(
                offset = outcome.offset,
                "discarding result from superseded query"
            );
            return;
        }

        match outcome.result {
            Ok(items) => {
                tracing::debug!(
                    count = items.len(),
                    offset = outcome.offset,
                    "fetch finished"
                );
                self.session
                    .apply_page(outcome.offset, items, self.config.page_size);
                if self.session.state() == &LoadState::EndOfData {
                    tracing::debug!(total = self.session.launches().len(), "end of data");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, offset = outcome.offset, "fetch failed");
                self.session.apply_error(err);
            }
        }

        self.publish();
    }

    fn publish(&self) {
        let _ = self.snapshot_tx.send(self.session.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LaunchStatus;

    fn launch(n: u32) -> LaunchSummary {
        LaunchSummary {
            id: format!("launch-{n}"),
            name: format!("Launch {n}"),
            scheduled_time: "2024-11-30T05:00:00Z".to_string(),
            status: LaunchStatus {
                code: 1,
                label: "Go for Launch".to_string(),
                short_label: "Go".to_string(),
            },
            image: None,
        }
    }

    fn batch(start: u32, count: u32) -> Vec<LaunchSummary> {
        (start..start + count).map(launch).collect()
    }

    mod session {
        use super::*;

        #[test]
        fn test_full_page_returns_to_idle() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            session.begin_fetch();
            session.apply_page(0, batch(0, 10), 10);

            assert_eq!(session.state(), &LoadState::Idle);
            assert_eq!(session.page(), 1);
            assert_eq!(session.launches().len(), 10);
            assert_eq!(session.next_offset(10), 10);
        }

        #[test]
        fn test_short_page_ends_the_data() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            session.begin_fetch();
            session.apply_page(0, batch(0, 4), 10);

            assert_eq!(session.state(), &LoadState::EndOfData);
            assert!(session.state().blocks_load_more());
        }

        #[test]
        fn test_nonzero_offset_appends() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            session.begin_fetch();
            session.apply_page(0, batch(0, 10), 10);
            session.begin_fetch();
            session.apply_page(10, batch(10, 10), 10);

            assert_eq!(session.page(), 2);
            assert_eq!(session.launches().len(), 20);
            assert_eq!(session.next_offset(10), 20);
            assert_eq!(session.launches()[10].id, "launch-10");
        }

        #[test]
        fn test_error_keeps_accumulated_items() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            session.begin_fetch();
            session.apply_page(0, batch(0, 10), 10);
            session.begin_fetch();
            session.apply_error(LaunchError::Http(429));

            assert_eq!(session.state(), &LoadState::Failed(LaunchError::Http(429)));
            assert_eq!(session.launches().len(), 10);
            assert!(session.state().blocks_load_more());
        }

        #[test]
        fn test_reset_clears_everything() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            session.begin_fetch();
            session.apply_page(0, batch(0, 10), 10);
            session.reset("Atlas");

            assert_eq!(session.query(), "Atlas");
            assert_eq!(session.page(), 0);
            assert!(session.launches().is_empty());
            assert_eq!(session.state(), &LoadState::Idle);
        }

        #[test]
        fn test_no_fetch_while_loading() {
            let mut session = SessionState::new();
            session.reset("Falcon");
            assert!(session.can_start_fetch());
            session.begin_fetch();
            assert!(!session.can_start_fetch());
        }
    }

    mod feed {
        use super::*;
        use crate::error::LaunchResult;
        use std::collections::VecDeque;
        use std::sync::{Arc, Mutex};
        use std::time::Duration;
        use tokio::time;

        /// Scripted stand-in for the HTTP client. Responses are consumed in
        /// order; each can carry an artificial delay.
        #[derive(Clone, Default)]
        struct ScriptedApi {
            responses: Arc<Mutex<VecDeque<(Duration, LaunchResult<Vec<LaunchSummary>>)>>>,
            calls: Arc<Mutex<Vec<(String, u32, u32)>>>,
        }

        impl ScriptedApi {
            fn new(
                responses: impl IntoIterator<Item = LaunchResult<Vec<LaunchSummary>>>,
            ) -> Self {
                let api = Self::default();
                for response in responses {
                    api.push(Duration::ZERO, response);
                }
                api
            }

            fn push(&self, delay: Duration, response: LaunchResult<Vec<LaunchSummary>>) {
                self.responses.lock().unwrap().push_back((delay, response));
            }

            fn calls(&self) -> Vec<(String, u32, u32)> {
                self.calls.lock().unwrap().clone()
            }
        }

        impl LaunchApi for ScriptedApi {
            async fn search_launches(
                &self,
                text: &str,
                limit: u32,
                offset: u32,
            ) -> LaunchResult<Vec<LaunchSummary>> {
                self.calls
                    .lock()
                    .unwrap()
                    .push((text.to_string(), limit, offset));
                let (delay, result) = self
                    .responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or((Duration::ZERO, Ok(Vec::new())));
                if delay > Duration::ZERO {
                    time::sleep(delay).await;
                }
                result
            }

            async fn fetch_launch_detail(
                &self,
                _id: &str,
            ) -> LaunchResult<crate::models::LaunchDetail> {
                Err(LaunchError::Http(404))
            }
        }

        fn config() -> FeedConfig {
            FeedConfig {
                base_url: "https://example.test/".to_string(),
                page_size: 10,
                debounce: Duration::from_millis(500),
            }
        }

        /// Type text and wait until the debounced query lands in a snapshot.
        /// The paused clock auto-advances through the quiet period while we
        /// wait.
        async fn commit(
            feed: &Feed,
            snapshots: &mut watch::Receiver<FeedSnapshot>,
            text: &str,
        ) {
            feed.on_text_changed(text);
            wait_for(snapshots, |s| s.query == text).await;
        }

        async fn wait_for(
            snapshots: &mut watch::Receiver<FeedSnapshot>,
            pred: impl Fn(&FeedSnapshot) -> bool,
        ) -> FeedSnapshot {
            loop {
                {
                    let snap = snapshots.borrow_and_update();
                    if pred(&snap) {
                        return snap.clone();
                    }
                }
                snapshots.changed().await.unwrap();
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_full_page_then_short_page() {
            let api = ScriptedApi::new([Ok(batch(0, 10)), Ok(batch(10, 5))]);
            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Falcon").await;
            let snap = wait_for(&mut snapshots, |s| {
                s.state == LoadState::Idle && !s.launches.is_empty()
            })
            .await;
            assert_eq!(snap.page, 1);
            assert_eq!(snap.launches.len(), 10);
            assert_eq!(snap.query, "Falcon");

            feed.load_more();
            let snap = wait_for(&mut snapshots, |s| s.state == LoadState::EndOfData).await;
            assert_eq!(snap.page, 2);
            assert_eq!(snap.launches.len(), 15);

            assert_eq!(
                api.calls(),
                vec![
                    ("Falcon".to_string(), 10, 0),
                    ("Falcon".to_string(), 10, 10),
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_offsets_advance_by_page_size() {
            let api = ScriptedApi::new([
                Ok(batch(0, 10)),
                Ok(batch(10, 10)),
                Ok(batch(20, 4)),
            ]);
            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Starlink").await;
            wait_for(&mut snapshots, |s| s.page == 1 && s.state == LoadState::Idle).await;
            feed.load_more();
            wait_for(&mut snapshots, |s| s.page == 2 && s.state == LoadState::Idle).await;
            feed.load_more();
            let snap = wait_for(&mut snapshots, |s| s.state == LoadState::EndOfData).await;

            assert_eq!(snap.launches.len(), 24);
            let offsets: Vec<u32> = api.calls().iter().map(|c| c.2).collect();
            assert_eq!(offsets, vec![0, 10, 20]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_empty_commit_resets_without_io() {
            let api = ScriptedApi::new([Ok(batch(0, 3))]);
            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            // Populate the list first, then clear the search box.
            commit(&feed, &mut snapshots, "Falcon").await;
            wait_for(&mut snapshots, |s| !s.launches.is_empty()).await;

            commit(&feed, &mut snapshots, "").await;
            let snap = wait_for(&mut snapshots, |s| s.query.is_empty()).await;
            assert!(snap.launches.is_empty());
            assert_eq!(snap.state, LoadState::Idle);
            assert_eq!(snap.page, 0);

            // Only the first commit reached the network.
            assert_eq!(api.calls().len(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_failure_blocks_load_more_until_new_query() {
            let api = ScriptedApi::new([
                Err(LaunchError::Http(429)),
                Ok(batch(0, 3)),
            ]);
            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Falcon").await;
            let snap = wait_for(&mut snapshots, |s| {
                matches!(s.state, LoadState::Failed(_))
            })
            .await;
            assert_eq!(snap.state, LoadState::Failed(LaunchError::Http(429)));
            assert!(snap.launches.is_empty());

            // load_more is swallowed while failed.
            feed.load_more();

            // A fresh commit recovers.
            commit(&feed, &mut snapshots, "Atlas").await;
            let snap = wait_for(&mut snapshots, |s| s.state == LoadState::EndOfData).await;
            assert_eq!(snap.query, "Atlas");
            assert_eq!(snap.launches.len(), 3);

            // The swallowed load_more never reached the network.
            assert_eq!(
                api.calls(),
                vec![("Falcon".to_string(), 10, 0), ("Atlas".to_string(), 10, 0)]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_load_more_ignored_at_end_of_data() {
            let api = ScriptedApi::new([Ok(batch(0, 2))]);
            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Vega").await;
            wait_for(&mut snapshots, |s| s.state == LoadState::EndOfData).await;

            feed.load_more();
            feed.load_more();
            // Let the actor drain the triggers.
            time::advance(Duration::from_millis(10)).await;

            assert_eq!(api.calls().len(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stale_result_from_superseded_query_is_discarded() {
            let api = ScriptedApi::default();
            // The Falcon page resolves only after the Atlas query commits.
            api.push(Duration::from_secs(2), Ok(batch(0, 10)));
            api.push(Duration::ZERO, Ok(batch(100, 3)));

            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Falcon").await;
            commit(&feed, &mut snapshots, "Atlas").await;
            let snap = wait_for(&mut snapshots, |s| s.state == LoadState::EndOfData).await;
            assert_eq!(snap.query, "Atlas");
            assert_eq!(snap.launches.len(), 3);

            // Let the slow Falcon response arrive; it must not be applied.
            time::advance(Duration::from_secs(3)).await;
            let snap = snapshots.borrow().clone();
            assert_eq!(snap.query, "Atlas");
            assert_eq!(snap.launches.len(), 3);
            assert_eq!(snap.launches[0].id, "launch-100");
            assert_eq!(snap.state, LoadState::EndOfData);
        }

        #[tokio::test(start_paused = true)]
        async fn test_load_more_while_loading_is_dropped() {
            let api = ScriptedApi::default();
            api.push(Duration::from_secs(1), Ok(batch(0, 10)));

            let feed = Feed::spawn(api.clone(), config());
            let mut snapshots = feed.subscribe();

            commit(&feed, &mut snapshots, "Falcon").await;
            wait_for(&mut snapshots, |s| s.state == LoadState::Loading).await;

            // Racing trigger while the first page is still in flight.
            feed.load_more();

            time::advance(Duration::from_secs(2)).await;
            let snap = wait_for(&mut snapshots, |s| s.state == LoadState::Idle).await;
            assert_eq!(snap.launches.len(), 10);
            assert_eq!(api.calls().len(), 1);
        }
    }
}
