//! Stateless HTTP query layer for the launch provider.
//!
//! [`LaunchClient`] issues one-shot requests (no retries, no caching) and
//! classifies failures into the [`LaunchError`] taxonomy. The controller
//! talks to it through the [`LaunchApi`] trait so tests can substitute a
//! scripted double.

use std::future::Future;

use reqwest::Url;

use crate::config::{FeedConfig, PROVIDER_MAX_LIMIT};
use crate::error::{LaunchError, LaunchResult};
use crate::models::{LaunchDetail, LaunchPage, LaunchSummary};

/// Query operations the pagination controller depends on.
pub trait LaunchApi: Send + Sync + 'static {
    /// Search launches by free text, returning one page of results.
    fn search_launches(
        &self,
        text: &str,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = LaunchResult<Vec<LaunchSummary>>> + Send;

    /// Fetch the full detail payload for one launch.
    fn fetch_launch_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = LaunchResult<LaunchDetail>> + Send;
}

/// HTTP client for the launch provider REST API.
#[derive(Debug, Clone)]
pub struct LaunchClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LaunchClient {
    /// Create a client for the provider named in `config`.
    ///
    /// Fails with [`LaunchError::InvalidRequest`] if the base URL does not
    /// parse; no I/O happens here.
    pub fn new(config: &FeedConfig) -> LaunchResult<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| LaunchError::InvalidRequest(format!("base url {base:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LaunchError::InvalidRequest(format!(
                "base url {base:?}: cannot be a base"
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn search_url(&self, text: &str, limit: u32, offset: u32) -> LaunchResult<Url> {
        // The provider rejects limits above 100.
        let limit = limit.min(PROVIDER_MAX_LIMIT);
        let mut url = self
            .base_url
            .join("launches/")
            .map_err(|e| LaunchError::InvalidRequest(e.to_string()))?;
        url.set_query(Some(&format!(
            "search={}&limit={limit}&offset={offset}",
            urlencoding::encode(text)
        )));
        Ok(url)
    }

    fn detail_url(&self, id: &str) -> LaunchResult<Url> {
        self.base_url
            .join(&format!("launches/{}/", urlencoding::encode(id)))
            .map_err(|e| LaunchError::InvalidRequest(e.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> LaunchResult<T> {
        tracing::debug!(%url, "issuing request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LaunchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LaunchError::Http(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LaunchError::Decode(e.to_string())
            } else {
                LaunchError::Transport(e.to_string())
            }
        })
    }
}

impl LaunchApi for LaunchClient {
    async fn search_launches(
        &self,
        text: &str,
        limit: u32,
        offset: u32,
    ) -> LaunchResult<Vec<LaunchSummary>> {
        let url = self.search_url(text, limit, offset)?;
        let page: LaunchPage = self.get_json(url).await?;
        Ok(page.results)
    }

    async fn fetch_launch_detail(&self, id: &str) -> LaunchResult<LaunchDetail> {
        let url = self.detail_url(id)?;
        self.get_json(url).await
    }
}
