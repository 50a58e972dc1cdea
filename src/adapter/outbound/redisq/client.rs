//! HTTP long-poll client for zKillboard RedisQ.
//!
//! One `poll` is one GET. The request carries a hard timeout of `ttw` plus
//! slack; when it fires reqwest drops the in-flight request and its
//! connection and we report [`PollResult::Timeout`]. No retries happen here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client as HttpClient, StatusCode};
use tracing::trace;
use url::Url;

use super::response::{classify, parse_envelope};
use super::settings::FeedConfig;
use crate::error::Result;
use crate::port::outbound::feed::{KillFeed, PollResult, QueueId};

const QUEUE_PARAM: &str = "queueID";
const TTW_PARAM: &str = "ttw";

/// RedisQ implementation of [`KillFeed`].
pub struct RedisqClient {
    http: HttpClient,
    base_url: Url,
    ttw_secs: u64,
    request_timeout: Duration,
}

impl RedisqClient {
    /// Build a client from feed settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.url)?,
            ttw_secs: config.ttw_secs,
            request_timeout: Duration::from_secs(config.request_timeout_secs()),
        })
    }

    /// Queue token pinned in the configured URL, if any.
    #[must_use]
    pub fn pinned_queue_id(&self) -> Option<QueueId> {
        pinned_queue_id(&self.base_url)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Full request URL for a queue token.
    #[must_use]
    pub fn listen_url(&self, queue_id: &QueueId) -> Url {
        listen_url(&self.base_url, queue_id, self.ttw_secs)
    }
}

#[async_trait]
impl KillFeed for RedisqClient {
    async fn poll(&mut self, queue_id: &QueueId) -> Result<PollResult> {
        let url = self.listen_url(queue_id);
        trace!(url = %url, "Polling feed");

        let response = match self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return Ok(PollResult::Timeout),
            Err(err) => return Err(err.into()),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            return Ok(classify(status.as_u16(), retry_after.as_deref(), &[]));
        }

        match response.bytes().await {
            Ok(body) => Ok(parse_envelope(&body)),
            Err(err) if err.is_timeout() => Ok(PollResult::Timeout),
            Err(err) => Err(err.into()),
        }
    }

    fn feed_name(&self) -> &'static str {
        "redisq"
    }
}

/// Append `queueID` and `ttw` unless the base URL already carries them.
#[must_use]
pub fn listen_url(base: &Url, queue_id: &QueueId, ttw_secs: u64) -> Url {
    let has_queue = base.query_pairs().any(|(k, _)| k == QUEUE_PARAM);
    let has_ttw = base.query_pairs().any(|(k, _)| k == TTW_PARAM);

    let mut url = base.clone();
    if !has_queue || !has_ttw {
        let mut pairs = url.query_pairs_mut();
        if !has_queue {
            pairs.append_pair(QUEUE_PARAM, queue_id.as_str());
        }
        if !has_ttw {
            pairs.append_pair(TTW_PARAM, &ttw_secs.to_string());
        }
    }
    url
}

/// The `queueID` already present in a URL.
#[must_use]
pub fn pinned_queue_id(url: &Url) -> Option<QueueId> {
    url.query_pairs()
        .find(|(k, v)| k == QUEUE_PARAM && !v.is_empty())
        .map(|(_, v)| QueueId::new(v.into_owned()))
}
