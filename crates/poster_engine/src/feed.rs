use std::time::Duration;

use futures_util::StreamExt;
use poster_core::{Feed, FeedItem};
use poster_logging::poster_debug;
use scraper::Html;

use crate::{FeedError, FeedFailureKind};

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            user_agent: concat!("feed-poster/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetch and parse one feed. A single attempt; no retry.
    async fn fetch_feed(&self, url: &str) -> Result<Feed, FeedError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedReader {
    settings: FeedSettings,
}

impl ReqwestFeedReader {
    pub fn new(settings: FeedSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FeedError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.clone())
            .build()
            .map_err(|err| FeedError::new(FeedFailureKind::Network, err.to_string()))
    }

    async fn download(&self, url: reqwest::Url) -> Result<Vec<u8>, FeedError> {
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::new(
                FeedFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: u64) -> FeedError {
        FeedError::new(
            FeedFailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl FeedReader for ReqwestFeedReader {
    async fn fetch_feed(&self, url: &str) -> Result<Feed, FeedError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FeedError::new(FeedFailureKind::InvalidUrl, err.to_string()))?;
        let bytes = self.download(parsed).await?;
        poster_debug!("Fetched feed {} ({} bytes)", url, bytes.len());
        parse_feed(&bytes)
    }
}

/// Parse RSS, Atom or JSON Feed bytes, keeping upstream item order.
pub fn parse_feed(bytes: &[u8]) -> Result<Feed, FeedError> {
    let parsed = feed_rs::parser::parse(bytes)
        .map_err(|err| FeedError::new(FeedFailureKind::Malformed, err.to_string()))?;

    let title = parsed.title.map(|t| t.content).unwrap_or_default();
    let items: Vec<FeedItem> = parsed.entries.iter().map(to_item).collect();
    // The newest link is the ledger key; an empty one would match a fresh marker.
    if items.first().is_some_and(|item| item.link.is_empty()) {
        return Err(FeedError::new(
            FeedFailureKind::Malformed,
            "newest item has no link",
        ));
    }
    Ok(Feed { title, items })
}

fn to_item(entry: &feed_rs::model::Entry) -> FeedItem {
    let snippet = entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
        .and_then(plain_snippet);

    FeedItem {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default(),
        link: select_entry_link(entry),
        snippet,
    }
}

fn select_entry_link(entry: &feed_rs::model::Entry) -> String {
    let preferred = entry.links.iter().find(|link| {
        let rel = link.rel.as_deref().unwrap_or("");
        !link.href.trim().is_empty() && (rel.is_empty() || rel.eq_ignore_ascii_case("alternate"))
    });
    preferred
        .or_else(|| entry.links.first())
        .map(|link| link.href.trim().to_string())
        .unwrap_or_default()
}

/// Reduce an HTML summary to one line of plain text, entities decoded.
fn plain_snippet(raw: &str) -> Option<String> {
    let fragment = Html::parse_fragment(raw);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FeedError {
    if err.is_timeout() {
        return FeedError::new(FeedFailureKind::Timeout, err.to_string());
    }
    FeedError::new(FeedFailureKind::Network, err.to_string())
}
