//! LinkedIn v2 REST calls: identity lookup and share creation.
//!
//! Every call carries `Authorization: Bearer <token>` and
//! `X-Restli-Protocol-Version: 2.0.0`. Nothing here retries.

use std::collections::BTreeMap;
use std::time::Duration;

use poster_core::{ShareRequest, ShareResult};
use poster_logging::{poster_debug, poster_warn};
use reqwest::header::{HeaderMap, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::{IdentityError, PublishError};

pub const DEFAULT_API_BASE: &str = "https://api.linkedin.com";
const USERINFO_PATH: &str = "/v2/userinfo";
const ME_PATH: &str = "/v2/me";
const SHARES_PATH: &str = "/v2/shares";
const RESTLI_PROTOCOL_VERSION: &str = "X-Restli-Protocol-Version";
const LI_FORMAT: &str = "x-li-format";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Raw JSON answer of an identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait::async_trait]
pub trait SocialPlatform: Send + Sync {
    /// `GET /v2/userinfo`.
    async fn user_info(&self, token: &str) -> Result<IdentityResponse, IdentityError>;

    /// `GET /v2/me`, the legacy profile endpoint.
    async fn me(&self, token: &str) -> Result<IdentityResponse, IdentityError>;

    /// `POST /v2/shares`. Non-2xx answers are returned, not raised.
    async fn publish(
        &self,
        token: &str,
        request: &ShareRequest,
    ) -> Result<ShareResult, PublishError>;
}

/// Resolve the owner id: `sub` from userinfo, else `id` from the `/v2/me` fallback.
pub async fn resolve_identity(
    platform: &dyn SocialPlatform,
    token: &str,
) -> Result<String, IdentityError> {
    poster_debug!("Fetching LinkedIn user info");
    let userinfo = platform.user_info(token).await?;
    if let Some(sub) = json_string_field(&userinfo, "sub")? {
        poster_debug!("Found LinkedIn ID: {}", sub);
        return Ok(sub);
    }

    poster_debug!("No sub found, calling {}", ME_PATH);
    me_fallback(platform, token).await
}

async fn me_fallback(platform: &dyn SocialPlatform, token: &str) -> Result<String, IdentityError> {
    let me = platform.me(token).await?;
    let id = json_string_field(&me, "id")?.ok_or_else(|| {
        IdentityError::Unavailable(format!("{ME_PATH} response has no id field"))
    })?;
    poster_debug!("Found LinkedIn ID from {}: {}", ME_PATH, id);
    Ok(id)
}

/// Check the status, then pull a non-empty string field out of the JSON body.
fn json_string_field(
    response: &IdentityResponse,
    field: &str,
) -> Result<Option<String>, IdentityError> {
    match response.status {
        401 | 403 => {
            return Err(IdentityError::Auth {
                status: response.status,
            })
        }
        200..=299 => {}
        status => {
            return Err(IdentityError::Unavailable(format!(
                "unexpected status {status}: {}",
                response.body
            )))
        }
    }

    let value: serde_json::Value = serde_json::from_str(&response.body)
        .map_err(|err| IdentityError::Unavailable(format!("invalid identity json: {err}")))?;
    let found = match value.get(field) {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    Ok(found)
}

#[derive(Debug, Clone)]
pub struct LinkedInClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl LinkedInClient {
    pub fn new(settings: ApiSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.settings.base_url.join(path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(token)
            .header(CACHE_CONTROL, "no-cache")
            .header(RESTLI_PROTOCOL_VERSION, "2.0.0")
    }

    async fn get_identity(&self, path: &str, token: &str) -> Result<IdentityResponse, IdentityError> {
        let url = self
            .endpoint(path)
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        let response = self
            .authorized(self.client.get(url), token)
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        Ok(IdentityResponse { status, body })
    }
}

#[async_trait::async_trait]
impl SocialPlatform for LinkedInClient {
    async fn user_info(&self, token: &str) -> Result<IdentityResponse, IdentityError> {
        self.get_identity(USERINFO_PATH, token).await
    }

    async fn me(&self, token: &str) -> Result<IdentityResponse, IdentityError> {
        self.get_identity(ME_PATH, token).await
    }

    async fn publish(
        &self,
        token: &str,
        request: &ShareRequest,
    ) -> Result<ShareResult, PublishError> {
        let body = request
            .to_json()
            .map_err(|err| PublishError::Encode(err.to_string()))?;
        let url = self
            .endpoint(SHARES_PATH)
            .map_err(|err| PublishError::Network(err.to_string()))?;

        poster_debug!("Posting to LinkedIn: {}", request.subject);
        // reqwest derives Content-Length from the byte body.
        let response = self
            .authorized(self.client.post(url), token)
            .header(CONTENT_TYPE, "application/json")
            .header(LI_FORMAT, "json")
            .body(body)
            .send()
            .await
            .map_err(|err| PublishError::Network(err.to_string()))?;

        let status = response.status();
        let headers = header_map(response.headers());
        let body = response
            .text()
            .await
            .map_err(|err| PublishError::Network(err.to_string()))?;
        if status == StatusCode::TOO_MANY_REQUESTS {
            poster_warn!(
                "LinkedIn rate limit hit, remaining={:?}",
                headers.get("x-ratelimit-remaining")
            );
        }

        Ok(ShareResult {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
