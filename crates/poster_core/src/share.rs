use std::collections::BTreeMap;

use serde::Serialize;

/// Body of a `POST /v2/shares` call.
///
/// The feed title is used as subject and content title, the item title as the
/// share text, matching what LinkedIn renders for article shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub owner: String,
    pub subject: String,
    pub text: ShareText,
    pub content: ShareContent,
    pub distribution: ShareDistribution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub content_entities: Vec<ContentEntity>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntity {
    pub entity_location: String,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub resolved_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShareDistribution {
    pub linked_in_distribution_target: BTreeMap<String, String>,
}

pub const PERSON_URN_PREFIX: &str = "urn:li:person:";

impl ShareRequest {
    pub fn new(
        owner_id: &str,
        feed_title: &str,
        item_title: &str,
        item_link: &str,
        thumbnail_url: &str,
    ) -> Self {
        Self {
            owner: format!("{PERSON_URN_PREFIX}{owner_id}"),
            subject: feed_title.to_string(),
            text: ShareText {
                text: item_title.to_string(),
            },
            content: ShareContent {
                content_entities: vec![ContentEntity {
                    entity_location: item_link.to_string(),
                    thumbnails: vec![Thumbnail {
                        resolved_url: thumbnail_url.to_string(),
                    }],
                }],
                title: feed_title.to_string(),
            },
            distribution: ShareDistribution::default(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Raw platform response to a share call. Never interpreted by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShareResult {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Why the platform refused a share.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareRejection {
    #[error("invalid access token (status {status}); check that the LinkedIn access token is valid and has not expired")]
    Unauthorized { status: u16 },
    #[error("rate limited by LinkedIn (status 429)")]
    RateLimited,
    #[error("LinkedIn server error (status {status})")]
    ServerError { status: u16 },
    #[error("failed to post on LinkedIn (status {status}): {body}")]
    Unexpected { status: u16, body: String },
}

/// Classify a share response. `Ok` means the share exists on the platform.
pub fn classify_status(result: &ShareResult) -> Result<(), ShareRejection> {
    match result.status {
        200..=299 => Ok(()),
        401 | 403 => Err(ShareRejection::Unauthorized {
            status: result.status,
        }),
        429 => Err(ShareRejection::RateLimited),
        500..=599 => Err(ShareRejection::ServerError {
            status: result.status,
        }),
        status => Err(ShareRejection::Unexpected {
            status,
            body: result.body.clone(),
        }),
    }
}
