use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

pub const DEFAULT_LAST_POST_PATH: &str = ".github/.lastPost.txt";
pub const DEFAULT_COMMIT_USER: &str = "Linkedin-Post-Action";
pub const DEFAULT_COMMIT_EMAIL: &str = "linkedin-post-action@example.com";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update Last Post File";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid feed url {url:?}: {reason}")]
    InvalidFeedUrl { url: String, reason: String },
}

/// Inputs as handed over by the CI runner. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub access_token: Option<String>,
    pub feed_url: Option<String>,
    pub embed_image: Option<String>,
    pub last_post_path: Option<String>,
    pub workspace: Option<PathBuf>,
    pub commit_user: Option<String>,
    pub commit_email: Option<String>,
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSettings {
    pub user: String,
    pub email: String,
    pub message: String,
}

/// Validated configuration for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub access_token: String,
    pub feed_url: Url,
    pub embed_image: Option<String>,
    pub workspace: PathBuf,
    pub marker_path: PathBuf,
    pub commit: CommitSettings,
}

impl RunConfig {
    pub fn from_inputs(inputs: RawInputs) -> Result<Self, ConfigError> {
        let access_token =
            non_empty(inputs.access_token).ok_or(ConfigError::Missing("LinkedIn access token"))?;
        let feed_raw = non_empty(inputs.feed_url).ok_or(ConfigError::Missing("RSS feed URL"))?;
        let feed_url = Url::parse(&feed_raw).map_err(|err| ConfigError::InvalidFeedUrl {
            url: feed_raw.clone(),
            reason: err.to_string(),
        })?;

        let workspace = inputs.workspace.unwrap_or_else(|| PathBuf::from("."));
        let last_post_path = non_empty(inputs.last_post_path)
            .unwrap_or_else(|| DEFAULT_LAST_POST_PATH.to_string());
        let marker_path = workspace.join(last_post_path);

        Ok(Self {
            access_token,
            feed_url,
            embed_image: non_empty(inputs.embed_image),
            workspace,
            marker_path,
            commit: CommitSettings {
                user: non_empty(inputs.commit_user)
                    .unwrap_or_else(|| DEFAULT_COMMIT_USER.to_string()),
                email: non_empty(inputs.commit_email)
                    .unwrap_or_else(|| DEFAULT_COMMIT_EMAIL.to_string()),
                message: non_empty(inputs.commit_message)
                    .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
            },
        })
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    /// Thumbnail for a share: the configured override, else the item link.
    pub fn thumbnail_for<'a>(&'a self, item_link: &'a str) -> &'a str {
        self.embed_image.as_deref().unwrap_or(item_link)
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("access_token", &"<redacted>")
            .field("feed_url", &self.feed_url.as_str())
            .field("embed_image", &self.embed_image)
            .field("workspace", &self.workspace)
            .field("marker_path", &self.marker_path)
            .field("commit", &self.commit)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
