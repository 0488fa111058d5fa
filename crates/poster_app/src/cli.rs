use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use poster_core::RawInputs;
use poster_engine::{ApiSettings, DEFAULT_API_BASE};

/// Share the newest entry of a feed on LinkedIn, once.
///
/// Every input can also be given as a GitHub Actions `INPUT_*` variable.
#[derive(Debug, Parser)]
#[command(name = "feed-poster", version, about)]
pub struct Cli {
    /// LinkedIn OAuth access token.
    #[arg(long, env = "INPUT_LN_ACCESS_TOKEN", hide_env_values = true)]
    pub ln_access_token: Option<String>,

    /// URL of the RSS/Atom feed.
    #[arg(long, env = "INPUT_FEED_LIST")]
    pub feed_list: Option<String>,

    /// Thumbnail URL for the share; defaults to the post link.
    #[arg(long, env = "INPUT_EMBED_IMAGE")]
    pub embed_image: Option<String>,

    /// Marker file, relative to the workspace.
    #[arg(long, env = "INPUT_LAST_POST_PATH")]
    pub last_post_path: Option<String>,

    #[arg(long, env = "INPUT_COMMIT_USER")]
    pub commit_user: Option<String>,

    #[arg(long, env = "INPUT_COMMIT_EMAIL")]
    pub commit_email: Option<String>,

    #[arg(long, env = "INPUT_COMMIT_MESSAGE")]
    pub commit_message: Option<String>,

    /// Repository checkout the marker lives in.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    #[arg(long, env = "POSTER_API_BASE_URL", default_value = DEFAULT_API_BASE)]
    pub api_base_url: String,

    /// Also write the log to this file.
    #[arg(long, env = "POSTER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            access_token: self.ln_access_token.clone(),
            feed_url: self.feed_list.clone(),
            embed_image: self.embed_image.clone(),
            last_post_path: self.last_post_path.clone(),
            workspace: self.workspace.clone(),
            commit_user: self.commit_user.clone(),
            commit_email: self.commit_email.clone(),
            commit_message: self.commit_message.clone(),
        }
    }

    pub fn api_settings(&self) -> anyhow::Result<ApiSettings> {
        let base_url = self
            .api_base_url
            .parse()
            .with_context(|| format!("invalid API base url {:?}", self.api_base_url))?;
        Ok(ApiSettings::with_base_url(base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_core::RunConfig;

    #[test]
    fn flags_map_onto_run_config() {
        let cli = Cli::try_parse_from([
            "feed-poster",
            "--ln-access-token",
            "token",
            "--feed-list",
            "https://x/index.xml",
            "--last-post-path",
            "state/last.txt",
            "--workspace",
            "/work",
            "--commit-user",
            "Bot",
        ])
        .unwrap();

        let config = RunConfig::from_inputs(cli.raw_inputs()).unwrap();
        assert_eq!(config.feed_url.as_str(), "https://x/index.xml");
        assert_eq!(config.marker_path(), PathBuf::from("/work/state/last.txt"));
        assert_eq!(config.commit.user, "Bot");
    }

    #[test]
    fn api_base_must_be_a_url() {
        let cli = Cli::try_parse_from(["feed-poster", "--api-base-url", "::nope::"]).unwrap();
        assert!(cli.api_settings().is_err());

        let cli =
            Cli::try_parse_from(["feed-poster", "--api-base-url", "http://127.0.0.1:9"]).unwrap();
        assert_eq!(
            cli.api_settings().unwrap().base_url.as_str(),
            "http://127.0.0.1:9/"
        );
    }
}
