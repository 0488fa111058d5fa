use std::path::PathBuf;

use poster_core::{
    ConfigError, RawInputs, RunConfig, DEFAULT_COMMIT_EMAIL, DEFAULT_COMMIT_MESSAGE,
    DEFAULT_COMMIT_USER,
};

fn inputs() -> RawInputs {
    RawInputs {
        access_token: Some("secret-token".into()),
        feed_url: Some("https://x/index.xml".into()),
        workspace: Some(PathBuf::from("/work")),
        ..RawInputs::default()
    }
}

#[test]
fn defaults_fill_optional_inputs() {
    let config = RunConfig::from_inputs(inputs()).unwrap();
    assert_eq!(config.marker_path(), PathBuf::from("/work/.github/.lastPost.txt"));
    assert_eq!(config.commit.user, DEFAULT_COMMIT_USER);
    assert_eq!(config.commit.email, DEFAULT_COMMIT_EMAIL);
    assert_eq!(config.commit.message, DEFAULT_COMMIT_MESSAGE);
    assert_eq!(config.embed_image, None);
    assert_eq!(config.thumbnail_for("https://x/a"), "https://x/a");
}

#[test]
fn empty_inputs_count_as_missing() {
    let missing_token = RunConfig::from_inputs(RawInputs {
        access_token: Some("   ".into()),
        ..inputs()
    });
    assert_eq!(
        missing_token.unwrap_err(),
        ConfigError::Missing("LinkedIn access token")
    );

    let missing_feed = RunConfig::from_inputs(RawInputs {
        feed_url: None,
        ..inputs()
    });
    assert_eq!(missing_feed.unwrap_err(), ConfigError::Missing("RSS feed URL"));

    let config = RunConfig::from_inputs(RawInputs {
        embed_image: Some(String::new()),
        ..inputs()
    })
    .unwrap();
    assert_eq!(config.embed_image, None);
}

#[test]
fn feed_url_must_parse() {
    let err = RunConfig::from_inputs(RawInputs {
        feed_url: Some("not a url".into()),
        ..inputs()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFeedUrl { .. }));
}

#[test]
fn debug_output_redacts_token() {
    let config = RunConfig::from_inputs(RawInputs {
        embed_image: Some("https://x/card.png".into()),
        last_post_path: Some("state/last.txt".into()),
        ..inputs()
    })
    .unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("<redacted>"));
    assert_eq!(config.marker_path(), PathBuf::from("/work/state/last.txt"));
    assert_eq!(config.thumbnail_for("https://x/a"), "https://x/card.png");
}
