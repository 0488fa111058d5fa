//! Feed poster core: pure run state machine, data model and share shaping.
mod config;
mod decision;
mod effect;
mod feed;
mod msg;
mod share;
mod state;
mod update;

pub use config::{
    CommitSettings, ConfigError, RawInputs, RunConfig, DEFAULT_COMMIT_EMAIL,
    DEFAULT_COMMIT_MESSAGE, DEFAULT_COMMIT_USER, DEFAULT_LAST_POST_PATH,
};
pub use decision::PublishDecision;
pub use effect::Effect;
pub use feed::{Feed, FeedItem};
pub use msg::Msg;
pub use share::{
    classify_status, ContentEntity, ShareContent, ShareDistribution, ShareRejection,
    ShareRequest, ShareResult, ShareText, Thumbnail, PERSON_URN_PREFIX,
};
pub use state::{RunFailure, RunOutcome, RunState, Stage, Step};
pub use update::update;
