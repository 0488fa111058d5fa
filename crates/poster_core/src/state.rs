use std::fmt;

use crate::{FeedItem, ShareRejection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Start,
    FeedFetched,
    PublishDecided,
    IdentityResolved,
    Published,
    SkippedAlreadyPublished,
    Committed,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Stage::SkippedAlreadyPublished | Stage::Committed | Stage::Failed
        )
    }
}

/// The effect that was running when a step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FetchFeed,
    CheckLedger,
    ResolveIdentity,
    PublishShare,
    RecordMarker,
    CommitMarker,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::FetchFeed => "fetching feed",
            Step::CheckLedger => "checking last post marker",
            Step::ResolveIdentity => "resolving LinkedIn identity",
            Step::PublishShare => "posting share",
            Step::RecordMarker => "recording last post marker",
            Step::CommitMarker => "committing last post marker",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunFailure {
    #[error("no items found in feed")]
    EmptyFeed,
    #[error("newest item has no link")]
    MissingLink,
    #[error(transparent)]
    Rejected(#[from] ShareRejection),
    #[error("{step} failed: {message}")]
    Step { step: Step, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Published { item: FeedItem, pushed: bool },
    AlreadyPublished { item: FeedItem },
    Failed(RunFailure),
}

/// State of a single run. Transient: nothing here outlives the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    stage: Stage,
    thumbnail_override: Option<String>,
    feed_title: String,
    latest: Option<FeedItem>,
    owner_id: Option<String>,
    pushed: bool,
    failure: Option<RunFailure>,
}

impl RunState {
    pub fn new(thumbnail_override: Option<String>) -> Self {
        Self {
            thumbnail_override,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn latest(&self) -> Option<&FeedItem> {
        self.latest.as_ref()
    }

    pub fn feed_title(&self) -> &str {
        &self.feed_title
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        self.failure.as_ref()
    }

    /// `None` until the run reaches a terminal stage.
    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.stage {
            Stage::Committed => self.latest.clone().map(|item| RunOutcome::Published {
                item,
                pushed: self.pushed,
            }),
            Stage::SkippedAlreadyPublished => self
                .latest
                .clone()
                .map(|item| RunOutcome::AlreadyPublished { item }),
            Stage::Failed => self.failure.clone().map(RunOutcome::Failed),
            _ => None,
        }
    }

    pub(crate) fn thumbnail_override(&self) -> Option<&str> {
        self.thumbnail_override.as_deref()
    }

    pub(crate) fn feed_loaded(&mut self, title: String, latest: FeedItem) {
        self.feed_title = title;
        self.latest = Some(latest);
        self.stage = Stage::FeedFetched;
    }

    pub(crate) fn set_owner(&mut self, owner_id: String) {
        self.owner_id = Some(owner_id);
        self.stage = Stage::IdentityResolved;
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn set_pushed(&mut self, pushed: bool) {
        self.pushed = pushed;
    }

    pub(crate) fn fail(&mut self, failure: RunFailure) {
        self.failure = Some(failure);
        self.stage = Stage::Failed;
    }
}
