use std::fmt;
use std::io;
use std::path::PathBuf;

use poster_core::{RunFailure, ShareRejection};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FeedError {
    pub kind: FeedFailureKind,
    pub message: String,
}

impl FeedError {
    pub(crate) fn new(kind: FeedFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Content arrived but could not be read as a feed.
    pub fn is_malformed(&self) -> bool {
        self.kind == FeedFailureKind::Malformed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Malformed,
}

impl fmt::Display for FeedFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFailureKind::InvalidUrl => write!(f, "invalid feed url"),
            FeedFailureKind::HttpStatus(code) => write!(f, "feed unavailable (http status {code})"),
            FeedFailureKind::Timeout => write!(f, "feed unavailable (timeout)"),
            FeedFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "feed too large (max {max_bytes}, actual {actual:?})")
            }
            FeedFailureKind::Network => write!(f, "feed unavailable (network error)"),
            FeedFailureKind::Malformed => write!(f, "feed malformed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("feed has no items to compare against the marker")]
    EmptyFeed,
    #[error("marker directory {path:?} is not usable: {message}")]
    Directory { path: PathBuf, message: String },
    #[error("io error on marker {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("LinkedIn rejected the access token while resolving identity (status {status}); refresh the access token")]
    Auth { status: u16 },
    #[error("LinkedIn identity unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("invalid share request: {0}")]
    Encode(String),
    #[error("share request failed: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VcsError {
    #[error("failed to run git {args}: {message}")]
    Spawn { args: String, message: String },
    #[error("git {args} exited with {code:?}: {stderr}")]
    Command {
        args: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Everything that can end a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("no items found in feed")]
    EmptyFeed,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Rejected(#[from] ShareRejection),
    #[error(transparent)]
    Vcs(#[from] VcsError),
    /// The state machine ended in a stage the workflow cannot report on.
    #[error("run stopped unexpectedly: {0}")]
    Incomplete(String),
}

impl RunError {
    /// Failures the state machine decided on itself, without an IO error.
    pub(crate) fn from_failure(failure: &RunFailure) -> Self {
        match failure {
            RunFailure::EmptyFeed => RunError::EmptyFeed,
            RunFailure::MissingLink => RunError::Feed(FeedError::new(
                FeedFailureKind::Malformed,
                failure.to_string(),
            )),
            RunFailure::Rejected(rejection) => RunError::Rejected(rejection.clone()),
            RunFailure::Step { .. } => RunError::Incomplete(failure.to_string()),
        }
    }
}
