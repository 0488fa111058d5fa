//! Feed poster engine: feed IO, marker ledger, LinkedIn calls, git commit and
//! the workflow that executes core effects.
mod feed;
mod ledger;
mod linkedin;
mod types;
mod vcs;
mod workflow;

pub use feed::{parse_feed, FeedReader, FeedSettings, ReqwestFeedReader};
pub use ledger::{ensure_marker_dir, MarkerLedger};
pub use linkedin::{
    resolve_identity, ApiSettings, IdentityResponse, LinkedInClient, SocialPlatform,
    DEFAULT_API_BASE,
};
pub use types::{
    FeedError, FeedFailureKind, IdentityError, LedgerError, PublishError, RunError, VcsError,
};
pub use vcs::{commit_marker, CommitOutcome, GitCli, Vcs};
pub use workflow::{RunReport, Workflow};
