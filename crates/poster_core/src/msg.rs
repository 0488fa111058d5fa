use crate::{Feed, ShareResult, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Process entry handed over the configured feed.
    Started { feed_url: String },
    /// Feed reader returned a parsed feed.
    FeedFetched(Feed),
    /// Ledger compared the marker against the newest link.
    LedgerChecked { already_published: bool },
    /// Identity resolver produced the owner id.
    IdentityResolved { owner_id: String },
    /// Platform answered the share call, whatever the status.
    ShareCompleted(ShareResult),
    /// Ledger committer finished; `pushed` is false when there was nothing to commit.
    MarkerCommitted { pushed: bool },
    /// An effect failed with an error; the run stops.
    StepFailed { step: Step, message: String },
}
