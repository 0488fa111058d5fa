use crate::ShareRequest;

/// Side effects requested by [`crate::update`]; executed by the engine workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFeed { url: String },
    CheckLedger { link: String },
    ResolveIdentity,
    PublishShare { request: ShareRequest },
    /// Overwrite the marker file. Only ever requested after a confirmed share.
    RecordMarker { link: String },
    CommitMarker,
}
