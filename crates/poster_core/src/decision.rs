/// Whether the newest feed item still needs to be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishDecision {
    AlreadyPublished,
    Publish,
}

impl PublishDecision {
    /// Exact byte comparison between the stored marker and the newest link.
    /// No normalization: a trailing slash or case change counts as new.
    pub fn from_marker(marker: &str, latest_link: &str) -> Self {
        if marker == latest_link {
            PublishDecision::AlreadyPublished
        } else {
            PublishDecision::Publish
        }
    }

    pub fn already_published(self) -> bool {
        self == PublishDecision::AlreadyPublished
    }
}
