/// One entry of a syndication feed. Identified by its `link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub snippet: Option<String>,
}

/// A parsed feed, items ordered most recent first as delivered upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
    pub title: String,
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// The newest item. Order is trusted from the source, never re-sorted.
    pub fn latest(&self) -> Option<&FeedItem> {
        self.items.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_first_item() {
        let feed = Feed {
            title: "t".into(),
            items: vec![
                FeedItem {
                    title: "new".into(),
                    link: "https://x/new".into(),
                    snippet: None,
                },
                FeedItem {
                    title: "old".into(),
                    link: "https://x/old".into(),
                    snippet: None,
                },
            ],
        };
        assert_eq!(feed.latest().map(|i| i.title.as_str()), Some("new"));
        assert_eq!(Feed::default().latest(), None);
    }
}
