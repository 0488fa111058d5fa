use crate::{classify_status, Effect, Msg, RunFailure, RunState, ShareRequest, Stage};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current stage are ignored, and terminal
/// stages accept nothing further.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    if state.stage().is_terminal() {
        return (state, Vec::new());
    }

    let effects = match (state.stage(), msg) {
        (Stage::Start, Msg::Started { feed_url }) => vec![Effect::FetchFeed { url: feed_url }],
        (Stage::Start, Msg::FeedFetched(feed)) => {
            let mut items = feed.items.into_iter();
            match items.next() {
                Some(latest) if latest.link.is_empty() => {
                    state.fail(RunFailure::MissingLink);
                    Vec::new()
                }
                Some(latest) => {
                    let link = latest.link.clone();
                    state.feed_loaded(feed.title, latest);
                    vec![Effect::CheckLedger { link }]
                }
                None => {
                    state.fail(RunFailure::EmptyFeed);
                    Vec::new()
                }
            }
        }
        (Stage::FeedFetched, Msg::LedgerChecked { already_published }) => {
            if already_published {
                state.set_stage(Stage::SkippedAlreadyPublished);
                Vec::new()
            } else {
                state.set_stage(Stage::PublishDecided);
                vec![Effect::ResolveIdentity]
            }
        }
        (Stage::PublishDecided, Msg::IdentityResolved { owner_id }) => {
            let request = match state.latest() {
                Some(item) => {
                    let thumbnail = state.thumbnail_override().unwrap_or(item.link.as_str());
                    ShareRequest::new(
                        &owner_id,
                        state.feed_title(),
                        &item.title,
                        &item.link,
                        thumbnail,
                    )
                }
                None => return (state, Vec::new()),
            };
            state.set_owner(owner_id);
            vec![Effect::PublishShare { request }]
        }
        (Stage::IdentityResolved, Msg::ShareCompleted(result)) => {
            match classify_status(&result) {
                Ok(()) => {
                    state.set_stage(Stage::Published);
                    match state.latest() {
                        Some(item) => vec![
                            Effect::RecordMarker {
                                link: item.link.clone(),
                            },
                            Effect::CommitMarker,
                        ],
                        None => Vec::new(),
                    }
                }
                Err(rejection) => {
                    state.fail(RunFailure::Rejected(rejection));
                    Vec::new()
                }
            }
        }
        (Stage::Published, Msg::MarkerCommitted { pushed }) => {
            state.set_pushed(pushed);
            state.set_stage(Stage::Committed);
            Vec::new()
        }
        (_, Msg::StepFailed { step, message }) => {
            state.fail(RunFailure::Step { step, message });
            Vec::new()
        }
        _ => Vec::new(),
    };

    (state, effects)
}

