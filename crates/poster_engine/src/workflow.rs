use std::collections::VecDeque;

use poster_core::{
    classify_status, update, Effect, FeedItem, Msg, RunConfig, RunOutcome, RunState, Step,
};
use poster_logging::{poster_debug, poster_error, poster_info};

use crate::feed::FeedReader;
use crate::ledger::MarkerLedger;
use crate::linkedin::{resolve_identity, SocialPlatform};
use crate::vcs::{commit_marker, CommitOutcome, Vcs};
use crate::RunError;

/// Successful ends of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Published { item: FeedItem, pushed: bool },
    AlreadyPublished { item: FeedItem },
}

/// Executes the effects requested by the core state machine, one at a time.
pub struct Workflow<'a> {
    feed_reader: &'a dyn FeedReader,
    platform: &'a dyn SocialPlatform,
    vcs: &'a dyn Vcs,
}

impl<'a> Workflow<'a> {
    pub fn new(
        feed_reader: &'a dyn FeedReader,
        platform: &'a dyn SocialPlatform,
        vcs: &'a dyn Vcs,
    ) -> Self {
        Self {
            feed_reader,
            platform,
            vcs,
        }
    }

    /// Run once: fetch, check, share, record, commit. The first error ends the run.
    pub async fn run(&self, config: &RunConfig) -> Result<RunReport, RunError> {
        let ledger = MarkerLedger::new(config.marker_path());
        let (mut state, effects) = update(
            RunState::new(config.embed_image.clone()),
            Msg::Started {
                feed_url: config.feed_url.to_string(),
            },
        );
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            let step = step_of(&effect);
            let msg = match self.execute(effect, config, &ledger).await {
                Ok(Some(msg)) => msg,
                Ok(None) => continue,
                Err(err) => {
                    let (failed, _) = update(
                        state,
                        Msg::StepFailed {
                            step,
                            message: err.to_string(),
                        },
                    );
                    if let Some(RunOutcome::Failed(failure)) = failed.outcome() {
                        poster_error!("Run stopped: {}", failure);
                    }
                    return Err(err);
                }
            };
            let (next, effects) = update(state, msg);
            poster_debug!("Stage {:?}", next.stage());
            state = next;
            queue.extend(effects);
        }

        match state.outcome() {
            Some(RunOutcome::Published { item, pushed }) => {
                poster_info!("Successfully posted to LinkedIn");
                poster_info!("Post: {}", item.title);
                poster_info!("Link: {}", item.link);
                if let Some(snippet) = &item.snippet {
                    poster_info!("Content: {}", snippet);
                }
                Ok(RunReport::Published { item, pushed })
            }
            Some(RunOutcome::AlreadyPublished { item }) => Ok(RunReport::AlreadyPublished { item }),
            Some(RunOutcome::Failed(failure)) => Err(RunError::from_failure(&failure)),
            None => Err(RunError::Incomplete(format!(
                "no effects left in stage {:?}",
                state.stage()
            ))),
        }
    }

    async fn execute(
        &self,
        effect: Effect,
        config: &RunConfig,
        ledger: &MarkerLedger,
    ) -> Result<Option<Msg>, RunError> {
        match effect {
            Effect::FetchFeed { url } => {
                poster_info!("Parsing RSS feed: {}", url);
                let feed = self.feed_reader.fetch_feed(&url).await?;
                poster_info!("Feed title: {}", feed.title);
                if let Some(latest) = feed.latest() {
                    poster_info!("Latest post: {}", latest.title);
                }
                Ok(Some(Msg::FeedFetched(feed)))
            }
            Effect::CheckLedger { link } => {
                let already_published = ledger.check_link(&link)?;
                Ok(Some(Msg::LedgerChecked { already_published }))
            }
            Effect::ResolveIdentity => {
                let owner_id = resolve_identity(self.platform, &config.access_token).await?;
                poster_info!("LinkedIn owner ID: {}", owner_id);
                Ok(Some(Msg::IdentityResolved { owner_id }))
            }
            Effect::PublishShare { request } => {
                poster_info!("Posting to LinkedIn...");
                let result = self
                    .platform
                    .publish(&config.access_token, &request)
                    .await?;
                poster_info!("LinkedIn API response status: {}", result.status);
                if classify_status(&result).is_err() {
                    poster_error!("Response: {}", result.body);
                }
                Ok(Some(Msg::ShareCompleted(result)))
            }
            Effect::RecordMarker { link } => {
                ledger.mark(&link)?;
                Ok(None)
            }
            Effect::CommitMarker => {
                let outcome = commit_marker(
                    self.vcs,
                    ledger.path(),
                    &config.commit.email,
                    &config.commit.user,
                    &config.commit.message,
                )?;
                Ok(Some(Msg::MarkerCommitted {
                    pushed: outcome == CommitOutcome::Pushed,
                }))
            }
        }
    }
}

fn step_of(effect: &Effect) -> Step {
    match effect {
        Effect::FetchFeed { .. } => Step::FetchFeed,
        Effect::CheckLedger { .. } => Step::CheckLedger,
        Effect::ResolveIdentity => Step::ResolveIdentity,
        Effect::PublishShare { .. } => Step::PublishShare,
        Effect::RecordMarker { .. } => Step::RecordMarker,
        Effect::CommitMarker => Step::CommitMarker,
    }
}
