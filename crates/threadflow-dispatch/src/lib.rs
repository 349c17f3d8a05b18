// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic due-post dispatch for the ThreadFlow content planner.
//!
//! On a cron cadence (hourly by default), [`DispatchJob`] partitions every
//! user's committed posts into "due" (instant at or before the trigger
//! time) and "not yet due", hands each due post to the platform's
//! publishing collaborator, and persists only the not-yet-due remainder.
//! Due posts are removed from the pending set regardless of publish
//! success: there is no retry queue; a failed publish is logged and
//! dropped.
//!
//! The job runs on its own timer, unsynchronized with interactive sessions
//! beyond sharing the persisted documents. A user saving a schedule change
//! in the exact window a pass is rewriting their document can lose that
//! change; the cadence is coarse relative to interactive edits, and the
//! source system accepted the same race.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use croner::Cron;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::{DocumentStore, Publisher};
use threadflow_core::types::{Platform, ScheduledPost};

/// Outcome counters for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Users whose documents were examined.
    pub users: usize,
    /// Due posts successfully handed to a publisher.
    pub published: usize,
    /// Due posts whose publish failed (still removed from pending).
    pub failed: usize,
    /// Due posts for platforms with no registered publisher.
    pub simulated: usize,
}

/// The periodic dispatch job.
pub struct DispatchJob {
    storage: Arc<dyn DocumentStore>,
    publishers: HashMap<Platform, Arc<dyn Publisher>>,
    cron: String,
}

impl DispatchJob {
    pub fn new(storage: Arc<dyn DocumentStore>, cron: impl Into<String>) -> Self {
        Self {
            storage,
            publishers: HashMap::new(),
            cron: cron.into(),
        }
    }

    /// Register the publishing collaborator for its platform. Platforms
    /// without a registered publisher get a simulated (logged-only)
    /// publish, matching the source system's behavior for them.
    pub fn register_publisher(&mut self, publisher: Arc<dyn Publisher>) {
        self.publishers.insert(publisher.platform(), publisher);
    }

    /// Execute one dispatch pass at the given trigger time.
    pub async fn run_pass(&self, now: NaiveDateTime) -> Result<DispatchSummary, ThreadflowError> {
        let mut summary = DispatchSummary::default();

        for user in self.storage.list_users().await? {
            let Some(mut document) = self.storage.load(&user).await? else {
                continue;
            };
            summary.users += 1;

            let (due, pending): (Vec<ScheduledPost>, Vec<ScheduledPost>) = document
                .scheduled
                .into_iter()
                .partition(|post| post.instant() <= now);
            document.scheduled = pending;

            if due.is_empty() {
                continue;
            }
            info!(user = %user.0, due = due.len(), "dispatching due posts");

            for post in due {
                let texts: Vec<String> =
                    post.posts.iter().map(|segment| segment.text.clone()).collect();

                match self.publishers.get(&post.platform) {
                    Some(publisher) => {
                        match publisher.publish_thread(&user, &texts, &post.hashtags).await {
                            Ok(ids) => {
                                info!(
                                    user = %user.0,
                                    title = post.title,
                                    posts = ids.len(),
                                    "published thread"
                                );
                                summary.published += 1;
                            }
                            Err(err) => {
                                // The post is dropped from pending anyway.
                                error!(
                                    user = %user.0,
                                    title = post.title,
                                    error = %err,
                                    "publish failed; post removed from pending"
                                );
                                summary.failed += 1;
                            }
                        }
                    }
                    None => {
                        warn!(
                            user = %user.0,
                            platform = %post.platform,
                            title = post.title,
                            "no publisher for platform; simulated publish"
                        );
                        summary.simulated += 1;
                    }
                }
            }

            self.storage.save(&user, &document).await?;
        }

        debug!(?summary, "dispatch pass finished");
        Ok(summary)
    }

    /// Run forever on the configured cron cadence until cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), ThreadflowError> {
        let cron = Cron::from_str(&self.cron).map_err(|e| {
            ThreadflowError::Config(format!("invalid dispatch cron `{}`: {e}", self.cron))
        })?;

        info!(cron = %self.cron, "dispatch job started");
        loop {
            let now = Utc::now();
            let next = cron.find_next_occurrence(&now, false).map_err(|e| {
                ThreadflowError::Config(format!("cron `{}` has no next occurrence: {e}", self.cron))
            })?;
            let wait = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            debug!(next = %next, "dispatch sleeping until next occurrence");

            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("dispatch job stopping");
                    return Ok(());
                }
                _ = tokio::time::sleep(wait) => {
                    // One bad pass must not kill the timer loop.
                    if let Err(err) = self.run_pass(Utc::now().naive_utc()).await {
                        error!(error = %err, "dispatch pass failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use threadflow_core::types::{
        AccountId, PostSegment, ScheduledPostId, SegmentId, UserId, WorkspaceDocument,
    };
    use threadflow_test_utils::{MemoryDocumentStore, MockPublisher};

    fn post_at(title: &str, y: i32, m: u32, d: u32, h: u32) -> ScheduledPost {
        ScheduledPost {
            id: ScheduledPostId(format!("post-{title}")),
            title: title.to_string(),
            posts: vec![PostSegment {
                id: SegmentId(format!("seg-{title}")),
                text: format!("{title} body"),
            }],
            hashtags: vec!["b2b".into()],
            account_id: AccountId(1),
            account_name: "@corp".into(),
            platform: Platform::Threads,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            time: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
            pillar_id: None,
        }
    }

    fn trigger() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn due_posts_are_published_and_removed() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    scheduled: vec![
                        post_at("past", 2026, 5, 31, 9),
                        post_at("future", 2026, 6, 2, 9),
                    ],
                    ..Default::default()
                },
            )
            .await;

        let publisher = Arc::new(MockPublisher::new(Platform::Threads));
        let mut job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        job.register_publisher(publisher.clone());

        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary.published, 1);
        assert_eq!(summary.failed, 0);

        // Only the future post survives in storage.
        let document = storage.get(&user).await.unwrap();
        assert_eq!(document.scheduled.len(), 1);
        assert_eq!(document.scheduled[0].title, "future");

        // The publisher saw the due post's texts and hashtags.
        let published = publisher.published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].texts, vec!["past body"]);
        assert_eq!(published[0].hashtags, vec!["b2b"]);
    }

    #[tokio::test]
    async fn a_post_due_exactly_at_the_trigger_is_dispatched() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    scheduled: vec![post_at("boundary", 2026, 6, 1, 12)],
                    ..Default::default()
                },
            )
            .await;

        let mut job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        job.register_publisher(Arc::new(MockPublisher::new(Platform::Threads)));

        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary.published, 1);
        assert!(storage.get(&user).await.unwrap().scheduled.is_empty());
    }

    #[tokio::test]
    async fn failed_publish_still_drops_the_post() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    scheduled: vec![post_at("doomed", 2026, 5, 31, 9)],
                    ..Default::default()
                },
            )
            .await;

        let publisher = Arc::new(MockPublisher::new(Platform::Threads));
        publisher.fail_after(0).await;
        let mut job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        job.register_publisher(publisher);

        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.published, 0);
        // No retry queue: the post is gone from pending state.
        assert!(storage.get(&user).await.unwrap().scheduled.is_empty());
    }

    #[tokio::test]
    async fn platforms_without_a_publisher_are_simulated() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        let mut insta = post_at("insta", 2026, 5, 31, 9);
        insta.platform = Platform::Instagram;
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    scheduled: vec![insta],
                    ..Default::default()
                },
            )
            .await;

        // Only a Threads publisher is registered.
        let mut job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        job.register_publisher(Arc::new(MockPublisher::new(Platform::Threads)));

        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary.simulated, 1);
        assert!(storage.get(&user).await.unwrap().scheduled.is_empty());
    }

    #[tokio::test]
    async fn every_user_is_processed() {
        let storage = MemoryDocumentStore::new();
        for n in 1..=3 {
            storage
                .seed(
                    &UserId(format!("user-{n}")),
                    WorkspaceDocument {
                        scheduled: vec![post_at(&format!("due-{n}"), 2026, 5, 31, 9)],
                        ..Default::default()
                    },
                )
                .await;
        }

        let publisher = Arc::new(MockPublisher::new(Platform::Threads));
        let mut job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        job.register_publisher(publisher.clone());

        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary.users, 3);
        assert_eq!(summary.published, 3);
        assert_eq!(publisher.published().await.len(), 3);
    }

    #[tokio::test]
    async fn users_with_nothing_due_are_left_untouched() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    scheduled: vec![post_at("future", 2026, 6, 2, 9)],
                    ..Default::default()
                },
            )
            .await;

        let job = DispatchJob::new(Arc::new(storage.clone()), "0 * * * *");
        let summary = job.run_pass(trigger()).await.unwrap();
        assert_eq!(summary, DispatchSummary { users: 1, ..Default::default() });
        assert_eq!(storage.get(&user).await.unwrap().scheduled.len(), 1);
    }

    #[tokio::test]
    async fn run_rejects_an_invalid_cron_expression() {
        let job = DispatchJob::new(Arc::new(MemoryDocumentStore::new()), "not a cron");
        let err = job.run(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ThreadflowError::Config(_)));
    }

    #[tokio::test]
    async fn run_stops_on_cancellation() {
        let job = DispatchJob::new(Arc::new(MemoryDocumentStore::new()), "0 * * * *");
        let token = CancellationToken::new();
        token.cancel();
        job.run(token).await.unwrap();
    }
}
