// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The queue scheduler: converts as much of the backlog as possible into
//! committed posts without double-booking a slot and without scheduling
//! into the past.
//!
//! The scheduler is pure: it reads the backlog, the availability pattern,
//! the committed set, and the accounts, and returns a proposed delta
//! ([`SchedulePlan`]) for the store to apply. It has no fallible I/O and
//! cannot error; partial progress is always a valid outcome.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use threadflow_core::types::{Account, QueueSchedule, QueuedPost, ScheduledPost};
use threadflow_core::IdGenerator;

use crate::conflict::ConflictIndex;
use crate::slot::candidate_slots;

/// Search horizon used when the caller has no configured override.
pub const DEFAULT_HORIZON_DAYS: u32 = 365;

/// The delta produced by one scheduling pass.
///
/// `placed` holds the backlog entries that were assigned an instant, in
/// assignment order. `remainder` holds the entries that could not be placed
/// within the horizon, in their original relative order. `dropped` holds
/// entries whose account no longer exists; they leave the backlog without
/// being placed.
#[derive(Debug, Clone, Default)]
pub struct SchedulePlan {
    pub placed: Vec<ScheduledPost>,
    pub remainder: Vec<QueuedPost>,
    pub dropped: Vec<QueuedPost>,
}

impl SchedulePlan {
    /// True when the pass changed nothing: no placements and no drops.
    pub fn is_noop(&self) -> bool {
        self.placed.is_empty() && self.dropped.is_empty()
    }
}

/// Run one scheduling pass over the backlog.
///
/// Entries are processed strictly in arrival order (first-in,
/// first-scheduled — never reordered by pillar or account). For each entry
/// the search walks candidate slots forward from the later of `now` and the
/// latest already-committed instant, skipping slots not strictly after
/// `now` and slots occupied by either pre-existing commitments or
/// placements made earlier in this same pass. The first surviving
/// candidate is the assignment; an entry with no candidate within
/// `horizon_days` stays queued. A failure for one entry never aborts the
/// pass.
pub fn schedule_queue(
    backlog: &[QueuedPost],
    pattern: &QueueSchedule,
    committed: &[ScheduledPost],
    accounts: &[Account],
    ids: &IdGenerator,
    now: NaiveDateTime,
    horizon_days: u32,
) -> SchedulePlan {
    // Start searching after everything already on the calendar, so new
    // placements sort after all pre-existing ones and none land in the past.
    let search_start = committed
        .iter()
        .map(ScheduledPost::instant)
        .max()
        .map_or(now, |latest| latest.max(now));

    let mut index = ConflictIndex::new(committed);
    let mut plan = SchedulePlan::default();

    for entry in backlog {
        let Some(account) = accounts.iter().find(|a| a.id == entry.account_id) else {
            warn!(
                queued_post = %entry.id.0,
                account_id = entry.account_id.0,
                "dropping queued post: account no longer exists"
            );
            plan.dropped.push(entry.clone());
            continue;
        };

        let slot = candidate_slots(pattern, search_start, horizon_days)
            .find(|candidate| *candidate > now && !index.is_occupied(*candidate));

        match slot {
            Some(instant) => {
                index.insert(instant);
                debug!(
                    queued_post = %entry.id.0,
                    date = %instant.date(),
                    time = %instant.time(),
                    "placed queued post"
                );
                plan.placed.push(ScheduledPost {
                    id: ids.scheduled_post(),
                    title: entry.title.clone(),
                    posts: entry.posts.clone(),
                    hashtags: entry.hashtags.clone(),
                    account_id: account.id,
                    account_name: account.name.clone(),
                    platform: account.platform,
                    date: instant.date(),
                    time: instant.time(),
                    pillar_id: entry.pillar_id.clone(),
                });
            }
            None => {
                debug!(
                    queued_post = %entry.id.0,
                    horizon_days,
                    "no free slot within horizon; keeping queued"
                );
                plan.remainder.push(entry.clone());
            }
        }
    }

    plan
}

/// Union of the pre-existing committed set and the pass's placements,
/// resorted ascending by `(date, time)`.
pub fn merge_committed(
    existing: &[ScheduledPost],
    placed: &[ScheduledPost],
) -> Vec<ScheduledPost> {
    let mut merged: Vec<ScheduledPost> = existing.iter().chain(placed.iter()).cloned().collect();
    merged.sort_by_key(ScheduledPost::instant);
    merged
}
