// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue-to-calendar scheduling engine for the ThreadFlow content planner.
//!
//! Given a backlog of unscheduled posts, a recurring weekly availability
//! pattern, and the existing committed schedule, deterministically assigns
//! each backlog entry the next non-conflicting future slot — never into the
//! past, never into an occupied slot — and leaves entries unplaceable
//! within a bounded search horizon in the backlog.
//!
//! The engine is pure `chrono` logic with no I/O: the store applies the
//! returned [`SchedulePlan`] delta itself.

pub mod conflict;
pub mod queue;
pub mod slot;

pub use conflict::ConflictIndex;
pub use queue::{DEFAULT_HORIZON_DAYS, SchedulePlan, merge_committed, schedule_queue};
pub use slot::{CandidateSlots, candidate_slots, is_allowed_slot, weekday_index};
