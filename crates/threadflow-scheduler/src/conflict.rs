// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conflict index over committed post instants.
//!
//! Answers "is this exact `(date, time)` instant already taken?" against
//! both the pre-existing committed set and any commitments proposed earlier
//! in the same scheduling pass, so one pass never double-books a slot it
//! just filled.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use threadflow_core::ScheduledPost;

/// Occupancy index keyed by exact instant. Membership is value equality on
/// the combined date and HH:MM time, not a tolerance window.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    occupied: HashSet<NaiveDateTime>,
}

impl ConflictIndex {
    /// Build the index from the existing committed set.
    pub fn new(committed: &[ScheduledPost]) -> Self {
        Self {
            occupied: committed.iter().map(ScheduledPost::instant).collect(),
        }
    }

    /// True iff some committed (or just-proposed) post occupies the instant.
    pub fn is_occupied(&self, instant: NaiveDateTime) -> bool {
        self.occupied.contains(&instant)
    }

    /// Record a commitment proposed during the current pass. Returns `false`
    /// if the instant was already occupied.
    pub fn insert(&mut self, instant: NaiveDateTime) -> bool {
        self.occupied.insert(instant)
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}
