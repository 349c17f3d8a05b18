// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier allocation.
//!
//! All string identifiers in the workspace come from [`IdGenerator`], a
//! UUIDv4-backed allocator. Two allocations made in the same instant are
//! still distinct, unlike timestamp-derived schemes.

use uuid::Uuid;

use crate::types::{
    PillarId, QueuedPostId, SampleId, ScheduledPostId, SegmentId,
};

/// The single ID allocation capability for the workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        Self
    }

    fn fresh(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn segment(&self) -> SegmentId {
        SegmentId(self.fresh())
    }

    pub fn queued_post(&self) -> QueuedPostId {
        QueuedPostId(self.fresh())
    }

    pub fn scheduled_post(&self) -> ScheduledPostId {
        ScheduledPostId(self.fresh())
    }

    pub fn pillar(&self) -> PillarId {
        PillarId(self.fresh())
    }

    pub fn sample(&self) -> SampleId {
        SampleId(self.fresh())
    }

    pub fn activity(&self) -> String {
        self.fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_instant_allocations_are_distinct() {
        let ids = IdGenerator::new();
        // No sleeps: back-to-back allocations in the same instant must differ.
        let a = ids.scheduled_post();
        let b = ids.scheduled_post();
        assert_ne!(a, b);

        let seg_a = ids.segment();
        let seg_b = ids.segment();
        assert_ne!(seg_a, seg_b);
    }

    #[test]
    fn ids_are_nonempty() {
        let ids = IdGenerator::new();
        assert!(!ids.queued_post().0.is_empty());
        assert!(!ids.pillar().0.is_empty());
        assert!(!ids.activity().is_empty());
    }
}
