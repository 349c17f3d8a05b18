// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot calendar model: pure time logic over the recurring weekly
//! availability pattern.
//!
//! A slot is a `(date, time-of-day)` instant whose weekday is in
//! `QueueSchedule::days` and whose time matches one of
//! `QueueSchedule::times` exactly. [`candidate_slots`] enumerates them
//! forward from a starting instant, day by day in calendar order; within a
//! day, times are visited in the configured order, never sorted.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Weekday index of a date: 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parse an `HH:MM` pattern time. Returns `None` for malformed entries,
/// which the slot enumeration silently skips.
fn parse_pattern_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// True iff the instant falls on an allowed weekday at an exactly-matching
/// configured time. Equality is exact (09:00:30 does not match "09:00"),
/// never nearest-match.
pub fn is_allowed_slot(pattern: &threadflow_core::QueueSchedule, instant: NaiveDateTime) -> bool {
    pattern.days.contains(&weekday_index(instant.date()))
        && pattern
            .times
            .iter()
            .filter_map(|t| parse_pattern_time(t))
            .any(|t| t == instant.time())
}

/// Lazy, finite, restartable enumeration of candidate slots.
///
/// Starts at `start` (same day inclusive; slots earlier in the start day
/// are skipped) and gives up after `horizon_days` calendar days even if
/// fewer slots were produced than the caller wanted. An empty `days` or
/// `times` yields an empty sequence.
pub fn candidate_slots(
    pattern: &threadflow_core::QueueSchedule,
    start: NaiveDateTime,
    horizon_days: u32,
) -> CandidateSlots {
    CandidateSlots {
        days: pattern.days.clone(),
        times: pattern
            .times
            .iter()
            .filter_map(|t| parse_pattern_time(t))
            .collect(),
        start,
        horizon_days,
        day_offset: 0,
        time_index: 0,
    }
}

/// Iterator over candidate slots. See [`candidate_slots`].
#[derive(Debug, Clone)]
pub struct CandidateSlots {
    days: Vec<u8>,
    times: Vec<NaiveTime>,
    start: NaiveDateTime,
    horizon_days: u32,
    day_offset: u32,
    time_index: usize,
}

impl Iterator for CandidateSlots {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        if self.days.is_empty() || self.times.is_empty() {
            return None;
        }

        while self.day_offset < self.horizon_days {
            let Some(date) = self
                .start
                .date()
                .checked_add_days(Days::new(u64::from(self.day_offset)))
            else {
                return None;
            };

            if !self.days.contains(&weekday_index(date)) || self.time_index >= self.times.len() {
                self.day_offset += 1;
                self.time_index = 0;
                continue;
            }

            let time = self.times[self.time_index];
            self.time_index += 1;

            let instant = date.and_time(time);
            if instant < self.start {
                // Earlier slot on the start day; the day itself is inclusive.
                continue;
            }
            return Some(instant);
        }

        None
    }
}
