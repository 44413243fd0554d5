//! Shared windowing and grouping helpers.
//!
//! # Overview
//!
//! Every rule that buckets or windows snapshots goes through these
//! functions, so day/month boundaries and percentage arithmetic are decided
//! in exactly one place:
//!
//! - [`group_by_calendar_day`] / [`group_by_calendar_month`]: counts per
//!   local calendar bucket of a chosen timestamp.
//! - [`ratio`]: percentage with a zero-denominator guard.
//! - [`is_within`]: trailing window test with an inclusive lower bound.
//! - [`longest_consecutive_month_streak`] and [`trailing_months`]: month
//!   arithmetic for continuity rules.
//!
//! Calendar bucketing is done in a caller-supplied [`FixedOffset`] zone.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeDelta, Utc};
use kudos_core::model::TaskSnapshot;

// ---------------------------------------------------------------------------
// Month keys
// ---------------------------------------------------------------------------

/// A calendar `(year, month)` pair, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month (January = 1).
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Month containing `instant` when viewed in `zone`.
    #[must_use]
    pub fn of_instant(instant: DateTime<Utc>, zone: FixedOffset) -> Self {
        Self::of_date(local_date(instant, zone))
    }

    #[must_use]
    pub const fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month <= 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Selector for the approval instant, the timestamp most rules bucket on.
#[must_use]
pub const fn approved_at(snapshot: &TaskSnapshot) -> Option<DateTime<Utc>> {
    snapshot.approved_at
}

/// Calendar date of `instant` in `zone`.
#[must_use]
pub fn local_date(instant: DateTime<Utc>, zone: FixedOffset) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// Count snapshots per local calendar day of the selected timestamp.
///
/// Snapshots whose selector yields `None` are skipped. Two instants less
/// than a second apart still land in different groups when they straddle
/// local midnight.
pub fn group_by_calendar_day<'a, I, F>(
    snapshots: I,
    selector: F,
    zone: FixedOffset,
) -> BTreeMap<NaiveDate, usize>
where
    I: IntoIterator<Item = &'a TaskSnapshot>,
    F: Fn(&TaskSnapshot) -> Option<DateTime<Utc>>,
{
    let mut buckets = BTreeMap::new();
    for instant in snapshots.into_iter().filter_map(selector) {
        *buckets.entry(local_date(instant, zone)).or_insert(0) += 1;
    }
    buckets
}

/// Count snapshots per local `(year, month)` of the selected timestamp.
pub fn group_by_calendar_month<'a, I, F>(
    snapshots: I,
    selector: F,
    zone: FixedOffset,
) -> BTreeMap<MonthKey, usize>
where
    I: IntoIterator<Item = &'a TaskSnapshot>,
    F: Fn(&TaskSnapshot) -> Option<DateTime<Utc>>,
{
    let mut buckets = BTreeMap::new();
    for instant in snapshots.into_iter().filter_map(selector) {
        *buckets.entry(MonthKey::of_instant(instant, zone)).or_insert(0) += 1;
    }
    buckets
}

/// Size of the fullest bucket, or 0 when there are no buckets.
#[must_use]
pub fn max_bucket<K>(buckets: &BTreeMap<K, usize>) -> usize {
    buckets.values().copied().max().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// `numerator / denominator * 100`, or 0 when `denominator` is 0.
///
/// The multiplication happens first so integral percentages are exact
/// (`ratio(90, 100) == 90.0`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 * 100.0 / denominator as f64
}

/// True when `reference - window <= instant`.
///
/// The window start itself is inside; there is no upper bound. A window
/// reaching past the representable range includes everything.
#[must_use]
pub fn is_within(instant: DateTime<Utc>, reference: DateTime<Utc>, window: TimeDelta) -> bool {
    reference
        .checked_sub_signed(window)
        .is_none_or(|start| start <= instant)
}

// ---------------------------------------------------------------------------
// Month runs
// ---------------------------------------------------------------------------

/// Length of the longest run of consecutive months present in `months`.
///
/// Returns 0 for an empty set. A single missing month breaks the run;
/// December to January of the next year is consecutive.
#[must_use]
pub fn longest_consecutive_month_streak(months: &BTreeSet<MonthKey>) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<MonthKey> = None;

    for &month in months {
        current = match previous {
            Some(prev) if prev.next() == month => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(month);
    }

    longest
}

/// The `count` months ending with (and including) `last`, oldest first.
#[must_use]
pub fn trailing_months(last: MonthKey, count: usize) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(count);
    let mut cursor = last;
    for _ in 0..count {
        months.push(cursor);
        cursor = cursor.prev();
    }
    months.reverse();
    months
}
