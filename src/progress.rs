use crate::models::{ProgressSnapshot, ProgressStatus};
use chrono::{NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Computes how far `now` is through the inclusive day range `start..=end`.
///
/// A day only counts as elapsed once it is completely over: at 23:00 on the
/// last day the final unit is still current, and the range completes the
/// instant after `end`.
pub fn compute_progress(
    start: NaiveDateTime,
    end: NaiveDateTime,
    now: NaiveDateTime,
) -> ProgressSnapshot {
    let span_days = (end.date() - start.date()).num_days() + 1;
    let degenerate = span_days <= 0;
    let total_units = u32::try_from(span_days.max(1)).unwrap_or(u32::MAX);

    let elapsed_units = if now < start {
        0
    } else if now > end {
        total_units
    } else {
        let days = (days_between(start, now).floor() as i64).max(0);
        u32::try_from(days).unwrap_or(u32::MAX).min(total_units)
    };
    let remaining_units = total_units - elapsed_units;

    let status = if now < start {
        ProgressStatus::NotStarted
    } else if elapsed_units == total_units {
        ProgressStatus::Complete
    } else {
        ProgressStatus::InProgress
    };

    ProgressSnapshot {
        total_units,
        elapsed_units,
        remaining_units,
        percent: round2(f64::from(elapsed_units) / f64::from(total_units) * 100.0),
        current_unit_index: (elapsed_units < total_units).then_some(elapsed_units),
        current_unit_fraction: day_fraction(now),
        status,
        degenerate,
    }
}

/// Share of the local calendar day containing `now` that has passed.
pub fn day_fraction(now: NaiveDateTime) -> f64 {
    let midnight = now.date().and_time(NaiveTime::MIN);
    days_between(midnight, now).clamp(0.0, 1.0)
}

fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
