use crate::milestones::MilestoneSet;
use crate::models::{DateRange, ProgressSnapshot, UnitDescriptor};
use chrono::{Duration, NaiveDate};

/// Lazily yields one descriptor per day of the range.
///
/// Cloning the iterator restarts it from wherever the clone was taken, so a
/// fresh `build_grid` call always replays the full sequence.
#[derive(Debug, Clone)]
pub struct GridUnits<'a> {
    first_day: NaiveDate,
    snapshot: &'a ProgressSnapshot,
    milestones: &'a MilestoneSet,
    next: u32,
}

pub fn build_grid<'a>(
    range: &DateRange,
    snapshot: &'a ProgressSnapshot,
    milestones: &'a MilestoneSet,
) -> GridUnits<'a> {
    GridUnits {
        first_day: range.start.date(),
        snapshot,
        milestones,
        next: 0,
    }
}

impl Iterator for GridUnits<'_> {
    type Item = UnitDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        if index >= self.snapshot.total_units {
            return None;
        }
        self.next += 1;

        let date = self.first_day + Duration::days(i64::from(index));
        let elapsed = self.snapshot.elapsed_units;
        let is_current = index == elapsed && elapsed < self.snapshot.total_units;

        Some(UnitDescriptor {
            index,
            date,
            label: date.format("%d/%m/%Y").to_string(),
            is_filled: index < elapsed,
            is_current,
            is_milestone: self.milestones.contains(index),
            current_fraction: is_current.then_some(self.snapshot.current_unit_fraction),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.snapshot.total_units.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridUnits<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::select_milestones;
    use crate::progress::compute_progress;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn march_range() -> DateRange {
        DateRange {
            start: at(2026, 3, 1, 0),
            end: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            title: "Countdown".to_string(),
        }
    }

    #[test]
    fn grid_marks_filled_current_and_milestones() {
        let range = march_range();
        let snapshot = compute_progress(range.start, range.end, at(2026, 3, 4, 6));
        let milestones = select_milestones(snapshot.total_units);
        let units: Vec<_> = build_grid(&range, &snapshot, &milestones).collect();

        assert_eq!(units.len(), 10);
        assert_eq!(units.iter().filter(|u| u.is_filled).count(), 3);

        let current: Vec<_> = units.iter().filter(|u| u.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].index, 3);
        assert_eq!(current[0].label, "04/03/2026");
        assert_eq!(current[0].current_fraction, Some(0.25));
        assert!(units.iter().filter(|u| !u.is_current).all(|u| u.current_fraction.is_none()));

        let marked: Vec<_> = units.iter().filter(|u| u.is_milestone).map(|u| u.index).collect();
        assert_eq!(marked, vec![2, 4, 7]);

        assert_eq!(units[9].date, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn completed_range_has_no_current_unit() {
        let range = march_range();
        let snapshot = compute_progress(range.start, range.end, at(2026, 4, 1, 0));
        let milestones = select_milestones(snapshot.total_units);
        let grid = build_grid(&range, &snapshot, &milestones);

        assert_eq!(grid.len(), 10);
        let units: Vec<_> = grid.collect();
        assert!(units.iter().all(|u| u.is_filled && !u.is_current));
    }

    #[test]
    fn clones_replay_the_same_sequence() {
        let range = march_range();
        let snapshot = compute_progress(range.start, range.end, at(2026, 3, 8, 20));
        let milestones = select_milestones(snapshot.total_units);
        let grid = build_grid(&range, &snapshot, &milestones);

        let first: Vec<_> = grid.clone().collect();
        let second: Vec<_> = grid.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn size_hint_shrinks_as_units_are_consumed() {
        let range = march_range();
        let snapshot = compute_progress(range.start, range.end, at(2026, 3, 1, 0));
        let milestones = select_milestones(snapshot.total_units);
        let mut grid = build_grid(&range, &snapshot, &milestones);

        grid.next();
        grid.next();
        assert_eq!(grid.len(), 8);
    }
}
