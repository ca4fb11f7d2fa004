use serde::Serialize;
use std::collections::BTreeSet;

const QUARTERS: [f64; 3] = [0.25, 0.50, 0.75];

/// Unit indices that mark the 25/50/75% points of a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MilestoneSet(BTreeSet<u32>);

impl MilestoneSet {
    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

pub fn select_milestones(total_units: u32) -> MilestoneSet {
    let total = total_units.max(1);
    let last = i64::from(total) - 1;
    MilestoneSet(
        QUARTERS
            .iter()
            .map(|fraction| {
                let index = (f64::from(total) * fraction).round() as i64 - 1;
                index.clamp(0, last) as u32
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(total: u32) -> Vec<u32> {
        select_milestones(total).iter().collect()
    }

    #[test]
    fn full_year_quarters() {
        assert_eq!(indices(365), vec![90, 182, 273]);
        assert_eq!(indices(366), vec![91, 182, 274]);
    }

    #[test]
    fn small_ranges_collapse_duplicates() {
        assert_eq!(indices(1), vec![0]);
        assert_eq!(indices(2), vec![0, 1]);
        assert_eq!(indices(4), vec![0, 1, 2]);
        assert_eq!(indices(10), vec![2, 4, 7]);
    }

    #[test]
    fn zero_is_treated_as_one_unit() {
        assert_eq!(indices(0), vec![0]);
    }

    #[test]
    fn indices_stay_in_range() {
        for total in 1..=800 {
            let set = select_milestones(total);
            assert!(!set.is_empty() && set.len() <= 3, "total {total}");
            assert!(set.iter().all(|index| index < total), "total {total}");
        }
    }
}
