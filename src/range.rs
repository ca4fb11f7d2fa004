use crate::models::{DateRange, RangeQuery};
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

pub const DEFAULT_YEAR: i32 = 2026;
pub const COUNTDOWN_TITLE: &str = "Countdown";

/// Custom ranges longer than this fall back like malformed input.
pub const MAX_RANGE_DAYS: i64 = 36_600;

/// Turns optional `year`/`from`/`to` parameters into a concrete range.
///
/// An explicit `from`/`to` pair wins, then `year`, then `default_year`.
/// Input that does not parse falls through to the next rule, so this never
/// fails.
pub fn resolve_range(query: &RangeQuery, default_year: i32) -> DateRange {
    if let Some(range) = custom_range(query) {
        return range;
    }

    if let Some(raw) = non_empty(query.year.as_deref()) {
        match parse_year(raw).and_then(year_range) {
            Some(range) => return range,
            None => debug!(year = raw, "ignoring malformed year parameter"),
        }
    }

    year_range(default_year).unwrap_or_else(|| {
        debug!(default_year, fallback = DEFAULT_YEAR, "default year out of range");
        year_range(DEFAULT_YEAR).expect("DEFAULT_YEAR is a valid calendar year")
    })
}

fn custom_range(query: &RangeQuery) -> Option<DateRange> {
    let from = non_empty(query.from.as_deref());
    let to = non_empty(query.to.as_deref());
    if from.is_none() && to.is_none() {
        return None;
    }

    let (Some(from_date), Some(to_date)) = (from.and_then(parse_date), to.and_then(parse_date))
    else {
        debug!(?from, ?to, "ignoring malformed from/to parameters");
        return None;
    };

    if (to_date - from_date).num_days().abs() > MAX_RANGE_DAYS {
        debug!(%from_date, %to_date, "ignoring oversized from/to range");
        return None;
    }

    Some(DateRange {
        start: from_date.and_time(NaiveTime::MIN),
        end: to_date.and_time(day_end()),
        title: COUNTDOWN_TITLE.to_string(),
    })
}

fn year_range(year: i32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(DateRange {
        start: first.and_time(NaiveTime::MIN),
        end: last.and_time(day_end()),
        title: format!("{year} in days"),
    })
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(year: Option<&str>, from: Option<&str>, to: Option<&str>) -> RangeQuery {
        RangeQuery {
            year: year.map(String::from),
            from: from.map(String::from),
            to: to.map(String::from),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn no_parameters_resolve_to_default_year() {
        let range = resolve_range(&RangeQuery::default(), DEFAULT_YEAR);
        assert_eq!(range.start, at(2026, 1, 1, 0, 0, 0));
        assert_eq!(range.end, at(2026, 12, 31, 23, 59, 59));
        assert_eq!(range.title, "2026 in days");
    }

    #[test]
    fn year_parameter_selects_that_year() {
        let range = resolve_range(&query(Some("2028"), None, None), DEFAULT_YEAR);
        assert_eq!(range.start, at(2028, 1, 1, 0, 0, 0));
        assert_eq!(range.end, at(2028, 12, 31, 23, 59, 59));
        assert_eq!(range.title, "2028 in days");
    }

    #[test]
    fn from_to_pair_takes_precedence_over_year() {
        let range = resolve_range(
            &query(Some("2030"), Some("2026-03-01"), Some("2026-03-10")),
            DEFAULT_YEAR,
        );
        assert_eq!(range.start, at(2026, 3, 1, 0, 0, 0));
        assert_eq!(range.end, at(2026, 3, 10, 23, 59, 59));
        assert_eq!(range.title, COUNTDOWN_TITLE);
    }

    #[test]
    fn malformed_from_with_empty_to_falls_back_to_default() {
        let range = resolve_range(&query(None, Some("2026-13-45"), Some("")), DEFAULT_YEAR);
        assert_eq!(range, resolve_range(&RangeQuery::default(), DEFAULT_YEAR));
    }

    #[test]
    fn malformed_pair_falls_through_to_year() {
        let range = resolve_range(&query(Some("2027"), Some("yesterday"), Some("2026-03-10")), DEFAULT_YEAR);
        assert_eq!(range.title, "2027 in days");
    }

    #[test]
    fn malformed_years_are_ignored() {
        for raw in ["26", "20266", "two", "-202", "2026a"] {
            let range = resolve_range(&query(Some(raw), None, None), 2031);
            assert_eq!(range.title, "2031 in days", "input {raw}");
        }
    }

    #[test]
    fn inverted_pair_is_kept_for_the_calculator() {
        let range = resolve_range(&query(None, Some("2026-03-10"), Some("2026-03-01")), DEFAULT_YEAR);
        assert_eq!(range.start, at(2026, 3, 10, 0, 0, 0));
        assert_eq!(range.end, at(2026, 3, 1, 23, 59, 59));
    }

    #[test]
    fn oversized_pair_falls_back() {
        let range = resolve_range(&query(None, Some("0001-01-01"), Some("9999-12-31")), DEFAULT_YEAR);
        assert_eq!(range.title, "2026 in days");
    }

    #[test]
    fn unrepresentable_default_year_uses_the_built_in_one() {
        let range = resolve_range(&RangeQuery::default(), 400_000);
        assert_eq!(range.title, "2026 in days");
        assert_eq!(range.start, at(2026, 1, 1, 0, 0, 0));
    }

    #[test]
    fn resolution_is_idempotent() {
        let q = query(Some("2029"), None, None);
        assert_eq!(resolve_range(&q, DEFAULT_YEAR), resolve_range(&q, DEFAULT_YEAR));
    }
}
