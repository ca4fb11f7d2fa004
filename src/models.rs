use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Raw range parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub year: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    /// Picks `year`, `from` and `to` out of decoded query pairs. The first
    /// occurrence of a repeated key wins and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "year" => &mut query.year,
                "from" => &mut query.from,
                "to" => &mut query.to,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub total_units: u32,
    pub elapsed_units: u32,
    pub remaining_units: u32,
    pub percent: f64,
    pub current_unit_index: Option<u32>,
    pub current_unit_fraction: f64,
    pub status: ProgressStatus,
    /// Set when the range ends before it starts; `total_units` is then 1.
    pub degenerate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDescriptor {
    pub index: u32,
    pub date: NaiveDate,
    pub label: String,
    pub is_filled: bool,
    pub is_current: bool,
    pub is_milestone: bool,
    pub current_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub title: String,
    pub percent_label: String,
    pub remaining_label: String,
    pub range_label: String,
    pub day_label: String,
    pub weeks_label: String,
    pub progress: ProgressSnapshot,
    pub milestones: Vec<u32>,
    pub units: Vec<UnitDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSnapshot {
    pub title: String,
    pub percent_label: String,
    pub elapsed_units: u32,
    pub remaining_units: u32,
    pub total_units: u32,
    pub range_label: String,
    pub milestones: Vec<u32>,
    pub current_unit_index: Option<u32>,
    pub current_unit_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}
