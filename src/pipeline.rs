use crate::grid::build_grid;
use crate::milestones::select_milestones;
use crate::models::{
    DateRange, ExportSnapshot, ProgressSnapshot, ProgressStatus, RangeQuery, RenderState,
    SharePayload,
};
use crate::progress::compute_progress;
use crate::range::resolve_range;
use chrono::NaiveDateTime;
use tracing::warn;

pub fn render_for_query(query: &RangeQuery, default_year: i32, now: NaiveDateTime) -> RenderState {
    let range = resolve_range(query, default_year);
    build_render_state(&range, now)
}

/// Runs one full recomputation for `range` at `now`.
pub fn build_render_state(range: &DateRange, now: NaiveDateTime) -> RenderState {
    let progress = compute_progress(range.start, range.end, now);
    if progress.degenerate {
        warn!(
            start = %range.start,
            end = %range.end,
            "range ends before it starts, clamping to a single day"
        );
    }

    let milestones = select_milestones(progress.total_units);
    let units = build_grid(range, &progress, &milestones).collect();

    RenderState {
        title: range.title.clone(),
        percent_label: format!("{:.2}%", progress.percent),
        remaining_label: plural(progress.remaining_units, "day", "left"),
        range_label: format!(
            "{} to {}",
            range.start.format("%d/%m/%Y"),
            range.end.format("%d/%m/%Y")
        ),
        day_label: day_label(&progress),
        weeks_label: plural(progress.remaining_units.div_ceil(7), "week", "left"),
        milestones: milestones.iter().collect(),
        units,
        progress,
    }
}

pub fn export_snapshot(state: &RenderState) -> ExportSnapshot {
    ExportSnapshot {
        title: state.title.clone(),
        percent_label: state.percent_label.clone(),
        elapsed_units: state.progress.elapsed_units,
        remaining_units: state.progress.remaining_units,
        total_units: state.progress.total_units,
        range_label: state.range_label.clone(),
        milestones: state.milestones.clone(),
        current_unit_index: state.progress.current_unit_index,
        current_unit_fraction: state.progress.current_unit_fraction,
    }
}

pub fn share_payload(state: &RenderState, url: String) -> SharePayload {
    SharePayload {
        title: state.title.clone(),
        text: format!(
            "{}: {} complete, {}.",
            state.title, state.percent_label, state.remaining_label
        ),
        url,
    }
}

fn day_label(progress: &ProgressSnapshot) -> String {
    let day = match progress.status {
        ProgressStatus::NotStarted => 0,
        ProgressStatus::Complete => progress.total_units,
        ProgressStatus::InProgress => progress.elapsed_units + 1,
    };
    format!("Day {day} of {}", progress.total_units)
}

fn plural(count: u32, unit: &str, suffix: &str) -> String {
    if count == 1 {
        format!("{count} {unit} {suffix}")
    } else {
        format!("{count} {unit}s {suffix}")
    }
}
