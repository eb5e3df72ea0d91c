//! Row selection and per-method series for the two figure panels.
//!
//! Each panel keeps a subset of the merged rows, groups them by method and
//! one independent variable, and turns every group into a point with a
//! confidence band. The inclusion rules are plain predicates so they can be
//! checked row by row.

use results_core::methods::{method_style, MethodStyle, METHOD_STYLES};
use results_core::models::ResultRow;
use results_core::stats::WilsonInterval;
use tracing::debug;

use crate::aggregator::{AggregatedGroup, SolveRateAggregator};

/// Delay at which the execution-horizon sweep was run.
pub const HORIZON_SWEEP_DELAY: i64 = 1;

/// Horizon left out of the execution-horizon panel.
pub const EXCLUDED_HORIZON: i64 = 8;

/// Largest delay shown in the inference-delay panel.
pub const MAX_PLOTTED_DELAY: i64 = 4;

// ── Inclusion rules ───────────────────────────────────────────────────────────

/// Execution-horizon panel: fixed delay of 1, horizon 8 excluded.
///
/// Rows with a missing value never match.
pub fn horizon_panel_includes(row: &ResultRow) -> bool {
    match (row.delay, row.execute_horizon, row.solved) {
        (Some(delay), Some(horizon), Some(_)) => {
            delay == HORIZON_SWEEP_DELAY && horizon != EXCLUDED_HORIZON
        }
        _ => false,
    }
}

/// Horizon a delay-sweep run is expected to execute with.
pub fn expected_horizon(delay: i64) -> i64 {
    delay.max(1)
}

/// Inference-delay panel: delay at most 4 and the horizon matching the delay.
///
/// Rows with a missing value never match.
pub fn delay_panel_includes(row: &ResultRow) -> bool {
    match (row.delay, row.execute_horizon, row.solved) {
        (Some(delay), Some(horizon), Some(_)) => {
            delay <= MAX_PLOTTED_DELAY && horizon == expected_horizon(delay)
        }
        _ => false,
    }
}

// ── Panel ─────────────────────────────────────────────────────────────────────

/// The two side-by-side charts of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Solve rate against execution horizon.
    ExecutionHorizon,
    /// Solve rate against inference delay.
    InferenceDelay,
}

impl Panel {
    /// Left-to-right drawing order.
    pub const ALL: [Panel; 2] = [Panel::ExecutionHorizon, Panel::InferenceDelay];

    pub fn includes(&self, row: &ResultRow) -> bool {
        match self {
            Panel::ExecutionHorizon => horizon_panel_includes(row),
            Panel::InferenceDelay => delay_panel_includes(row),
        }
    }

    /// The independent variable plotted on this panel's x axis.
    pub fn x_value(&self, row: &ResultRow) -> Option<i64> {
        match self {
            Panel::ExecutionHorizon => row.execute_horizon,
            Panel::InferenceDelay => row.delay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::ExecutionHorizon => "execution-horizon",
            Panel::InferenceDelay => "inference-delay",
        }
    }

    /// Keep this panel's rows and group them by `(method, x)`.
    pub fn groups(&self, rows: &[ResultRow]) -> Vec<AggregatedGroup> {
        let incomplete = rows.iter().filter(|row| !row.is_complete()).count();
        if incomplete > 0 {
            debug!(
                "Dropping {} rows with missing values from the {} panel",
                incomplete,
                self.as_str()
            );
        }
        SolveRateAggregator::group_by(
            rows.iter().filter(|row| self.includes(row)),
            |row| self.x_value(row),
        )
    }
}

// ── Series ────────────────────────────────────────────────────────────────────

/// One plotted point: a group's solve rate and its confidence band.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub x: i64,
    pub mean: f64,
    pub count: u64,
    pub interval: WilsonInterval,
}

/// All points of one method on one panel, in ascending `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSeries {
    pub style: &'static MethodStyle,
    pub points: Vec<SeriesPoint>,
}

/// Build one series per styled method for `panel`, in style-table order.
///
/// Methods absent from `rows` are skipped, as are methods with no rows left
/// after the panel's filter. Methods without a style are never drawn.
pub fn build_panel_series(
    panel: Panel,
    rows: &[ResultRow],
    confidence: f64,
) -> Vec<MethodSeries> {
    let present: Vec<&'static MethodStyle> = SolveRateAggregator::distinct_methods(rows)
        .iter()
        .filter_map(|method| method_style(method))
        .collect();
    let groups = panel.groups(rows);

    let mut series = Vec::new();
    for style in METHOD_STYLES {
        if !present.iter().any(|p| p.key == style.key) {
            continue;
        }

        let points: Vec<SeriesPoint> = groups
            .iter()
            .filter(|group| group.method == style.key)
            .map(|group| SeriesPoint {
                x: group.x,
                mean: group.stats.mean(),
                count: group.stats.count,
                interval: group.stats.interval(confidence),
            })
            .collect();

        if points.is_empty() {
            debug!(
                "Method {} has no rows on the {} panel",
                style.key,
                panel.as_str()
            );
            continue;
        }

        series.push(MethodSeries { style, points });
    }

    series
}

/// Methods present in `rows` that have no entry in the style table.
pub fn unstyled_methods(rows: &[ResultRow]) -> Vec<String> {
    SolveRateAggregator::distinct_methods(rows)
        .into_iter()
        .filter(|method| method_style(method).is_none())
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
