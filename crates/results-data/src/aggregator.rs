//! Solve-rate aggregation over (method, x) groups.

use std::collections::{BTreeMap, HashSet};

use results_core::models::ResultRow;
use results_core::stats::{effective_sample_size, WilsonInterval};
use tracing::debug;

// ── GroupStats ────────────────────────────────────────────────────────────────

/// Trial count and outcome total accumulated for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupStats {
    /// Number of result rows in the group.
    pub count: u64,
    /// Sum of the rows' outcomes.
    pub solved: f64,
}

impl GroupStats {
    /// Add a single trial outcome to the running totals.
    pub fn add_outcome(&mut self, solved: f64) {
        self.count += 1;
        self.solved += solved;
    }

    /// Empirical solve rate; `0.0` for an empty group.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.solved / self.count as f64).clamp(0.0, 1.0)
    }

    /// Wilson interval of the solve rate, using the episode-scaled sample size.
    pub fn interval(&self, confidence: f64) -> WilsonInterval {
        WilsonInterval::compute(self.mean(), effective_sample_size(self.count), confidence)
    }
}

// ── AggregatedGroup ───────────────────────────────────────────────────────────

/// All rows sharing one method and one independent-variable value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedGroup {
    pub method: String,
    /// Value of the independent variable (horizon or delay).
    pub x: i64,
    pub stats: GroupStats,
}

// ── SolveRateAggregator ───────────────────────────────────────────────────────

/// Stateless helper that groups result rows.
pub struct SolveRateAggregator;

impl SolveRateAggregator {
    /// Group `rows` by `(method, x_of(row))`.
    ///
    /// Rows whose `x` or outcome is missing are left out. Returns groups
    /// sorted by method, then by ascending `x`.
    pub fn group_by<'a>(
        rows: impl IntoIterator<Item = &'a ResultRow>,
        x_of: impl Fn(&ResultRow) -> Option<i64>,
    ) -> Vec<AggregatedGroup> {
        // BTreeMap keeps keys sorted.
        let mut map: BTreeMap<(String, i64), GroupStats> = BTreeMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let (Some(x), Some(solved)) = (x_of(row), row.solved) else {
                skipped += 1;
                continue;
            };
            map.entry((row.method.clone(), x))
                .or_default()
                .add_outcome(solved);
        }

        if skipped > 0 {
            debug!("Skipped {} rows with missing values while grouping", skipped);
        }

        map.into_iter()
            .map(|((method, x), stats)| AggregatedGroup { method, x, stats })
            .collect()
    }

    /// Distinct method values in order of first appearance.
    pub fn distinct_methods(rows: &[ResultRow]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        rows.iter()
            .filter(|row| seen.insert(row.method.as_str()))
            .map(|row| row.method.clone())
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn row(method: &str, delay: i64, horizon: i64, solved: bool) -> ResultRow {
        ResultRow::new(method, delay, horizon, solved)
    }

    // ── GroupStats ────────────────────────────────────────────────────────────

    #[test]
    fn test_group_stats_mean() {
        let mut stats = GroupStats::default();
        for solved in [1.0, 1.0, 0.0, 1.0] {
            stats.add_outcome(solved);
        }

        assert_eq!(stats.count, 4);
        assert!((stats.mean() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_group_stats_fractional_outcomes() {
        let mut stats = GroupStats::default();
        stats.add_outcome(0.5);
        stats.add_outcome(1.0);

        assert!((stats.mean() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_group_stats_empty() {
        let stats = GroupStats::default();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.interval(0.95), WilsonInterval::EMPTY);
    }

    #[test]
    fn test_group_stats_interval_uses_episode_scaling() {
        let mut stats = GroupStats::default();
        for i in 0..10 {
            stats.add_outcome(if i % 2 == 0 { 1.0 } else { 0.0 });
        }

        let scaled = stats.interval(0.95);
        let unscaled = WilsonInterval::compute(0.5, 10.0, 0.95);
        let expected = WilsonInterval::compute(0.5, 10_240.0, 0.95);

        assert_eq!(scaled, expected);
        assert!(scaled.width() < unscaled.width());
    }

    // ── group_by ──────────────────────────────────────────────────────────────

    #[test]
    fn test_group_by_method_and_x() {
        let rows = vec![
            row("vlash", 1, 3, true),
            row("naive", 1, 1, false),
            row("vlash", 1, 1, true),
            row("vlash", 1, 3, false),
            row("naive", 1, 1, true),
        ];

        let groups = SolveRateAggregator::group_by(&rows, |r| r.execute_horizon);
        let keys: Vec<(&str, i64, u64)> = groups
            .iter()
            .map(|g| (g.method.as_str(), g.x, g.stats.count))
            .collect();

        assert_eq!(keys, vec![("naive", 1, 2), ("vlash", 1, 1), ("vlash", 3, 2)]);
    }

    #[test]
    fn test_group_by_counts_sum_to_rows() {
        let rows: Vec<ResultRow> = (0..37)
            .map(|i| row(["a", "b", "c"][i % 3], (i % 5) as i64, 1, i % 4 == 0))
            .collect();

        let groups = SolveRateAggregator::group_by(&rows, |r| r.delay);
        let total: u64 = groups.iter().map(|g| g.stats.count).sum();

        assert_eq!(total, 37);
        assert!(groups.iter().all(|g| (0.0..=1.0).contains(&g.stats.mean())));
    }

    #[test]
    fn test_group_by_x_ascending_within_method() {
        let rows = vec![
            row("oracle", 4, 4, true),
            row("oracle", 0, 1, true),
            row("oracle", 2, 2, true),
        ];

        let groups = SolveRateAggregator::group_by(&rows, |r| r.delay);
        let xs: Vec<i64> = groups.iter().map(|g| g.x).collect();

        assert_eq!(xs, vec![0, 2, 4]);
    }

    #[test]
    fn test_group_by_skips_missing_values() {
        let mut no_outcome = row("vlash", 1, 2, true);
        no_outcome.solved = None;
        let mut no_delay = row("vlash", 1, 2, true);
        no_delay.delay = None;
        let rows = vec![row("vlash", 1, 2, true), no_outcome, no_delay];

        let groups = SolveRateAggregator::group_by(&rows, |r| r.delay);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].stats.count, 1);
    }

    #[test]
    fn test_group_by_empty() {
        let groups = SolveRateAggregator::group_by(&[], |r| r.delay);
        assert!(groups.is_empty());
    }

    // ── distinct_methods ──────────────────────────────────────────────────────

    #[test]
    fn test_distinct_methods_first_appearance_order() {
        let rows = vec![
            row("naive", 1, 1, true),
            row("vlash", 1, 1, true),
            row("naive", 2, 2, true),
            row("oracle", 0, 1, true),
        ];

        assert_eq!(
            SolveRateAggregator::distinct_methods(&rows),
            vec!["naive", "vlash", "oracle"]
        );
    }
}
