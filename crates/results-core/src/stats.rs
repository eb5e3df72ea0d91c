//! Binomial proportion statistics used when plotting solve rates.
//!
//! Everything here is a pure function of its arguments.

/// Number of underlying episodes every result row already aggregates.
///
/// The evaluation process reports one row per batch of 1024 vectorised
/// episodes, so the effective sample size of a group is `count * 1024`.
/// Nothing in the CSV records this; it must match the upstream evaluator.
pub const EPISODES_PER_TRIAL: u64 = 1024;

/// Default two-sided confidence level for solve-rate bands.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

// ── Inverse normal CDF ────────────────────────────────────────────────────────

const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];

const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];

const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];

const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Breakpoint between the tail and central rational approximations.
const P_LOW: f64 = 0.02425;

/// Quantile function of the standard normal distribution.
///
/// Uses Acklam's rational approximation (relative error below 1.2e-9).
/// Returns `-inf` for `p <= 0`, `+inf` for `p >= 1` and `NaN` for `NaN`.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        tail_quantile(p)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let [a0, a1, a2, a3, a4, a5] = ACKLAM_A;
        let [b0, b1, b2, b3, b4] = ACKLAM_B;
        (((((a0 * r + a1) * r + a2) * r + a3) * r + a4) * r + a5) * q
            / (((((b0 * r + b1) * r + b2) * r + b3) * r + b4) * r + 1.0)
    } else {
        -tail_quantile(1.0 - p)
    }
}

/// Lower-tail branch; `p` must lie in `(0, P_LOW)`.
fn tail_quantile(p: f64) -> f64 {
    let q = (-2.0 * p.ln()).sqrt();
    let [c0, c1, c2, c3, c4, c5] = ACKLAM_C;
    let [d0, d1, d2, d3] = ACKLAM_D;
    (((((c0 * q + c1) * q + c2) * q + c3) * q + c4) * q + c5)
        / ((((d0 * q + d1) * q + d2) * q + d3) * q + 1.0)
}

// ── Wilson score interval ─────────────────────────────────────────────────────

/// A two-sided Wilson score interval for a binomial proportion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilsonInterval {
    /// Lower bound, clamped to `0.0`.
    pub lower: f64,
    /// Wilson centre, the midpoint before clamping.
    pub center: f64,
    /// Upper bound, clamped to `1.0`.
    pub upper: f64,
}

impl WilsonInterval {
    /// The degenerate interval returned for an empty sample.
    pub const EMPTY: WilsonInterval = WilsonInterval {
        lower: 0.0,
        center: 0.0,
        upper: 0.0,
    };

    /// Compute the interval for observed proportion `p_hat` over an
    /// effective sample size `n` at the given two-sided `confidence`.
    ///
    /// `p_hat` is expected in `[0, 1]` and `confidence` in `(0, 1)`.
    /// An `n` of zero (or below) yields [`WilsonInterval::EMPTY`].
    pub fn compute(p_hat: f64, n: f64, confidence: f64) -> Self {
        if n <= 0.0 {
            return Self::EMPTY;
        }

        let z = inverse_normal_cdf((1.0 + confidence) / 2.0);
        let z2 = z * z;

        let denom = 1.0 + z2 / n;
        let center = (p_hat + z2 / (2.0 * n)) / denom;
        let margin = z * ((p_hat * (1.0 - p_hat) + z2 / (4.0 * n)) / n).sqrt() / denom;

        WilsonInterval {
            lower: (center - margin).max(0.0),
            center,
            upper: (center + margin).min(1.0),
        }
    }

    /// Distance between the bounds.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Convenience wrapper returning only `(lower, upper)`.
pub fn wilson_interval(p_hat: f64, n: f64, confidence: f64) -> (f64, f64) {
    let interval = WilsonInterval::compute(p_hat, n, confidence);
    (interval.lower, interval.upper)
}

/// Effective sample size of a group of `trials` result rows.
pub fn effective_sample_size(trials: u64) -> f64 {
    (trials * EPISODES_PER_TRIAL) as f64
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── inverse_normal_cdf ────────────────────────────────────────────────────

    #[test]
    fn test_inverse_normal_cdf_median_is_zero() {
        assert!(inverse_normal_cdf(0.5).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_normal_cdf_known_quantiles() {
        // Reference values from standard normal tables.
        assert!((inverse_normal_cdf(0.975) - 1.959_963_985).abs() < 1e-6);
        assert!((inverse_normal_cdf(0.95) - 1.644_853_627).abs() < 1e-6);
        assert!((inverse_normal_cdf(0.995) - 2.575_829_304).abs() < 1e-6);
        assert!((inverse_normal_cdf(0.841_344_746) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_normal_cdf_tail_branch() {
        // p = 0.01 lies below P_LOW and exercises the tail approximation.
        assert!((inverse_normal_cdf(0.01) + 2.326_347_874).abs() < 1e-6);
        assert!((inverse_normal_cdf(0.99) - 2.326_347_874).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_normal_cdf_is_antisymmetric() {
        for &p in &[0.001, 0.02, 0.1, 0.3, 0.45] {
            let lo = inverse_normal_cdf(p);
            let hi = inverse_normal_cdf(1.0 - p);
            assert!((lo + hi).abs() < 1e-9, "p = {p}: {lo} vs {hi}");
        }
    }

    #[test]
    fn test_inverse_normal_cdf_is_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for i in 1..1000 {
            let z = inverse_normal_cdf(i as f64 / 1000.0);
            assert!(z > prev, "not increasing at {i}");
            prev = z;
        }
    }

    #[test]
    fn test_inverse_normal_cdf_out_of_domain() {
        assert_eq!(inverse_normal_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(-0.5), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0), f64::INFINITY);
        assert!(inverse_normal_cdf(f64::NAN).is_nan());
    }

    // ── WilsonInterval ────────────────────────────────────────────────────────

    #[test]
    fn test_wilson_empty_sample_is_exactly_zero() {
        assert_eq!(wilson_interval(0.5, 0.0, 0.95), (0.0, 0.0));
        assert_eq!(
            WilsonInterval::compute(0.9, 0.0, 0.95),
            WilsonInterval::EMPTY
        );
    }

    #[test]
    fn test_wilson_bounds_are_ordered() {
        for &n in &[1.0, 5.0, 1024.0, 51_200.0] {
            for i in 0..=20 {
                let p = i as f64 / 20.0;
                let ci = WilsonInterval::compute(p, n, DEFAULT_CONFIDENCE);
                assert!(0.0 <= ci.lower, "p={p} n={n}: {ci:?}");
                assert!(ci.lower <= ci.center, "p={p} n={n}: {ci:?}");
                assert!(ci.center <= ci.upper, "p={p} n={n}: {ci:?}");
                assert!(ci.upper <= 1.0, "p={p} n={n}: {ci:?}");
            }
        }
    }

    #[test]
    fn test_wilson_contains_observed_proportion() {
        for i in 0..=10 {
            let p = i as f64 / 10.0;
            let ci = WilsonInterval::compute(p, 30.0, DEFAULT_CONFIDENCE);
            assert!(ci.lower <= p + 1e-12 && p <= ci.upper + 1e-12);
        }
    }

    #[test]
    fn test_wilson_symmetric_under_complement() {
        for &n in &[3.0, 100.0, 10_240.0] {
            for &p in &[0.0, 0.05, 0.2, 0.5, 0.73, 1.0] {
                let (lower, _) = wilson_interval(p, n, DEFAULT_CONFIDENCE);
                let (_, upper_c) = wilson_interval(1.0 - p, n, DEFAULT_CONFIDENCE);
                assert!(
                    (lower - (1.0 - upper_c)).abs() < 1e-12,
                    "p={p} n={n}: {lower} vs {}",
                    1.0 - upper_c
                );
            }
        }
    }

    #[test]
    fn test_wilson_large_sample_is_narrow() {
        let n = effective_sample_size(50);
        assert_eq!(n, 51_200.0);
        let ci = WilsonInterval::compute(0.85, n, DEFAULT_CONFIDENCE);
        assert!(ci.width() < 0.01, "width = {}", ci.width());
        assert!((ci.center - 0.85).abs() < 1e-3);
        assert!(ci.lower < 0.85 && 0.85 < ci.upper);
    }

    #[test]
    fn test_wilson_zero_proportion_keeps_positive_upper() {
        let (lower, upper) = wilson_interval(0.0, 1024.0, DEFAULT_CONFIDENCE);
        assert_eq!(lower, 0.0);
        assert!(upper > 0.0);
    }

    #[test]
    fn test_wilson_unit_proportion_keeps_lower_below_one() {
        let (lower, upper) = wilson_interval(1.0, 1024.0, DEFAULT_CONFIDENCE);
        assert_eq!(upper, 1.0);
        assert!(lower < 1.0);
    }

    #[test]
    fn test_wilson_matches_reference_value() {
        // 80 successes out of 100 at 95%: [0.7111, 0.8666].
        let (lower, upper) = wilson_interval(0.8, 100.0, 0.95);
        assert!((lower - 0.7111).abs() < 1e-3, "lower = {lower}");
        assert!((upper - 0.8666).abs() < 1e-3, "upper = {upper}");
    }

    #[test]
    fn test_wilson_higher_confidence_is_wider() {
        let narrow = WilsonInterval::compute(0.6, 200.0, 0.90);
        let wide = WilsonInterval::compute(0.6, 200.0, 0.99);
        assert!(wide.width() > narrow.width());
    }

    #[test]
    fn test_wilson_is_deterministic() {
        let a = WilsonInterval::compute(0.37, 4096.0, 0.95);
        let b = WilsonInterval::compute(0.37, 4096.0, 0.95);
        assert_eq!(a, b);
    }
}
