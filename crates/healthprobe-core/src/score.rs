//! Shared score normalization policy.
//!
//! Every probe reduces its raw measurement to an integer health score in
//! `[0, 100]`, or [`UNKNOWN_SCORE`] when the measurement could not be taken.
//! The sentinel is distinct from a legitimate score of 0: a failed
//! measurement must never silently become "perfectly unhealthy".
//!
//! Normalization shape, identical for all probes:
//!
//! ```text
//! score = round(100 * clamp(raw / baseline, 0, 1))
//! ```
//!
//! Clamping happens before rounding, so a raw value at or above its baseline
//! always yields exactly 100, never more.

/// Sentinel meaning "measurement unavailable". Callers must treat any
/// negative score as unknown, never as a magnitude.
pub const UNKNOWN_SCORE: i32 = -1;

/// True if `score` is a real measurement (not the unknown sentinel).
pub fn is_known(score: i32) -> bool {
    score >= 0
}

/// Normalize a raw measurement against a fixed baseline.
///
/// Returns [`UNKNOWN_SCORE`] for non-finite input or a non-positive
/// baseline; otherwise `round(100 * clamp(raw/baseline, 0, 1))`.
pub fn normalize(raw: f64, baseline: f64) -> i32 {
    if !raw.is_finite() || !baseline.is_finite() || baseline <= 0.0 {
        return UNKNOWN_SCORE;
    }
    let ratio = (raw / baseline).clamp(0.0, 1.0);
    (ratio * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_baseline_is_100() {
        assert_eq!(normalize(200.0, 200.0), 100);
    }

    #[test]
    fn above_baseline_saturates_at_100() {
        assert_eq!(normalize(5_000.0, 200.0), 100);
        assert_eq!(normalize(f64::MAX, 1.0), 100);
    }

    #[test]
    fn half_baseline_is_50() {
        assert_eq!(normalize(100.0, 200.0), 50);
    }

    #[test]
    fn zero_raw_is_zero_not_sentinel() {
        assert_eq!(normalize(0.0, 200.0), 0);
    }

    #[test]
    fn negative_raw_clamps_to_zero() {
        assert_eq!(normalize(-3.0, 200.0), 0);
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(normalize(95.4, 100.0), 95);
        assert_eq!(normalize(95.6, 100.0), 96);
        // Exact tie (2.5/4 = 62.5) rounds away from zero.
        assert_eq!(normalize(2.5, 4.0), 63);
    }

    #[test]
    fn bad_baseline_is_unknown() {
        assert_eq!(normalize(1.0, 0.0), UNKNOWN_SCORE);
        assert_eq!(normalize(1.0, -5.0), UNKNOWN_SCORE);
        assert_eq!(normalize(1.0, f64::NAN), UNKNOWN_SCORE);
    }

    #[test]
    fn non_finite_raw_is_unknown() {
        assert_eq!(normalize(f64::NAN, 100.0), UNKNOWN_SCORE);
        assert_eq!(normalize(f64::INFINITY, 100.0), UNKNOWN_SCORE);
    }

    #[test]
    fn is_known_predicate() {
        assert!(is_known(0));
        assert!(is_known(100));
        assert!(!is_known(UNKNOWN_SCORE));
        assert!(!is_known(-7));
    }
}
