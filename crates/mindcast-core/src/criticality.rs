//! Critical (transition) day detection.
//!
//! A day is critical for a cycle when the signal crosses zero between
//! yesterday and today, or when today's value sits within a near-zero
//! band. The width of that band is a parameter: the single-day view and
//! the forecast table have historically used different values
//! ([`TODAY_NEAR_ZERO_THRESHOLD`] and [`FORECAST_NEAR_ZERO_THRESHOLD`]),
//! and both are kept.

use chrono::NaiveDate;

/// Near-zero band used by the single-day view.
pub const TODAY_NEAR_ZERO_THRESHOLD: f64 = 0.05;

/// Near-zero band used by the multi-day forecast table.
pub const FORECAST_NEAR_ZERO_THRESHOLD: f64 = 0.01;

/// Whether `prev → curr` touches or crosses zero.
///
/// A zero on either side counts as part of the crossing.
pub fn crosses_zero(prev: f64, curr: f64) -> bool {
    (prev <= 0.0 && curr > 0.0) || (prev >= 0.0 && curr < 0.0)
}

/// Whether today is a transition day for one cycle.
pub fn is_critical(prev: f64, curr: f64, near_zero_threshold: f64) -> bool {
    crosses_zero(prev, curr) || curr.abs() < near_zero_threshold
}

/// Dates where a sampled series touches or crosses zero.
///
/// For each consecutive pair of samples: an exact zero on the earlier
/// sample marks the earlier date, an exact zero on the later sample marks
/// the later date, and a strict sign change marks the later date. The
/// result is ascending and free of duplicates.
pub fn zero_crossings(series: &[(NaiveDate, f64)]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = series
        .windows(2)
        .filter_map(|pair| {
            let (prev_date, prev) = pair[0];
            let (curr_date, curr) = pair[1];
            if prev == 0.0 {
                Some(prev_date)
            } else if curr == 0.0 || (prev < 0.0 && curr > 0.0) || (prev > 0.0 && curr < 0.0) {
                Some(curr_date)
            } else {
                None
            }
        })
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_crossing_cases_trigger() {
        assert!(is_critical(-1.0, 0.01, 0.0));
        assert!(is_critical(0.0, -0.01, 0.0));
        assert!(is_critical(-0.5, 0.5, 0.0));
    }

    #[test]
    fn test_same_sign_does_not_trigger() {
        assert!(!is_critical(0.5, 0.6, TODAY_NEAR_ZERO_THRESHOLD));
        assert!(!is_critical(-0.5, -0.6, TODAY_NEAR_ZERO_THRESHOLD));
    }

    #[test]
    fn test_sign_symmetry() {
        for (prev, curr) in [(-1.0, 0.01), (0.0, -0.01), (-0.5, 0.5), (0.5, 0.6), (0.3, -0.2)] {
            assert_eq!(
                is_critical(prev, curr, 0.01),
                is_critical(-prev, -curr, 0.01)
            );
        }
    }

    #[test]
    fn test_zero_to_zero_is_not_a_crossing() {
        assert!(!crosses_zero(0.0, 0.0));
        // but sits in the near-zero band
        assert!(is_critical(0.0, 0.0, FORECAST_NEAR_ZERO_THRESHOLD));
    }

    #[test]
    fn test_near_zero_threshold_is_a_parameter() {
        // 0.03 is near zero for the single-day view only
        assert!(is_critical(0.1, 0.03, TODAY_NEAR_ZERO_THRESHOLD));
        assert!(!is_critical(0.1, 0.03, FORECAST_NEAR_ZERO_THRESHOLD));
    }

    #[test]
    fn test_zero_crossings_marks_sign_change_on_later_date() {
        let series = vec![(day(1), 0.4), (day(2), 0.1), (day(3), -0.2), (day(4), -0.5)];
        assert_eq!(zero_crossings(&series), vec![day(3)]);
    }

    #[test]
    fn test_zero_crossings_exact_zero_marks_that_date_once() {
        let series = vec![(day(1), -0.3), (day(2), 0.0), (day(3), 0.3)];
        // pair (1,2) marks day 2 via curr == 0, pair (2,3) marks day 2 via prev == 0
        assert_eq!(zero_crossings(&series), vec![day(2)]);
    }

    #[test]
    fn test_zero_crossings_short_series() {
        assert!(zero_crossings(&[]).is_empty());
        assert!(zero_crossings(&[(day(1), 0.0)]).is_empty());
    }
}
