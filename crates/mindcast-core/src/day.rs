//! Single-day aggregation.
//!
//! Evaluates every cycle for one date, flags transition days and
//! classifies each value, then derives the overall condition from the
//! mean of the three raw values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::criticality::{is_critical, TODAY_NEAR_ZERO_THRESHOLD};
use crate::cycle::{elapsed_days, round3, Cycle};
use crate::phase::{classify, OverallCondition, PhaseBand};

/// Result for one (cycle, date) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    pub cycle: Cycle,
    /// Signal value rounded to 3 decimals
    pub value: f64,
    pub band: PhaseBand,
    pub recommendation: String,
}

impl DayRow {
    pub fn is_critical(&self) -> bool {
        self.band == PhaseBand::Critical
    }
}

/// All cycles for one date plus the overall condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub elapsed_days: i64,
    pub rows: Vec<DayRow>,
    pub overall: OverallCondition,
}

impl DayAggregate {
    pub fn row(&self, cycle: Cycle) -> Option<&DayRow> {
        self.rows.iter().find(|r| r.cycle == cycle)
    }
}

/// Raw value of `cycle` at `elapsed` and whether that day is critical.
pub(crate) fn sample(cycle: Cycle, elapsed: i64, near_zero_threshold: f64) -> (f64, bool) {
    let today = cycle.value_at(elapsed);
    let yesterday = cycle.value_at(elapsed - 1);
    (today, is_critical(yesterday, today, near_zero_threshold))
}

/// Build a [`DayRow`] for `cycle` at `elapsed`, returning the raw value alongside.
pub(crate) fn day_row(cycle: Cycle, elapsed: i64, near_zero_threshold: f64) -> (DayRow, f64) {
    let (value, critical) = sample(cycle, elapsed, near_zero_threshold);
    let (band, text) = classify(cycle, value, critical);
    let row = DayRow {
        cycle,
        value: round3(value),
        band,
        recommendation: text.to_string(),
    };
    (row, value)
}

/// Aggregate `target` for someone born on `birth`, using the single-day
/// near-zero threshold.
///
/// No ordering between the dates is required; elapsed days may be negative.
pub fn aggregate_day(birth: NaiveDate, target: NaiveDate) -> DayAggregate {
    aggregate_day_with_threshold(birth, target, TODAY_NEAR_ZERO_THRESHOLD)
}

/// Same as [`aggregate_day`] with an explicit near-zero threshold.
pub fn aggregate_day_with_threshold(
    birth: NaiveDate,
    target: NaiveDate,
    near_zero_threshold: f64,
) -> DayAggregate {
    let elapsed = elapsed_days(birth, target);

    let mut rows = Vec::with_capacity(Cycle::ALL.len());
    let mut raw = Vec::with_capacity(Cycle::ALL.len());
    for cycle in Cycle::ALL {
        let (row, value) = day_row(cycle, elapsed, near_zero_threshold);
        tracing::debug!(
            cycle = %cycle,
            elapsed,
            value,
            band = %row.band,
            "evaluated cycle"
        );
        rows.push(row);
        raw.push(value);
    }

    DayAggregate {
        date: target,
        elapsed_days: elapsed,
        rows,
        overall: OverallCondition::from_values(&raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_is_critical_for_every_cycle() {
        let birth = date(2008, 1, 1);
        let day = aggregate_day(birth, birth);
        assert_eq!(day.elapsed_days, 0);
        assert_eq!(day.rows.len(), 3);
        for row in &day.rows {
            assert_eq!(row.value, 0.0);
            assert_eq!(row.band, PhaseBand::Critical);
        }
        assert_eq!(day.overall, OverallCondition::Steady);
    }

    #[test]
    fn test_one_physical_period_after_birth() {
        let day = aggregate_day(date(2000, 1, 1), date(2000, 1, 24));
        assert_eq!(day.elapsed_days, 23);

        let physical = day.row(Cycle::Physical).unwrap();
        assert_eq!(physical.value, 0.0);
        assert_eq!(physical.band, PhaseBand::Critical);

        let emotional = day.row(Cycle::Emotional).unwrap();
        assert_eq!(emotional.value, -0.901);
        assert_eq!(emotional.band, PhaseBand::StrongNegative);

        let intellectual = day.row(Cycle::Intellectual).unwrap();
        assert_eq!(intellectual.value, -0.945);
        assert_eq!(intellectual.band, PhaseBand::StrongNegative);

        assert_eq!(day.overall, OverallCondition::Depleted);
    }

    #[test]
    fn test_rows_follow_cycle_order() {
        let day = aggregate_day(date(1990, 6, 15), date(2024, 2, 29));
        let cycles: Vec<Cycle> = day.rows.iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, Cycle::ALL.to_vec());
    }

    #[test]
    fn test_target_before_birth_is_allowed() {
        let day = aggregate_day(date(2000, 1, 24), date(2000, 1, 1));
        assert_eq!(day.elapsed_days, -23);
        assert_eq!(day.row(Cycle::Emotional).unwrap().value, 0.901);
    }

    #[test]
    fn test_threshold_changes_classification() {
        // Intellectual at elapsed 16: sin(2π·16/33) ≈ 0.0951, yesterday ≈ 0.2817
        let birth = date(2000, 1, 1);
        let wide = aggregate_day_with_threshold(birth, date(2000, 1, 17), 0.1);
        let narrow = aggregate_day_with_threshold(birth, date(2000, 1, 17), 0.01);
        assert_eq!(wide.row(Cycle::Intellectual).unwrap().band, PhaseBand::Critical);
        assert_eq!(narrow.row(Cycle::Intellectual).unwrap().band, PhaseBand::Neutral);
    }

    #[test]
    fn test_recommendation_matches_band() {
        let day = aggregate_day(date(1985, 11, 3), date(2024, 7, 1));
        for row in &day.rows {
            assert_eq!(
                row.recommendation,
                crate::phase::recommendation(row.cycle, row.band)
            );
        }
    }
}
