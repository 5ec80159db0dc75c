//! Biorhythm cycles and the sinusoidal evaluator.
//!
//! Each cycle is a fixed period in days. The signal for a cycle at a given
//! number of days since birth is `sin(2π · elapsed / period)`, always in
//! `[-1, 1]` and defined for negative elapsed counts as well.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// One of the three fixed biorhythm cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cycle {
    /// 23-day cycle
    Physical,
    /// 28-day cycle
    Emotional,
    /// 33-day cycle
    Intellectual,
}

impl Cycle {
    /// All cycles in display order.
    pub const ALL: [Cycle; 3] = [Cycle::Physical, Cycle::Emotional, Cycle::Intellectual];

    /// Period of the cycle in days.
    pub fn period_days(self) -> u32 {
        match self {
            Cycle::Physical => 23,
            Cycle::Emotional => 28,
            Cycle::Intellectual => 33,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Cycle::Physical => "Physical",
            Cycle::Emotional => "Emotional",
            Cycle::Intellectual => "Intellectual",
        }
    }

    /// Position in [`Cycle::ALL`], used to index per-cycle tables.
    pub fn index(self) -> usize {
        match self {
            Cycle::Physical => 0,
            Cycle::Emotional => 1,
            Cycle::Intellectual => 2,
        }
    }

    /// Signal value of this cycle after `elapsed_days` days.
    pub fn value_at(self, elapsed_days: i64) -> f64 {
        evaluate(elapsed_days, self.period_days())
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluate a cycle of `period_days` at `elapsed_days`.
///
/// Pure and total: `period_days` must be positive, which the fixed
/// [`Cycle`] set guarantees.
pub fn evaluate(elapsed_days: i64, period_days: u32) -> f64 {
    (2.0 * PI * elapsed_days as f64 / f64::from(period_days)).sin()
}

/// Signed whole-day difference `date - birth`.
pub fn elapsed_days(birth: NaiveDate, date: NaiveDate) -> i64 {
    (date - birth).num_days()
}

/// Round to 3 decimals for display and export. Negative zero becomes zero.
pub fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
