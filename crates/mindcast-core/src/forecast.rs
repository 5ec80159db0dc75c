//! Multi-day forecast.
//!
//! Walks a contiguous range of calendar days starting at the target date
//! and records, per day, every cycle's rounded value and band, plus
//! whether any cycle was critical. The forecast table uses
//! [`FORECAST_NEAR_ZERO_THRESHOLD`], which is narrower than the
//! single-day view's threshold.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::criticality::{zero_crossings, FORECAST_NEAR_ZERO_THRESHOLD};
use crate::cycle::{elapsed_days, Cycle};
use crate::day::{day_row, DayRow};

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub rows: Vec<DayRow>,
    pub any_critical: bool,
}

impl ForecastEntry {
    pub fn row(&self, cycle: Cycle) -> Option<&DayRow> {
        self.rows.iter().find(|r| r.cycle == cycle)
    }

    /// Cycles flagged critical on this day.
    pub fn critical_cycles(&self) -> Vec<Cycle> {
        self.rows
            .iter()
            .filter(|r| r.is_critical())
            .map(|r| r.cycle)
            .collect()
    }
}

/// Forecast over a horizon starting at the target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub birth: NaiveDate,
    pub entries: Vec<ForecastEntry>,
    /// Dates where at least one cycle was critical, ascending
    pub critical_dates: Vec<NaiveDate>,
}

/// Per-cycle list of zero-crossing dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleCrossings {
    pub cycle: Cycle,
    pub dates: Vec<NaiveDate>,
}

impl Forecast {
    pub fn horizon_days(&self) -> usize {
        self.entries.len()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    /// Raw (unrounded) series of `cycle` over the forecast dates.
    pub fn series(&self, cycle: Cycle) -> Vec<(NaiveDate, f64)> {
        self.entries
            .iter()
            .map(|e| (e.date, cycle.value_at(elapsed_days(self.birth, e.date))))
            .collect()
    }

    /// Zero-crossing dates for each cycle over the forecast range.
    pub fn crossings_by_cycle(&self) -> Vec<CycleCrossings> {
        Cycle::ALL
            .iter()
            .map(|&cycle| CycleCrossings {
                cycle,
                dates: zero_crossings(&self.series(cycle)),
            })
            .collect()
    }
}

/// Build a forecast of `horizon_days` days starting at `target`, with the
/// forecast near-zero threshold.
///
/// `horizon_days` must be at least 1 and `target + horizon_days - 1` must
/// be a representable date; [`normalize_query`](crate::input::normalize_query)
/// checks both. Under those preconditions exactly `horizon_days` entries are
/// produced.
pub fn build_forecast(birth: NaiveDate, target: NaiveDate, horizon_days: u32) -> Forecast {
    build_forecast_with_threshold(birth, target, horizon_days, FORECAST_NEAR_ZERO_THRESHOLD)
}

/// Same as [`build_forecast`] with an explicit near-zero threshold.
pub fn build_forecast_with_threshold(
    birth: NaiveDate,
    target: NaiveDate,
    horizon_days: u32,
    near_zero_threshold: f64,
) -> Forecast {
    let mut entries = Vec::with_capacity(horizon_days as usize);
    let mut critical_dates = Vec::new();

    let dates = (0..u64::from(horizon_days)).map_while(|i| target.checked_add_days(Days::new(i)));
    for date in dates {
        let elapsed = elapsed_days(birth, date);
        let rows: Vec<DayRow> = Cycle::ALL
            .iter()
            .map(|&cycle| day_row(cycle, elapsed, near_zero_threshold).0)
            .collect();
        let any_critical = rows.iter().any(DayRow::is_critical);
        if any_critical {
            tracing::debug!(%date, elapsed, "critical day");
            critical_dates.push(date);
        }
        entries.push(ForecastEntry {
            date,
            rows,
            any_critical,
        });
    }

    tracing::info!(
        %birth,
        %target,
        horizon_days,
        critical = critical_dates.len(),
        "built forecast"
    );

    Forecast {
        birth,
        entries,
        critical_dates,
    }
}
