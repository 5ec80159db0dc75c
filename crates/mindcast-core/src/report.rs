//! Structured report combining the single-day view and the forecast.
//!
//! Field-for-field serializable; dates are ISO 8601 and cycle values are
//! rounded to 3 decimals, so a JSON round trip is lossless.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::criticality::{FORECAST_NEAR_ZERO_THRESHOLD, TODAY_NEAR_ZERO_THRESHOLD};
use crate::day::{aggregate_day_with_threshold, DayRow};
use crate::error::Result;
use crate::forecast::{build_forecast_with_threshold, ForecastEntry};
use crate::phase::OverallCondition;

/// Near-zero thresholds for the two views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub today: f64,
    pub forecast: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            today: TODAY_NEAR_ZERO_THRESHOLD,
            forecast: FORECAST_NEAR_ZERO_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub birth_date: NaiveDate,
    pub target_date: NaiveDate,
    pub today: Vec<DayRow>,
    pub overall: OverallCondition,
    pub horizon_days: u32,
    pub forecast: Vec<ForecastEntry>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report for `target` plus `horizon_days` of forecast.
    pub fn build(
        title: &str,
        birth: NaiveDate,
        target: NaiveDate,
        horizon_days: u32,
        thresholds: Thresholds,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let day = aggregate_day_with_threshold(birth, target, thresholds.today);
        let forecast = build_forecast_with_threshold(birth, target, horizon_days, thresholds.forecast);

        tracing::info!(%birth, %target, horizon_days, "built report");

        Self {
            title: title.to_string(),
            birth_date: birth,
            target_date: target,
            today: day.rows,
            overall: day.overall,
            horizon_days,
            forecast: forecast.entries,
            generated_at,
        }
    }

    /// Dates in the forecast with at least one critical cycle.
    pub fn critical_dates(&self) -> Vec<NaiveDate> {
        self.forecast
            .iter()
            .filter(|e| e.any_critical)
            .map(|e| e.date)
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suggested file name, e.g. `mindcast_report_2024-03-01.json`.
    pub fn file_name(&self) -> String {
        format!("mindcast_report_{}.json", self.target_date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{round3, Cycle};
    use chrono::TimeZone;

    fn sample_report() -> Report {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2000, 1, 24).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Report::build("Mind Forecast", birth, target, 14, Thresholds::default(), now)
    }

    #[test]
    fn test_report_fields() {
        let report = sample_report();
        assert_eq!(report.title, "Mind Forecast");
        assert_eq!(report.today.len(), 3);
        assert_eq!(report.today[0].cycle, Cycle::Physical);
        assert_eq!(report.overall, OverallCondition::Depleted);
        assert_eq!(report.horizon_days, 14);
        assert_eq!(report.forecast.len(), 14);
        assert_eq!(report.forecast[0].date, report.target_date);
        assert_eq!(report.file_name(), "mindcast_report_2000-01-24.json");
    }

    #[test]
    fn test_critical_dates_follow_entry_flags() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let report = Report::build("Mind Forecast", birth, birth, 30, Thresholds::default(), now);
        let dates = report.critical_dates();
        // birthday: every cycle sits at zero
        assert_eq!(dates.first(), Some(&birth));
        // Physical returns to zero on day 23
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2000, 1, 24).unwrap()));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            dates.len(),
            report.forecast.iter().filter(|e| e.any_critical).count()
        );
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let report = sample_report();
        let json = report.to_json_pretty().unwrap();
        let parsed = Report::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_dates_serialize_as_iso_8601() {
        let report = sample_report();
        let value: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["birth_date"], "2000-01-01");
        assert_eq!(value["target_date"], "2000-01-24");
        assert_eq!(value["forecast"][0]["date"], "2000-01-24");
        assert_eq!(value["today"][1]["band"], "strong_negative");
        assert_eq!(value["overall"], "depleted");
    }

    #[test]
    fn test_values_are_stable_under_rerounding() {
        let report = sample_report();
        for entry in &report.forecast {
            for row in &entry.rows {
                assert_eq!(round3(row.value), row.value);
            }
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Report::from_json("{\"title\": 3}").is_err());
    }
}
