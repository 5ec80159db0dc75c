//! Input normalization at the boundary of the engine.
//!
//! The engine functions accept any calendar dates and any positive
//! horizon. Callers collecting user input run it through
//! [`normalize_query`] first, which fixes up what can be fixed and
//! reports every change as an [`Adjustment`].

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValidationError};

/// Permitted forecast horizon, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for HorizonLimits {
    fn default() -> Self {
        Self { min: 15, max: 60 }
    }
}

impl HorizonLimits {
    /// Clamp `requested` into the limits. Non-positive values become `min`.
    pub fn clamp(&self, requested: i64) -> u32 {
        let min = self.min.max(1);
        let max = self.max.max(min);
        requested.clamp(i64::from(min), i64::from(max)) as u32
    }
}

/// Unvalidated query as collected from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    pub birth: NaiveDate,
    pub target: NaiveDate,
    pub horizon_days: i64,
}

/// A change made while normalizing a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Birth date was in the future and was replaced by today.
    BirthInFuture { given: NaiveDate, replaced_with: NaiveDate },
    /// Horizon was outside the permitted range.
    HorizonClamped { given: i64, clamped_to: u32 },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::BirthInFuture {
                given,
                replaced_with,
            } => write!(
                f,
                "birth date {given} is in the future; using {replaced_with} instead"
            ),
            Adjustment::HorizonClamped { given, clamped_to } => write!(
                f,
                "horizon of {given} days is out of range; using {clamped_to} days"
            ),
        }
    }
}

/// Query that satisfies the engine's preconditions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub birth: NaiveDate,
    pub target: NaiveDate,
    pub horizon_days: u32,
    pub adjustments: Vec<Adjustment>,
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            input: input.to_string(),
        }
        .into()
    })
}

/// Normalize a raw query against `today`.
///
/// - A birth date after `today` becomes `today`.
/// - The horizon is clamped into `limits`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValue`] if the (possibly adjusted)
/// birth date falls after the target date, and
/// [`ValidationError::OutOfRange`] if the last forecast day would fall past
/// the last representable calendar date.
pub fn normalize_query(
    raw: &RawQuery,
    today: NaiveDate,
    limits: HorizonLimits,
) -> Result<NormalizedQuery> {
    let mut adjustments = Vec::new();

    let mut birth = raw.birth;
    if birth > today {
        adjustments.push(Adjustment::BirthInFuture {
            given: birth,
            replaced_with: today,
        });
        birth = today;
    }

    if birth > raw.target {
        return Err(ValidationError::InvalidValue {
            field: "target".to_string(),
            message: format!("target date {} is before birth date {}", raw.target, birth),
        }
        .into());
    }

    let horizon_days = limits.clamp(raw.horizon_days);
    if i64::from(horizon_days) != raw.horizon_days {
        adjustments.push(Adjustment::HorizonClamped {
            given: raw.horizon_days,
            clamped_to: horizon_days,
        });
    }

    let last_offset = Days::new(u64::from(horizon_days) - 1);
    if raw.target.checked_add_days(last_offset).is_none() {
        let representable = (NaiveDate::MAX - raw.target).num_days() + 1;
        return Err(ValidationError::OutOfRange {
            field: "horizon_days".to_string(),
            min: 1,
            max: representable,
            value: i64::from(horizon_days),
        }
        .into());
    }

    for adjustment in &adjustments {
        tracing::warn!("{adjustment}");
    }

    Ok(NormalizedQuery {
        birth,
        target: raw.target,
        horizon_days,
        adjustments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2008-01-01").unwrap(), date(2008, 1, 1));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(CoreError::Validation(ValidationError::InvalidDate { .. }))
        ));
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_valid_query_is_untouched() {
        let raw = RawQuery {
            birth: date(1990, 5, 17),
            target: date(2024, 3, 1),
            horizon_days: 30,
        };
        let q = normalize_query(&raw, date(2024, 3, 1), HorizonLimits::default()).unwrap();
        assert_eq!(q.birth, raw.birth);
        assert_eq!(q.target, raw.target);
        assert_eq!(q.horizon_days, 30);
        assert!(q.adjustments.is_empty());
    }

    #[test]
    fn test_future_birth_becomes_today() {
        let today = date(2024, 3, 1);
        let raw = RawQuery {
            birth: date(2030, 1, 1),
            target: date(2024, 6, 1),
            horizon_days: 20,
        };
        let q = normalize_query(&raw, today, HorizonLimits::default()).unwrap();
        assert_eq!(q.birth, today);
        assert_eq!(
            q.adjustments,
            vec![Adjustment::BirthInFuture {
                given: date(2030, 1, 1),
                replaced_with: today,
            }]
        );
    }

    #[test]
    fn test_horizon_is_clamped() {
        let today = date(2024, 3, 1);
        let limits = HorizonLimits::default();
        for (given, expected) in [(0, 15), (-4, 15), (5, 15), (15, 15), (60, 60), (365, 60)] {
            let raw = RawQuery {
                birth: date(2000, 1, 1),
                target: today,
                horizon_days: given,
            };
            let q = normalize_query(&raw, today, limits).unwrap();
            assert_eq!(q.horizon_days, expected, "given {given}");
            assert_eq!(q.adjustments.is_empty(), given == i64::from(expected));
        }
    }

    #[test]
    fn test_target_before_birth_is_rejected() {
        let raw = RawQuery {
            birth: date(2000, 1, 10),
            target: date(2000, 1, 1),
            horizon_days: 30,
        };
        assert!(normalize_query(&raw, date(2024, 1, 1), HorizonLimits::default()).is_err());
    }

    #[test]
    fn test_horizon_past_last_representable_date_is_rejected() {
        // 12 days left in the calendar
        let target = NaiveDate::MAX - Days::new(11);
        let raw = RawQuery {
            birth: date(2000, 1, 1),
            target,
            horizon_days: 30,
        };
        let err = normalize_query(&raw, date(2024, 1, 1), HorizonLimits::default()).unwrap_err();
        match err {
            CoreError::Validation(ValidationError::OutOfRange {
                field, max, value, ..
            }) => {
                assert_eq!(field, "horizon_days");
                assert_eq!(max, 12);
                assert_eq!(value, 30);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_horizon_ending_on_last_representable_date_is_accepted() {
        let target = NaiveDate::MAX - Days::new(14);
        let raw = RawQuery {
            birth: date(2000, 1, 1),
            target,
            horizon_days: 15,
        };
        let q = normalize_query(&raw, date(2024, 1, 1), HorizonLimits::default()).unwrap();
        let forecast = crate::forecast::build_forecast(q.birth, q.target, q.horizon_days);
        assert_eq!(forecast.entries.len(), 15);
        assert_eq!(forecast.end(), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_degenerate_limits_still_yield_positive_horizon() {
        let limits = HorizonLimits { min: 0, max: 0 };
        assert_eq!(limits.clamp(-10), 1);
        assert_eq!(limits.clamp(100), 1);
    }

    #[test]
    fn test_adjustment_messages() {
        let adj = Adjustment::HorizonClamped {
            given: 90,
            clamped_to: 60,
        };
        assert_eq!(
            adj.to_string(),
            "horizon of 90 days is out of range; using 60 days"
        );
    }
}
