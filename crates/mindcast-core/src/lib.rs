//! # Mindcast Core Library
//!
//! This library provides the engine behind Mindcast, a biorhythm
//! "forecast". It follows a CLI-first philosophy: all computation lives
//! here as pure functions, and the `mindcast` binary is a thin layer that
//! collects input, renders text and writes reports.
//!
//! Biorhythms are for entertainment and reference only. Nothing here is a
//! validated predictive model.
//!
//! ## Architecture
//!
//! - **Cycles**: three fixed sinusoidal cycles (physical 23 days,
//!   emotional 28, intellectual 33) evaluated from days since birth
//! - **Classification**: ordinal phase bands, critical-day detection and
//!   a static recommendation table
//! - **Aggregation**: a single-day view and a multi-day forecast
//! - **Boundary**: input normalization, TOML configuration and a
//!   serializable report
//!
//! ## Key Components
//!
//! - [`aggregate_day`]: all cycles for one date plus the overall condition
//! - [`build_forecast`]: per-day table over a horizon and its critical dates
//! - [`Report`]: the exportable combination of both
//! - [`Config`]: application configuration management

pub mod advice;
pub mod chart;
pub mod criticality;
pub mod cycle;
pub mod day;
pub mod error;
pub mod forecast;
pub mod input;
pub mod phase;
pub mod report;
pub mod storage;

pub use advice::{advise_day, advise_today, CycleSummary, DailyAdvice, SummaryTone};
pub use chart::{render_mini_bar, render_range_chart};
pub use criticality::{
    is_critical, zero_crossings, FORECAST_NEAR_ZERO_THRESHOLD, TODAY_NEAR_ZERO_THRESHOLD,
};
pub use cycle::{elapsed_days, evaluate, Cycle};
pub use day::{aggregate_day, aggregate_day_with_threshold, DayAggregate, DayRow};
pub use error::{ConfigError, CoreError, ValidationError};
pub use forecast::{build_forecast, build_forecast_with_threshold, CycleCrossings, Forecast, ForecastEntry};
pub use input::{normalize_query, parse_date, Adjustment, HorizonLimits, NormalizedQuery, RawQuery};
pub use phase::{classify, recommendation, OverallCondition, PhaseBand};
pub use report::{Report, Thresholds};
pub use storage::Config;

/// Disclaimer shown alongside every forecast.
pub const DISCLAIMER: &str = indoc::indoc! {"
    Biorhythms are for entertainment and reference only.
    Do not use them as the sole basis for health, study or other important decisions.
"};
