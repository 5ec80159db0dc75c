//! Date and horizon arguments shared by the query commands.

use chrono::{Local, NaiveDate};
use clap::Args;

use mindcast_core::{normalize_query, parse_date, Config, NormalizedQuery, RawQuery};

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Birth date (YYYY-MM-DD). Defaults to profile.birth_date from config
    #[arg(long)]
    pub birth: Option<String>,
    /// Target date (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct HorizonArgs {
    /// Number of days to forecast. Defaults to forecast.horizon_days from config
    #[arg(long)]
    pub days: Option<i64>,
}

impl QueryArgs {
    /// Resolve the arguments against config and today's date, printing any
    /// adjustments as warnings.
    pub fn resolve(
        &self,
        config: &Config,
        days: Option<i64>,
    ) -> Result<NormalizedQuery, Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        let birth = match &self.birth {
            Some(s) => parse_date(s)?,
            None => config.birth_date(),
        };
        let target = match &self.date {
            Some(s) => parse_date(s)?,
            None => today,
        };
        let raw = RawQuery {
            birth,
            target,
            horizon_days: days.unwrap_or_else(|| i64::from(config.forecast.horizon_days)),
        };

        let query = normalize_query(&raw, today, config.horizon_limits())?;
        for adjustment in &query.adjustments {
            eprintln!("warning: {adjustment}");
        }
        Ok(query)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
