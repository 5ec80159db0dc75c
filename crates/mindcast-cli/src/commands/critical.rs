//! Critical days within the forecast range, overall and per cycle.

use clap::Args;
use serde::Serialize;

use mindcast_core::{build_forecast_with_threshold, Config, CycleCrossings};

use super::query::{format_date, HorizonArgs, QueryArgs};

#[derive(Args)]
pub struct CriticalArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    #[command(flatten)]
    pub horizon: HorizonArgs,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CriticalOutput {
    critical_dates: Vec<chrono::NaiveDate>,
    zero_crossings: Vec<CycleCrossings>,
}

pub fn run(args: CriticalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let query = args.query.resolve(&config, args.horizon.days)?;

    let forecast = build_forecast_with_threshold(
        query.birth,
        query.target,
        query.horizon_days,
        config.thresholds.forecast_near_zero,
    );
    let crossings = forecast.crossings_by_cycle();

    if args.json {
        let output = CriticalOutput {
            critical_dates: forecast.critical_dates.clone(),
            zero_crossings: crossings,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Critical days {} to {}",
        forecast.start().map(format_date).unwrap_or_default(),
        forecast.end().map(format_date).unwrap_or_default()
    );
    println!("{}", "=".repeat(50));

    if forecast.critical_dates.is_empty() {
        println!("No critical days in range.");
    }
    for entry in forecast.entries.iter().filter(|e| e.any_critical) {
        let cycles: Vec<&str> = entry
            .critical_cycles()
            .into_iter()
            .map(|c| c.label())
            .collect();
        println!("  {}  {}", format_date(entry.date), cycles.join(", "));
    }

    println!("\nZero crossings by cycle");
    println!("{}", "=".repeat(50));
    if crossings.iter().all(|c| c.dates.is_empty()) {
        println!("No zero crossings in range.");
        return Ok(());
    }
    for crossing in &crossings {
        let dates: Vec<String> = crossing.dates.iter().copied().map(format_date).collect();
        let listed = if dates.is_empty() {
            "-".to_string()
        } else {
            dates.join(", ")
        };
        println!("  {:<13} {}", crossing.cycle.label(), listed);
    }

    Ok(())
}
