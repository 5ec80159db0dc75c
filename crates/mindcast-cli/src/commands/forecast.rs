//! Forecast command: per-day values for every cycle over the horizon.

use clap::{Args, ValueEnum};

use mindcast_core::{build_forecast_with_threshold, render_range_chart, Config, Cycle, Forecast};

use super::query::{format_date, HorizonArgs, QueryArgs};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ForecastFormat {
    /// Rounded values per cycle
    Table,
    /// Mini bar per cycle
    Chart,
    Json,
}

#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    #[command(flatten)]
    pub horizon: HorizonArgs,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: ForecastFormat,
}

pub fn run(args: ForecastArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let query = args.query.resolve(&config, args.horizon.days)?;

    let forecast = build_forecast_with_threshold(
        query.birth,
        query.target,
        query.horizon_days,
        config.thresholds.forecast_near_zero,
    );

    match args.format {
        ForecastFormat::Json => println!("{}", serde_json::to_string_pretty(&forecast)?),
        ForecastFormat::Chart => {
            print!(
                "{}",
                render_range_chart(&forecast, config.display.bar_width as usize)
            )
        }
        ForecastFormat::Table => print!("{}", render_table(&forecast)),
    }
    Ok(())
}

fn render_table(forecast: &Forecast) -> String {
    let mut output = format!("{:<10}", "Date");
    for cycle in Cycle::ALL {
        output.push_str(&format!("  {:>13}", cycle.label()));
    }
    output.push('\n');
    output.push_str(&"─".repeat(10 + 15 * Cycle::ALL.len()));
    output.push('\n');

    for entry in &forecast.entries {
        output.push_str(&format_date(entry.date));
        for row in &entry.rows {
            let flag = if row.is_critical() { "*" } else { " " };
            output.push_str(&format!("  {:>12.3}{flag}", row.value));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{} days, {} critical. * critical (transition) day\n",
        forecast.horizon_days(),
        forecast.critical_dates.len()
    ));
    output
}
