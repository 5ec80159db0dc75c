//! Single-day view: advice, per-cycle summary and overall condition.

use clap::Args;
use serde::Serialize;

use mindcast_core::{
    advise_day, aggregate_day_with_threshold, render_mini_bar, Config, CycleSummary, DailyAdvice,
    DayAggregate, DISCLAIMER,
};

use super::query::{format_date, QueryArgs};

#[derive(Args)]
pub struct TodayArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TodayOutput<'a> {
    day: &'a DayAggregate,
    summaries: &'a [CycleSummary],
    advice: &'a DailyAdvice,
}

pub fn run(args: TodayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let query = args.query.resolve(&config, None)?;

    let day = aggregate_day_with_threshold(query.birth, query.target, config.thresholds.today_near_zero);
    let (advice, summaries) = advise_day(&day);

    if args.json {
        let output = TodayOutput {
            day: &day,
            summaries: &summaries,
            advice: &advice,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let width = config.display.bar_width as usize;

    println!("{}", config.display.report_title);
    println!("{}", DISCLAIMER.trim_end());
    println!();
    println!("Today's advice ({})", format_date(day.date));
    println!("{}", "=".repeat(50));
    for (title, items) in advice.sections() {
        println!("\n{title}");
        for item in items {
            println!("  - {item}");
        }
    }

    println!("\nToday's biorhythm summary");
    println!("{}", "=".repeat(50));
    for (summary, row) in summaries.iter().zip(&day.rows) {
        println!("\n{}  ({})", summary.headline(), summary.tone);
        println!("  {}", summary.commentary);
        println!("  {}  {}", render_mini_bar(row.value, width), row.band);
        println!("  {}", row.recommendation);
    }

    println!("\n{}", "=".repeat(50));
    println!(
        "Overall condition: {}  (day {} since birth)",
        day.overall, day.elapsed_days
    );

    Ok(())
}
