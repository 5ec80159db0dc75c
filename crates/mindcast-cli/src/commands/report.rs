//! Report export.

use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

use mindcast_core::{Config, Report};

use super::query::{HorizonArgs, QueryArgs};

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    #[command(flatten)]
    pub horizon: HorizonArgs,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Write to ./mindcast_report_<date>.json
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
    /// Report title. Defaults to display.report_title from config
    #[arg(long)]
    pub title: Option<String>,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let query = args.query.resolve(&config, args.horizon.days)?;

    let title = args
        .title
        .unwrap_or_else(|| config.display.report_title.clone());
    let report = Report::build(
        &title,
        query.birth,
        query.target,
        query.horizon_days,
        config.thresholds(),
        Utc::now(),
    );
    let json = report.to_json_pretty()?;

    let path = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(report.file_name())),
        (None, false) => None,
    };

    match path {
        Some(path) => {
            std::fs::write(&path, &json)?;
            tracing::info!(path = %path.display(), "wrote report");
            println!("Report written to {}", path.display());
            println!(
                "{} of {} forecast days are critical",
                report.critical_dates().len(),
                report.forecast.len()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
