use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "mindcast", version, about = "Mindcast CLI -- biorhythm forecast")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's cycles, advice and overall condition
    Today(commands::today::TodayArgs),
    /// Day-by-day forecast from the target date
    Forecast(commands::forecast::ForecastArgs),
    /// Critical (transition) days within the forecast range
    Critical(commands::critical::CriticalArgs),
    /// Write the full report as JSON
    Report(commands::report::ReportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Today(args) => commands::today::run(args),
        Commands::Forecast(args) => commands::forecast::run(args),
        Commands::Critical(args) => commands::critical::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
