use anyhow::{Context, Result};
use boxoffice_explorer::config::{SourceConfig, ENV_KEYS};
use boxoffice_explorer::pipeline::{load_week, LoadStatus, WeekReport};
use boxoffice_explorer::report;
use boxoffice_explorer::source::KoficClient;
use boxoffice_explorer::util::env as env_util;
use boxoffice_explorer::week;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "boxoffice",
    version,
    about = "Weekly KOFIC box-office explorer"
)]
struct Cli {
    /// Week-ending Sunday (YYYY-MM-DD or YYYYMMDD). Defaults to the week before the latest completed one.
    #[arg(long, global = true, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Debug logging (also BOXOFFICE_VERBOSE=1)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Ranking table and weekly audience bar chart
    Ranking,
    /// Weekly audience contribution by distributor (top 10)
    Distributors,
    /// Weekly audience by age rating
    Ratings,
    /// Weekend dependency (weekly ÷ cumulative audience), top and bottom 5
    Weekend,
    /// Every view
    All,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    week::parse_date_arg(raw).map_err(|e| e.to_string())
}

fn render(report: &WeekReport, command: Commands, format: Format) -> Result<String> {
    Ok(match (command, format) {
        (Commands::Ranking, Format::Text) => {
            report::render_ranking(&report.ranking(), &report.audience_series())
        }
        (Commands::Ranking, Format::Json) => report::render_json(&report.ranking())?,
        (Commands::Distributors, Format::Text) => report::render_distributors(&report.distributors()),
        (Commands::Distributors, Format::Json) => report::render_json(&report.distributors())?,
        (Commands::Ratings, Format::Text) => report::render_ratings(&report.ratings()),
        (Commands::Ratings, Format::Json) => report::render_json(&report.ratings())?,
        (Commands::Weekend, Format::Text) => {
            let w = report.weekend();
            report::render_weekend(&w.highest, &w.lowest)
        }
        (Commands::Weekend, Format::Json) => report::render_json(&report.weekend())?,
        (Commands::All, Format::Text) => report::render_all(report),
        (Commands::All, Format::Json) => report::render_all_json(report)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_util::init_env();
    let verbose = cli.verbose || env_util::env_flag("BOXOFFICE_VERBOSE", false);
    boxoffice_explorer::tracing::init_tracing(boxoffice_explorer::tracing::default_filter(verbose))?;
    env_util::preflight_check("boxoffice", &ENV_KEYS);

    let today = Local::now().date_naive();
    let week_end = week::resolve_week_end(cli.date, today)?;
    let command = cli.command.unwrap_or(Commands::All);
    debug!(?command, week_end = %week_end, "resolved request");

    let cfg = SourceConfig::from_env().context("loading KOFIC configuration")?;
    let client = KoficClient::new(cfg).context("building KOFIC client")?;

    let status = load_week(&client, week_end, |p| {
        info!(
            processed = p.processed,
            total = p.total,
            "loading title details ({:.0}%)",
            p.fraction() * 100.0
        );
    })
    .await;

    eprintln!("{status}");
    if let LoadStatus::Loaded(report) = &status {
        println!("{}", render(report, command, cli.format)?);
    }
    Ok(())
}
