use analytics::calculate_summary;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::Config;
use core_types::{FavoriteStatus, FilterCriteria, GameTable, HomeAway};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod charts;
mod explore;
mod render;
mod telemetry;

/// The main entry point for the game finder.
fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only supplies GAMEFINDER__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    let _guard = telemetry::init(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!(?config, "Loaded configuration.");

    let table = load_with_spinner(&config.data.path)?;

    match cli.command {
        Commands::Query(args) => handle_query(args, &table, &config),
        Commands::Info => handle_info(&table),
        Commands::Explore => handle_explore(&table, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Filter, summarize and export team game records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Game table to load, overriding `data.path` from the configuration.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the game table once and print the results and summary.
    Query(QueryArgs),
    /// Describe the loaded game table.
    Info,
    /// Start an interactive session for adjusting filters and exporting results.
    Explore,
}

/// Filter flags. Anything left unset falls back to the `[query]` section of
/// the configuration.
#[derive(Args, Default)]
struct FilterArgs {
    /// Team code, matched case-insensitively (e.g. "NYY"). Use "any" to clear a configured team.
    #[arg(long)]
    team: Option<String>,

    #[arg(long, value_enum)]
    home_away: Option<HomeAway>,

    #[arg(long)]
    season: Option<i32>,

    /// Lower bound of the team win percentage, as a fraction in [0, 1].
    #[arg(long)]
    min_win_pct: Option<f64>,

    /// Upper bound of the team win percentage, as a fraction in [0, 1].
    #[arg(long)]
    max_win_pct: Option<f64>,

    /// Keep games where the team's current win streak is at least this long.
    #[arg(long)]
    min_win_streak: Option<u32>,

    /// Keep games where the team's current loss streak is at least this long.
    #[arg(long)]
    min_loss_streak: Option<u32>,

    /// Requires the betting columns in the game table.
    #[arg(long, value_enum)]
    favorite_status: Option<FavoriteStatus>,
}

impl FilterArgs {
    fn apply_to(self, mut criteria: FilterCriteria) -> FilterCriteria {
        if let Some(team) = self.team {
            criteria.team = (!team.eq_ignore_ascii_case("any")).then_some(team);
        }
        if self.home_away.is_some() {
            criteria.home_away = self.home_away;
        }
        if self.season.is_some() {
            criteria.season = self.season;
        }
        if let Some(min) = self.min_win_pct {
            criteria.min_win_pct = min;
        }
        if let Some(max) = self.max_win_pct {
            criteria.max_win_pct = max;
        }
        if self.min_win_streak.is_some() {
            criteria.min_win_streak = self.min_win_streak;
        }
        if self.min_loss_streak.is_some() {
            criteria.min_loss_streak = self.min_loss_streak;
        }
        if self.favorite_status.is_some() {
            criteria.favorite_status = self.favorite_status;
        }
        criteria
    }
}

#[derive(Args)]
struct QueryArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Maximum rows in the preview table (defaults to `display.preview_rows`).
    #[arg(long)]
    limit: Option<usize>,

    /// Also print the win % and streak distribution charts.
    #[arg(long)]
    charts: bool,

    /// Write the filtered rows to CSV. Without a value, `export.path` is used.
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    export: Option<Option<PathBuf>>,

    /// Print the summary as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_with_spinner(path: &Path) -> anyhow::Result<GameTable> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading {}...", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = dataset::load_games(path);
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to load game table from {}", path.display()))
}

fn handle_query(args: QueryArgs, table: &GameTable, config: &Config) -> anyhow::Result<()> {
    let criteria = args.filters.apply_to(config.query.clone());
    tracing::info!(criteria = %render::describe_criteria(&criteria), "Running query.");

    let filtered = analyzer::filter_games(table, &criteria).context("Invalid filter")?;
    let summary = calculate_summary(&filtered);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        let limit = args.limit.unwrap_or(config.display.preview_rows);
        render::write_results(&mut out, &filtered, &summary, limit)?;
        if args.charts && !filtered.is_empty() {
            let display = &config.display;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                charts::render_charts(&filtered, display.histogram_bins, display.chart_width)?
            )?;
        }
    }

    if let Some(path) = args.export {
        let path = path.unwrap_or_else(|| config.export.path.clone());
        dataset::export_games(&filtered, &path)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        eprintln!("Exported {} game(s) to {}", filtered.len(), path.display());
    }
    Ok(())
}

fn handle_info(table: &GameTable) -> anyhow::Result<()> {
    println!("{}", render::info_table(table));
    Ok(())
}

fn handle_explore(table: &GameTable, config: &Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    explore::run_session(table, config, stdin.lock(), &mut stdout.lock())
}
