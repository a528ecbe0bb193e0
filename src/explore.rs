//! Line-driven interactive session over a loaded game table.
//!
//! Each control edits the working criteria and deactivates the current query;
//! nothing is filtered until `run`. Export and charts operate on the result of
//! the last `run`.

use crate::charts::render_charts;
use crate::render::{describe_criteria, write_results};
use analytics::calculate_summary;
use anyhow::{Context, bail};
use configuration::Config;
use core_types::{FavoriteStatus, FilterCriteria, GameTable, HomeAway};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Controls (each one clears the current result until the next `run`):
  team [CODE|any]            restrict to one team
  home | away | any-venue    venue of the game
  season [YEAR|all]          restrict to one season
  win-pct MIN MAX            team win % range, fractions in [0, 1]
  min-win-streak [N|off]     minimum current win streak
  min-loss-streak [N|off]    minimum current loss streak
  favorite | underdog | any-line
Actions:
  show                       print the current controls
  run                        apply the controls and show the results
  charts                     distribution charts of the last result
  export [PATH]              write the last result to CSV
  reset                      restore the configured defaults
  help                       this text
  quit                       leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Team(Option<String>),
    Venue(Option<HomeAway>),
    Season(Option<i32>),
    WinPct(f64, f64),
    MinWinStreak(Option<u32>),
    MinLossStreak(Option<u32>),
    Line(Option<FavoriteStatus>),
    Show,
    Run,
    Charts,
    Export(Option<PathBuf>),
    Reset,
    Help,
    Quit,
}

fn optional<T: std::str::FromStr>(
    arg: Option<&str>,
    clear: &str,
    what: &str,
) -> anyhow::Result<Option<T>> {
    match arg {
        None => Ok(None),
        Some(a) if a.eq_ignore_ascii_case(clear) => Ok(None),
        Some(a) => a
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("invalid {what} '{a}'")),
    }
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    let head = head.to_ascii_lowercase();

    // The rest of the line is one path, spaces included.
    if head == "export" {
        let path = (!rest.is_empty()).then(|| PathBuf::from(rest));
        return Ok(Some(Command::Export(path)));
    }

    let args: Vec<&str> = rest.split_whitespace().collect();
    let first = args.first().copied();
    if args.len() > 2 || (args.len() == 2 && head != "win-pct") {
        bail!("too many arguments for '{head}'");
    }

    let command = match head.as_str() {
        "team" => Command::Team(
            first
                .filter(|t| !t.eq_ignore_ascii_case("any"))
                .map(str::to_string),
        ),
        "home" => Command::Venue(Some(HomeAway::Home)),
        "away" => Command::Venue(Some(HomeAway::Away)),
        "any-venue" => Command::Venue(None),
        "season" => Command::Season(optional(first, "all", "season")?),
        "win-pct" => match args.as_slice() {
            [] => Command::WinPct(0.0, 1.0),
            [min, max] => {
                let min = min.parse().with_context(|| format!("invalid minimum '{min}'"))?;
                let max = max.parse().with_context(|| format!("invalid maximum '{max}'"))?;
                Command::WinPct(min, max)
            }
            _ => bail!("usage: win-pct MIN MAX"),
        },
        "min-win-streak" => Command::MinWinStreak(optional(first, "off", "streak length")?),
        "min-loss-streak" => Command::MinLossStreak(optional(first, "off", "streak length")?),
        "favorite" => Command::Line(Some(FavoriteStatus::Favorite)),
        "underdog" => Command::Line(Some(FavoriteStatus::Underdog)),
        "any-line" => Command::Line(None),
        "show" => Command::Show,
        "run" => Command::Run,
        "charts" => Command::Charts,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (type `help`)"),
    };
    Ok(Some(command))
}

/// State of one explore session.
pub struct Session<'a> {
    table: &'a GameTable,
    config: &'a Config,
    criteria: FilterCriteria,
    active: bool,
    result: Option<GameTable>,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a GameTable, config: &'a Config) -> Self {
        Self {
            table,
            config,
            criteria: config.query.clone(),
            active: false,
            result: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.result = None;
    }

    /// Applies `command`, writing any output to `out`. Returns `false` when the
    /// session should end.
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<bool> {
        match command {
            Command::Team(team) => self.edit(out, |c| c.team = team)?,
            Command::Venue(venue) => self.edit(out, |c| c.home_away = venue)?,
            Command::Season(season) => self.edit(out, |c| c.season = season)?,
            Command::WinPct(min, max) => self.edit(out, |c| {
                c.min_win_pct = min;
                c.max_win_pct = max;
            })?,
            Command::MinWinStreak(n) => self.edit(out, |c| c.min_win_streak = n)?,
            Command::MinLossStreak(n) => self.edit(out, |c| c.min_loss_streak = n)?,
            Command::Line(status) => self.edit(out, |c| c.favorite_status = status)?,
            Command::Show => {
                writeln!(out, "{}", describe_criteria(&self.criteria))?;
                writeln!(out, "query {}", if self.active { "active" } else { "inactive" })?;
            }
            Command::Run => self.run(out)?,
            Command::Charts => match self.active_result() {
                Some(result) => {
                    let display = &self.config.display;
                    let charts =
                        render_charts(result, display.histogram_bins, display.chart_width)?;
                    writeln!(out, "{}", charts)?;
                }
                None => writeln!(out, "Nothing to chart yet. Type `run` first.")?,
            },
            Command::Export(path) => self.export(path, out)?,
            Command::Reset => {
                self.criteria = self.config.query.clone();
                self.deactivate();
                writeln!(out, "Controls reset to defaults.")?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn edit<W: Write>(
        &mut self,
        out: &mut W,
        change: impl FnOnce(&mut FilterCriteria),
    ) -> anyhow::Result<()> {
        change(&mut self.criteria);
        self.deactivate();
        writeln!(out, "{}", describe_criteria(&self.criteria))?;
        Ok(())
    }

    fn active_result(&self) -> Option<&GameTable> {
        self.result.as_ref().filter(|_| self.active)
    }

    fn run<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        match analyzer::filter_games(self.table, &self.criteria) {
            Ok(result) => {
                self.active = true;
                let summary = calculate_summary(&result);
                write_results(out, &result, &summary, self.config.display.preview_rows)?;
                self.result = Some(result);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Query rejected.");
                self.deactivate();
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn export<W: Write>(&self, path: Option<PathBuf>, out: &mut W) -> anyhow::Result<()> {
        let Some(result) = self.active_result() else {
            writeln!(out, "Nothing to export yet. Type `run` first.")?;
            return Ok(());
        };
        let path = path.unwrap_or_else(|| self.config.export.path.clone());
        match dataset::export_games(result, &path) {
            Ok(()) => writeln!(out, "Exported {} game(s) to {}", result.len(), path.display())?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        Ok(())
    }
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    table: &GameTable,
    config: &Config,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut session = Session::new(table, config);
    writeln!(out, "{} games loaded. Type `help` for commands.", table.len())?;
    writeln!(out, "{}", describe_criteria(session.criteria()))?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(command)) => {
                if !session.handle(command, out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "Error: {:#}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{BettingLine, GameRecord, GameResult};
    use std::io::Cursor;

    fn record(team: &str, home_away: HomeAway, win_pct: f64, favorite: Option<bool>) -> GameRecord {
        GameRecord {
            date: NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
            team: team.to_string(),
            opponent: "BOS".to_string(),
            home_away,
            season: Some(2023),
            result: GameResult::W,
            team_score: 6,
            opp_score: 2,
            team_win_pct: win_pct,
            team_win_streak: 2,
            team_loss_streak: 0,
            betting: favorite.map(|f| BettingLine {
                was_favorite: Some(f),
                ..Default::default()
            }),
        }
    }

    fn table(has_betting: bool) -> GameTable {
        let favorite = |f| has_betting.then_some(f);
        GameTable::new(
            vec![
                record("NYY", HomeAway::Home, 0.61, favorite(true)),
                record("NYY", HomeAway::Away, 0.60, favorite(false)),
                record("TOR", HomeAway::Home, 0.52, favorite(true)),
            ],
            has_betting,
        )
    }

    fn transcript(table: &GameTable, config: &Config, script: &str) -> String {
        let mut out = Vec::new();
        run_session(table, config, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_controls() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("team nyy").unwrap(),
            Some(Command::Team(Some("nyy".to_string())))
        );
        assert_eq!(parse_command("team any").unwrap(), Some(Command::Team(None)));
        assert_eq!(
            parse_command("away").unwrap(),
            Some(Command::Venue(Some(HomeAway::Away)))
        );
        assert_eq!(parse_command("season all").unwrap(), Some(Command::Season(None)));
        assert_eq!(
            parse_command("season 2023").unwrap(),
            Some(Command::Season(Some(2023)))
        );
        assert_eq!(
            parse_command("win-pct 0.55 0.7").unwrap(),
            Some(Command::WinPct(0.55, 0.7))
        );
        assert_eq!(
            parse_command("min-win-streak 0").unwrap(),
            Some(Command::MinWinStreak(Some(0)))
        );
        assert_eq!(
            parse_command("min-loss-streak off").unwrap(),
            Some(Command::MinLossStreak(None))
        );
        assert_eq!(
            parse_command("underdog").unwrap(),
            Some(Command::Line(Some(FavoriteStatus::Underdog)))
        );
        assert_eq!(
            parse_command("export out.csv").unwrap(),
            Some(Command::Export(Some(PathBuf::from("out.csv"))))
        );
        assert_eq!(
            parse_command("export  my results/picked games.csv ").unwrap(),
            Some(Command::Export(Some(PathBuf::from("my results/picked games.csv"))))
        );
        assert_eq!(parse_command("export").unwrap(), Some(Command::Export(None)));
        assert_eq!(parse_command("EXIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("bogus").is_err());
        assert!(parse_command("season twenty").is_err());
        assert!(parse_command("win-pct 0.5").is_err());
        assert!(parse_command("min-win-streak -1").is_err());
        assert!(parse_command("team a b").is_err());
    }

    #[test]
    fn editing_a_control_deactivates_the_query() {
        let games = table(false);
        let config = Config::default();
        let mut session = Session::new(&games, &config);
        let mut out = Vec::new();

        session.handle(Command::Run, &mut out).unwrap();
        assert!(session.is_active());
        session.handle(Command::Team(Some("tor".into())), &mut out).unwrap();
        assert!(!session.is_active());
        assert_eq!(session.criteria().team.as_deref(), Some("tor"));
    }

    #[test]
    fn reset_restores_configured_defaults() {
        let games = table(false);
        let config = Config {
            query: FilterCriteria {
                home_away: Some(HomeAway::Home),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut session = Session::new(&games, &config);
        let mut out = Vec::new();

        session.handle(Command::Venue(None), &mut out).unwrap();
        session.handle(Command::Run, &mut out).unwrap();
        session.handle(Command::Reset, &mut out).unwrap();
        assert!(!session.is_active());
        assert_eq!(session.criteria(), &config.query);
    }

    #[test]
    fn run_shows_results_and_empty_queries_show_the_notice() {
        let script = "team nyy\nhome\nrun\nteam sea\nrun\n";
        let text = transcript(&table(false), &Config::default(), script);
        assert!(text.contains("1 result(s)"));
        assert!(text.contains(crate::render::NO_RESULTS));
    }

    #[test]
    fn favorite_filter_without_betting_columns_is_reported() {
        let text = transcript(&table(false), &Config::default(), "favorite\nrun\nshow\n");
        assert!(text.contains("Error:"));
        assert!(text.contains("query inactive"));
    }

    #[test]
    fn invalid_win_pct_is_reported_and_session_continues() {
        let script = "win-pct 0.2 1.5\nrun\nwin-pct\nrun\nquit\nrun\n";
        let text = transcript(&table(true), &Config::default(), script);
        assert!(text.contains("Error:"));
        assert!(text.contains("3 result(s)"));
        assert_eq!(text.matches("Summary").count(), 1);
    }

    #[test]
    fn export_requires_an_active_query() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("picked games.csv");
        let script = format!(
            "export {path}\nfavorite\nrun\nexport {path}\n",
            path = target.display()
        );
        let text = transcript(&table(true), &Config::default(), &script);

        assert!(text.contains("Nothing to export yet."));
        assert!(text.contains("Exported 2 game(s)"));
        let reloaded = dataset::load_games(&target).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.has_betting());
    }

    #[test]
    fn charts_follow_the_last_run() {
        let text = transcript(&table(false), &Config::default(), "charts\nrun\ncharts\n");
        assert!(text.contains("Nothing to chart yet."));
        assert!(text.contains("Team Win Streak Distribution"));
    }
}
