// src/specs/schedule.rs
//! Scraping *spec* for the weekly scoreboard page.
//!
//! Purpose:
//! - Walk the saved scoreboard HTML for one `(year, week)` and extract one
//!   [`GameData`] per game: game id, kickoff, away/home names + abbreviations,
//!   and the point-spread line.
//! - The page interleaves day headers and per-game `<section>` blocks, with
//!   the away/home sides distinguished only by ancestor list items, so the
//!   walk keeps an explicit element stack: push on open, pop on close, and
//!   answer "is there an away/home ancestor above me?" from the stack.
//!
//! Responsibilities:
//! - Event consumption via `core::html::Tokenizer`.
//! - Field assignment rules (which tag/class combination feeds which field).
//!
//! Non-Responsibilities (by design):
//! - **No file or network I/O.** The runner resolves the document.
//! - **No ordering or CSV shaping.** The runner sorts and writes.

use std::error::Error;

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::html::{Attrs, Event, Tokenizer};
use crate::core::sanitize::clean_text;
use crate::error::ScrapeError;
use crate::teams;

/// Kickoff composite as assembled from day header + time cell.
const KICKOFF_FMT: &str = "%Y-%m-%dT%I:%M %p";
/// Day header label, e.g. "Sunday, October 31, 2021".
const HEADER_DATE_FMT: &str = "%A, %B %d, %Y";

/// One open element on the walk stack.
#[derive(Debug)]
pub struct Node {
    pub tag: String,
    pub attrs: Attrs,
    /// Last text seen while this node was open.
    pub text: String,
}

impl Node {
    fn new(tag: String, attrs: Attrs) -> Self {
        Self { tag, attrs, text: s!() }
    }

    /// Token membership against the space-split class attribute.
    pub fn has_class(&self, name: &str) -> bool {
        self.get_attr("class")
            .split_ascii_whitespace()
            .any(|t| t == name)
    }

    /// Attribute value, or "" when absent. Never fails.
    pub fn get_attr(&self, name: &str) -> &str {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Field accumulator for one game's schedule entry. Mutated while its
/// scoreboard block is open, read-only once the block closes.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub week: u32,
    pub game_id: String,
    /// `YYYY-MM-DDTH:MM AM/PM`, empty for bye blocks.
    pub date_and_time: String,
    pub away_team_name: String,
    pub away_team_abbr: String,
    pub home_team_name: String,
    pub home_team_abbr: String,
    /// Raw line text after the "Line :" label, e.g. "KC -6.5" or "EVEN".
    pub line: String,
}

impl GameData {
    fn new(week: u32) -> Self {
        Self { week, ..Self::default() }
    }

    /// Spread relative to the away team: positive when the away side is
    /// favored, negative when the home side is, 0 for a pick'em.
    pub fn away_line(&self) -> Result<f64, ScrapeError> {
        if self.line == "EVEN" {
            return Ok(0.0);
        }
        let mut parts = self.line.split_whitespace();
        let team = parts.next().unwrap_or("");
        let magnitude: f64 = parts
            .next()
            .unwrap_or("")
            .parse()
            .map_err(|_| ScrapeError::MalformedOddsLine(self.line.clone()))?;
        if team == self.away_team_abbr {
            Ok(magnitude)
        } else {
            Ok(-magnitude)
        }
    }

    /// Parsed kickoff, used for chronological ordering.
    pub fn kickoff_instant(&self) -> Result<NaiveDateTime, ScrapeError> {
        NaiveDateTime::parse_from_str(&self.date_and_time, KICKOFF_FMT)
            .map_err(|_| ScrapeError::MalformedTimestamp(self.date_and_time.clone()))
    }

    /// Kickoff as `YYYY-MM-DD HH:MM` (24h). An empty kickoff stays empty
    /// and logs a warning; anything else unparseable is fatal.
    pub fn local_kickoff(&self) -> Result<String, ScrapeError> {
        if self.date_and_time.is_empty() {
            logw!("Unable to parse empty date/time (game id {:?})", self.game_id);
            return Ok(s!());
        }
        Ok(self.kickoff_instant()?.format("%Y-%m-%d %H:%M").to_string())
    }

    /// Fixed 8-column output shape:
    /// week, game_id, date_and_time, away abbr, away name, away line,
    /// home abbr, home name.
    pub fn to_row(&self) -> Result<Vec<String>, ScrapeError> {
        let away_line = self.away_line()?;
        Ok(vec![
            self.week.to_string(),
            self.game_id.clone(),
            self.local_kickoff()?,
            canonical_abbr(&self.away_team_name, &self.away_team_abbr),
            self.away_team_name.clone(),
            fmt_line(away_line),
            canonical_abbr(&self.home_team_name, &self.home_team_abbr),
            self.home_team_name.clone(),
        ])
    }
}

/// Canonical abbreviation for the short display name, falling back to
/// whatever the page itself abbreviated the team as.
fn canonical_abbr(name: &str, scraped: &str) -> String {
    match teams::abbr(name) {
        Some(a) => s!(a),
        None => s!(scraped),
    }
}

/// Render the spread without a trailing ".0" on whole numbers.
fn fmt_line(v: f64) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Stateful stack walk over the scoreboard page.
///
/// Sample markup, much reduced:
/// ```text
/// <header class="Card__Header" aria-label="Sunday, October 31, 2021">
/// <section id="401326412" class="Scoreboard bg-clr-white flex">
///   <div class="ScoreboardScoreCell__Time">1:00 PM</div>
///   <li class="ScoreboardScoreCell__Item--away">
///     <div class="ScoreCell__TeamName">Bengals</div>
///     <span class="sb-team-abbrev">CIN</span>
///   </li>
///   ...
///   <div class="n9">Line : NYJ -10.5</div>
/// </section>
/// ```
pub struct ScheduleExtractor {
    week: u32,
    /// `YYYY-MM-DD` from the most recent day header.
    current_date: String,
    in_scoreboard: bool,
    stack: Vec<Node>,
    games: Vec<GameData>,
}

impl ScheduleExtractor {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            current_date: s!(),
            in_scoreboard: false,
            stack: Vec::new(),
            games: Vec::new(),
        }
    }

    pub fn feed(&mut self, doc: &str) -> Result<(), Box<dyn Error>> {
        for ev in Tokenizer::new(doc) {
            match ev {
                Event::Open { tag, attrs, self_closing } => {
                    self.handle_open(tag, attrs, self_closing)?
                }
                Event::Close { .. } => self.handle_close(),
                Event::Text(t) => self.handle_text(t)?,
            }
        }
        Ok(())
    }

    pub fn into_games(self) -> Vec<GameData> {
        self.games
    }

    fn stack_contains(&self, tag: &str, class_name: &str) -> bool {
        self.stack.iter().any(|n| n.tag == tag && n.has_class(class_name))
    }

    fn handle_open(
        &mut self,
        tag: String,
        attrs: Attrs,
        self_closing: bool,
    ) -> Result<(), Box<dyn Error>> {
        let node = Node::new(tag, attrs);

        // <header class="Card__Header" aria-label="Sunday, October 31, 2021">
        // The bye-week card carries no date.
        if node.tag == "header" && node.has_class("Card__Header") {
            let date_str = node.get_attr("aria-label");
            if date_str != "Bye Week Teams" {
                let date = NaiveDate::parse_from_str(date_str, HEADER_DATE_FMT)
                    .map_err(|_| ScrapeError::MalformedTimestamp(s!(date_str)))?;
                self.current_date = date.format("%Y-%m-%d").to_string();
            }
        }

        // <section id="401326412" class="Scoreboard bg-clr-white flex">
        // Block start: a fresh record becomes current until the stack drains.
        if node.tag == "section" && node.has_class("Scoreboard") {
            self.in_scoreboard = true;
            let mut game = GameData::new(self.week);
            game.game_id = s!(node.get_attr("id"));
            self.games.push(game);
        }

        if self.in_scoreboard && !self_closing {
            self.stack.push(node);
        }
        Ok(())
    }

    fn handle_close(&mut self) {
        if self.in_scoreboard {
            self.stack.pop();
            if self.stack.is_empty() {
                self.in_scoreboard = false;
            }
        }
    }

    fn handle_text(&mut self, raw: &str) -> Result<(), Box<dyn Error>> {
        if !self.in_scoreboard {
            return Ok(());
        }
        let text = clean_text(raw);
        if text.is_empty() {
            return Ok(());
        }

        let in_away = self.stack_contains("li", "ScoreboardScoreCell__Item--away");
        let in_home = self.stack_contains("li", "ScoreboardScoreCell__Item--home");

        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };
        top.text = text.clone();
        let is_line_cell = top.tag == "div" && top.has_class("n9");
        let is_team_name = top.tag == "div" && top.has_class("ScoreCell__TeamName");
        let is_time_cell = top.tag == "div" && top.has_class("ScoreboardScoreCell__Time");
        let is_abbrev = top.tag == "span" && top.has_class("sb-team-abbrev");

        let Some(game) = self.games.last_mut() else {
            return Ok(());
        };

        // <div class="n9 clr-gray-04">Line : KC -6.5</div>
        if is_line_cell {
            if let Some(rest) = text.strip_prefix("Line :") {
                game.line = s!(rest.trim());
                logd!("line: {}", game.line);
            }
        }

        // <div class="ScoreCell__TeamName">Bengals</div>
        if is_team_name {
            match (in_away, in_home) {
                (true, true) => {
                    return Err(ScrapeError::MarkerConflict(s!("team name")).into());
                }
                (true, false) => game.away_team_name = text.clone(),
                (false, true) => game.home_team_name = text.clone(),
                (false, false) => {}
            }
        }

        // <div class="ScoreboardScoreCell__Time">1:00 PM</div>
        if is_time_cell {
            game.date_and_time = format!("{}T{}", self.current_date, text);
        }

        // <span class="sb-team-abbrev">CIN</span>
        if is_abbrev {
            match (in_away, in_home) {
                (true, true) => {
                    return Err(ScrapeError::MarkerConflict(s!("team abbreviation")).into());
                }
                (true, false) => game.away_team_abbr = text.clone(),
                (false, true) => game.home_team_abbr = text.clone(),
                (false, false) => {}
            }
        }

        Ok(())
    }
}

/// Split out for unit tests and the bench.
pub fn parse_doc(doc: &str, week: u32) -> Result<Vec<GameData>, Box<dyn Error>> {
    let mut extractor = ScheduleExtractor::new(week);
    extractor.feed(doc)?;
    Ok(extractor.into_games())
}
