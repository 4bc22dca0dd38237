// src/runner.rs
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::{
    core::net,
    error::ScrapeError,
    file::{ensure_directory, resolve_out_path, write_rows_atomic},
    params::{DEFAULT_SQUARES_FILE, PageKind, Params},
    progress::Progress,
    specs::schedule::{self, GameData},
    squares,
};

/// Summary of what was produced.
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub rows_written: usize,
}

pub const SCHEDULE_HEADERS: [&str; 8] = [
    "week",
    "game_id",
    "date_and_time",
    "away_team_abbr",
    "away_team_name",
    "away_team_line",
    "home_team_abbr",
    "home_team_name",
];

fn schedule_headers() -> Vec<String> {
    SCHEDULE_HEADERS.iter().map(|h| s!(*h)).collect()
}

/// Top-level runner: dispatch on page kind and run.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    params: &Params,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    match params.page {
        PageKind::Schedule => get_schedule(params, progress),
        PageKind::Squares => get_squares(params, progress),
    }
}

/* ---------------- Schedule implementation ---------------- */

fn get_schedule(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let doc = load_source(params, progress.as_deref_mut())?;

    let games = schedule::parse_doc(&doc, params.week)?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(games.len());
    }

    // Bye-week cards produce blocks without a kickoff; drop them, loudly.
    let mut keyed: Vec<(NaiveDateTime, GameData)> = Vec::with_capacity(games.len());
    for game in games {
        if game.date_and_time.is_empty() {
            logw!("Dropping scoreboard block without kickoff (game id {:?})", game.game_id);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Skipping block without kickoff (id {:?})", game.game_id));
            }
            continue;
        }
        let at = game.kickoff_instant()?;
        keyed.push((at, game));
    }
    // Stable, so same-kickoff games keep document order.
    keyed.sort_by_key(|(at, _)| *at);

    let mut rows = Vec::with_capacity(keyed.len());
    for (_, game) in &keyed {
        rows.push(game.to_row()?);
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&game.game_id);
        }
    }

    let out = resolve_out_path(params.out.as_deref(), &params.default_out_path())?;
    write_rows_atomic(&out, Some(&schedule_headers()), &rows, params.format)?;
    logf!("Wrote {} schedule rows to {}", rows.len(), out.display());

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(RunSummary { files_written: vec![out], rows_written: rows.len() })
}

/// Prefer the saved page; fall back to a live fetch (cached for next time)
/// when allowed. Absent input without `--fetch` aborts the run.
fn load_source(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<String, Box<dyn Error>> {
    let path = params.input_path();
    if path.is_file() {
        return Ok(fs::read_to_string(&path)?);
    }
    if !params.fetch {
        return Err(ScrapeError::MissingInput(path).into());
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {} week {}", params.year, params.week));
    }
    let doc = net::get_scoreboard(params.year, params.week)?;

    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    fs::write(&path, &doc)?;
    logf!("Cached scoreboard page to {}", path.display());
    Ok(doc)
}

/* ---------------- Squares implementation ---------------- */

fn get_squares(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let picks = match &params.picks {
        Some(path) => squares::load_picks(path)?,
        None => squares::default_picks(),
    };
    let mut pool = squares::build_pool(&picks);
    squares::shuffle_pool(&mut pool, params.seed);
    let rows = squares::grid_rows(&pool);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(rows.len());
        p.log(&format!("{} squares across {} participants", pool.len(), picks.len()));
    }

    let out = resolve_out_path(params.out.as_deref(), Path::new(DEFAULT_SQUARES_FILE))?;
    write_rows_atomic(&out, None, &rows, params.format)?;
    logf!("Wrote {} grid rows to {}", rows.len(), out.display());

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(RunSummary { rows_written: rows.len(), files_written: vec![out] })
}
