// tests/schedule_e2e.rs
//
// Drives runner::run end-to-end over temp dirs with saved synthetic pages.
//
use std::fs;
use std::path::{Path, PathBuf};

use nfl_scrape::csv::{Delim, parse_rows};
use nfl_scrape::error::ScrapeError;
use nfl_scrape::params::Params;
use nfl_scrape::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("nfl_e2e_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn day_header(label: &str) -> String {
    format!(r#"<header class="Card__Header" aria-label="{label}"></header>"#)
}

fn section(id: &str, time: &str, away: (&str, &str), home: (&str, &str), line: &str) -> String {
    format!(
        r#"
        <section id="{id}" class="Scoreboard bg-clr-white flex flex-auto">
          <div class="ScoreboardScoreCell__Time Scoreboard__Time h9">{time}</div>
          <ul class="ScoreboardScoreCell__Competitors">
            <li class="ScoreboardScoreCell__Item ScoreboardScoreCell__Item--away">
              <div class="ScoreCell__TeamName">{}</div>
              <span class="sb-team-abbrev">{}</span>
            </li>
            <li class="ScoreboardScoreCell__Item ScoreboardScoreCell__Item--home">
              <div class="ScoreCell__TeamName">{}</div>
              <span class="sb-team-abbrev">{}</span>
            </li>
          </ul>
          <div class="n9 clr-gray-04">Line : {line}</div>
        </section>"#,
        away.0, away.1, home.0, home.1,
    )
}

/// Bye-week card: a block with teams but no kickoff cell.
fn bye_section(id: &str) -> String {
    format!(
        r#"
        <section id="{id}" class="Scoreboard bg-clr-white flex">
          <li class="ScoreboardScoreCell__Item ScoreboardScoreCell__Item--away">
            <div class="ScoreCell__TeamName">Raiders</div>
          </li>
        </section>"#
    )
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>NFL Scoreboard</title>\
         <script>window.__data = {{\"x\":\"<section>\"}};</script>\
         </head><body>{body}</body></html>"
    )
}

fn save_page(params: &Params, doc: &str) {
    let path = params.input_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, doc).unwrap();
}

fn params_for(dir: &Path, year: i32, week: u32) -> Params {
    let mut params = Params::new();
    params.year = year;
    params.week = week;
    params.data_dir = dir.join("html");
    params.out = Some(dir.join("out.csv"));
    params
}

#[test]
fn rows_come_out_header_first_and_chronological() {
    let dir = tmp_dir("sorted");
    let params = params_for(&dir, 2021, 8);

    // Sunday games listed late-kickoff-first; Thursday game last in the
    // document. Output must be chronological regardless.
    let body = format!(
        "{}{}{}{}{}",
        day_header("Sunday, October 31, 2021"),
        section("401326421", "8:20 PM", ("Cowboys", "DAL"), ("Vikings", "MIN"), "DAL 1.5"),
        section("401326412", "1:00 PM", ("Bengals", "CIN"), ("Jets", "NYJ"), "CIN 10.5"),
        day_header("Thursday, October 28, 2021"),
        section("401326406", "8:20 PM", ("Packers", "GB"), ("Cardinals", "ARI"), "ARI 3.5"),
    );
    save_page(&params, &page(&body));

    let summary = runner::run(&params, None).unwrap();
    assert_eq!(summary.rows_written, 3);

    let text = fs::read_to_string(dir.join("out.csv")).unwrap();
    let rows = parse_rows(&text, Delim::Csv);
    assert_eq!(rows.len(), 4); // header + 3 games

    assert_eq!(
        rows[0],
        vec![
            "week", "game_id", "date_and_time", "away_team_abbr", "away_team_name",
            "away_team_line", "home_team_abbr", "home_team_name",
        ]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
    );

    let ids: Vec<&str> = rows[1..].iter().map(|r| r[1].as_str()).collect();
    assert_eq!(ids, vec!["401326406", "401326412", "401326421"]);

    let kickoffs: Vec<&str> = rows[1..].iter().map(|r| r[2].as_str()).collect();
    assert_eq!(
        kickoffs,
        vec!["2021-10-28 20:20", "2021-10-31 13:00", "2021-10-31 20:20"]
    );

    // Away line signs: ARI favored at home over GB -> -3.5 for the away side.
    let by_id = |id: &str| rows[1..].iter().find(|r| r[1] == id).unwrap();
    assert_eq!(by_id("401326406")[5], "-3.5");
    assert_eq!(by_id("401326412")[5], "10.5");
    assert_eq!(by_id("401326421")[5], "1.5");
    assert_eq!(by_id("401326421")[0], "8");
}

#[test]
fn bye_blocks_are_dropped() {
    let dir = tmp_dir("bye");
    let params = params_for(&dir, 2021, 14);
    let body = format!(
        "{}{}{}{}",
        day_header("Bye Week Teams"),
        bye_section("bye1"),
        day_header("Sunday, December 12, 2021"),
        section("401326500", "1:00 PM", ("Saints", "NO"), ("Jets", "NYJ"), "NO 5.5"),
    );
    save_page(&params, &page(&body));

    let summary = runner::run(&params, None).unwrap();
    assert_eq!(summary.rows_written, 1);

    let text = fs::read_to_string(dir.join("out.csv")).unwrap();
    let rows = parse_rows(&text, Delim::Csv);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "401326500");
}

#[test]
fn missing_input_aborts_without_output() {
    let dir = tmp_dir("missing");
    let params = params_for(&dir, 2021, 8);

    let err = runner::run(&params, None).unwrap_err();
    let err = err.downcast::<ScrapeError>().unwrap();
    assert!(matches!(*err, ScrapeError::MissingInput(_)));
    assert!(!dir.join("out.csv").exists());
}

#[test]
fn malformed_line_aborts_without_output() {
    let dir = tmp_dir("badline");
    let params = params_for(&dir, 2021, 8);
    let body = format!(
        "{}{}",
        day_header("Sunday, October 31, 2021"),
        section("401326412", "1:00 PM", ("Bengals", "CIN"), ("Jets", "NYJ"), "CIN -ten"),
    );
    save_page(&params, &page(&body));

    let err = runner::run(&params, None).unwrap_err();
    let err = err.downcast::<ScrapeError>().unwrap();
    assert!(matches!(*err, ScrapeError::MalformedOddsLine(_)));
    assert!(!dir.join("out.csv").exists());
}

#[test]
fn tsv_output_respects_format() {
    let dir = tmp_dir("tsv");
    let mut params = params_for(&dir, 2021, 8);
    params.format = Delim::Tsv;
    params.out = Some(dir.join("out.tsv"));
    let body = format!(
        "{}{}",
        day_header("Sunday, October 31, 2021"),
        section("401326412", "1:00 PM", ("Bengals", "CIN"), ("Jets", "NYJ"), "EVEN"),
    );
    save_page(&params, &page(&body));

    runner::run(&params, None).unwrap();
    let text = fs::read_to_string(dir.join("out.tsv")).unwrap();
    assert!(text.starts_with("week\tgame_id\t"));
    assert!(text.contains("\t0\t")); // EVEN renders as 0
}
