// tests/squares_grid.rs
//
// Squares page through runner::run: pick sheets, seeds, grid shape.
//
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use nfl_scrape::csv::{Delim, parse_rows};
use nfl_scrape::params::{PageKind, Params};
use nfl_scrape::progress::NullProgress;
use nfl_scrape::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("nfl_squares_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn squares_params(out: PathBuf) -> Params {
    let mut params = Params::new();
    params.page = PageKind::Squares;
    params.out = Some(out);
    params
}

#[test]
fn default_sheet_fills_ten_rows_of_ten() {
    let dir = tmp_dir("default");
    let mut params = squares_params(dir.join("grid.csv"));
    params.seed = Some(1);

    let summary = runner::run(&params, None).unwrap();
    assert_eq!(summary.rows_written, 10);

    let rows = parse_rows(&fs::read_to_string(dir.join("grid.csv")).unwrap(), Delim::Csv);
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.len() == 10));
}

#[test]
fn pick_sheet_allotments_survive_the_shuffle() {
    let dir = tmp_dir("sheet");
    let sheet = dir.join("picks.csv");
    fs::write(&sheet, "DS,4\nKenK,6\nRL,9\nBH,1\n").unwrap();

    let mut params = squares_params(dir.join("grid.csv"));
    params.picks = Some(sheet);
    params.seed = Some(99);
    runner::run(&params, None).unwrap();

    let rows = parse_rows(&fs::read_to_string(dir.join("grid.csv")).unwrap(), Delim::Csv);
    let mut counts: HashMap<String, u32> = HashMap::new();
    for cell in rows.iter().flatten() {
        *counts.entry(cell.clone()).or_default() += 1;
    }
    assert_eq!(counts.get("DS"), Some(&4));
    assert_eq!(counts.get("KenK"), Some(&6));
    assert_eq!(counts.get("RL"), Some(&9));
    assert_eq!(counts.get("BH"), Some(&1));
    assert_eq!(counts.values().sum::<u32>(), 20);

    // 20 squares -> two full rows
    assert_eq!(rows.len(), 2);
}

#[test]
fn same_seed_same_grid() {
    let dir = tmp_dir("seeded");
    let mut a = squares_params(dir.join("a.csv"));
    a.seed = Some(42);
    let mut b = squares_params(dir.join("b.csv"));
    b.seed = Some(42);

    runner::run(&a, Some(&mut NullProgress)).unwrap();
    runner::run(&b, None).unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("a.csv")).unwrap(),
        fs::read_to_string(dir.join("b.csv")).unwrap(),
    );
}

#[test]
fn malformed_pick_sheet_is_rejected() {
    let dir = tmp_dir("badsheet");
    let sheet = dir.join("picks.csv");
    fs::write(&sheet, "DS,4\nKenK\n").unwrap();

    let mut params = squares_params(dir.join("grid.csv"));
    params.picks = Some(sheet);
    assert!(runner::run(&params, None).is_err());
    assert!(!dir.join("grid.csv").exists());
}
