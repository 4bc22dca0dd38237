// src/params.rs
use std::path::PathBuf;

use crate::csv::Delim;

pub const HOST: &str = "www.espn.com";
pub const PREFIX: &str = "/nfl/scoreboard/";

pub const DEFAULT_DATA_DIR: &str = "html/nfl";
pub const DEFAULT_OUT_DIR: &str = "output/nfl";
pub const DEFAULT_SQUARES_FILE: &str = "squares.csv";

// Configuration defaults for the no-argument invocation.
pub const DEFAULT_YEAR: i32 = 2021;
pub const DEFAULT_WEEK: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Schedule,
    Squares,
}

#[derive(Clone)]
pub struct Params {
    pub page: PageKind,              // schedule (default) or squares grid
    pub year: i32,
    pub week: u32,
    pub data_dir: PathBuf,           // where saved scoreboard pages live
    pub out: Option<PathBuf>,        // output override (dir or file)
    pub format: Delim,
    pub fetch: bool,                 // fetch + cache the page when absent
    pub picks: Option<PathBuf>,      // squares: pick sheet file
    pub seed: Option<u64>,           // squares: reproducible shuffle
}

impl Params {
    pub fn new() -> Self {
        Self {
            page: PageKind::Schedule,
            year: DEFAULT_YEAR,
            week: DEFAULT_WEEK,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out: None,
            format: Delim::Csv,
            fetch: false,
            picks: None,
            seed: None,
        }
    }

    /// Saved page for this year/week, e.g. `html/nfl/2021/week8.html`.
    pub fn input_path(&self) -> PathBuf {
        self.data_dir
            .join(self.year.to_string())
            .join(format!("week{}.html", self.week))
    }

    /// Default output file, e.g. `output/nfl/2021/week8.csv`.
    pub fn default_out_path(&self) -> PathBuf {
        PathBuf::from(DEFAULT_OUT_DIR)
            .join(self.year.to_string())
            .join(format!("week{}.{}", self.week, self.format.ext()))
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
