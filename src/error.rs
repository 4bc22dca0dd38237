// src/error.rs
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Fatal conditions for a scrape run. No retries anywhere; every one of
/// these aborts the run and surfaces to the console.
#[derive(Debug)]
pub enum ScrapeError {
    /// Source document absent and fetching not enabled.
    MissingInput(PathBuf),
    /// Date/time text that doesn't match the expected page pattern.
    MalformedTimestamp(String),
    /// Odds line whose magnitude isn't numeric.
    MalformedOddsLine(String),
    /// Away and home ancestor markers present at the same time.
    /// The page template nests one side per list item; both at once
    /// means the markup shifted under us.
    MarkerConflict(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::MissingInput(path) => {
                write!(f, "File not found: {}", path.display())
            }
            ScrapeError::MalformedTimestamp(raw) => {
                write!(f, "Unexpected date/time format: {raw:?}")
            }
            ScrapeError::MalformedOddsLine(raw) => {
                write!(f, "Unexpected odds line format: {raw:?}")
            }
            ScrapeError::MarkerConflict(what) => {
                write!(f, "Away and home markers both present while reading {what}")
            }
        }
    }
}

impl Error for ScrapeError {}
