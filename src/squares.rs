// src/squares.rs
//! Squares pool grid: shuffle every participant's paid-for squares into a
//! 10-wide grid, one cell per square.

use std::{error::Error, fs, path::Path};

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::csv::{Delim, parse_rows};

pub const GRID_WIDTH: usize = 10;

/// The standing pick sheet, used when no `--picks` file is given.
/// Counts sum to 100, one full grid.
pub fn default_picks() -> Vec<(String, u32)> {
    [
        ("DS", 4), ("KenK", 6), ("DF", 9), ("RL", 9), ("SD", 4),
        ("KevK", 4), ("JHan", 4), ("JHor", 10), ("MPit", 4), ("JM", 4),
        ("BVS", 10), ("RH", 10), ("EC", 2), ("MK", 2), ("BS", 2),
        ("RP", 2), ("JF", 4), ("MPoy", 2), ("BL", 3), ("BH", 2),
        ("JVA", 3),
    ]
    .into_iter()
    .map(|(name, n)| (s!(name), n))
    .collect()
}

/// Load a pick sheet from a `label,count` CSV file.
pub fn load_picks(path: &Path) -> Result<Vec<(String, u32)>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let mut out = Vec::new();
    for row in parse_rows(&text, Delim::Csv) {
        if row.len() != 2 {
            return Err(format!("Malformed pick line: {:?}", row.join(",")).into());
        }
        let name = row[0].trim();
        if name.is_empty() {
            return Err("Malformed pick line: empty label".into());
        }
        let count: u32 = row[1].trim().parse()?;
        out.push((s!(name), count));
    }
    if out.is_empty() {
        return Err(format!("No picks in {}", path.display()).into());
    }
    Ok(out)
}

/// One pool entry per square, in sheet order.
pub fn build_pool(picks: &[(String, u32)]) -> Vec<String> {
    let mut pool = Vec::new();
    for (name, count) in picks {
        for _ in 0..*count {
            pool.push(name.clone());
        }
    }
    pool
}

/// Shuffle in place. A seed gives a reproducible grid; otherwise the
/// generator is seeded from OS entropy.
pub fn shuffle_pool(pool: &mut [String], seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    pool.shuffle(&mut rng);
}

/// Lay the pool out 10 per row. The last row is short when the pool
/// isn't a multiple of the width.
pub fn grid_rows(pool: &[String]) -> Vec<Vec<String>> {
    pool.chunks(GRID_WIDTH).map(|c| c.to_vec()).collect()
}
