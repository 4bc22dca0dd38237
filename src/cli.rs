// src/cli.rs
use std::{env, path::PathBuf};

use crate::csv::Delim;
use crate::params::{PageKind, Params};
use crate::progress::Progress;
use crate::runner;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::new();
    parse_cli(&mut params, env::args().skip(1))?;

    let mut progress = ConsoleProgress;
    let summary = runner::run(&params, Some(&mut progress))?;
    for path in &summary.files_written {
        println!("{} rows -> {}", summary.rows_written, path.display());
    }
    Ok(())
}

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

fn parse_cli<I>(params: &mut Params, mut args: I) -> Result<(), Box<dyn std::error::Error>>
where
    I: Iterator<Item = String>,
{
    let mut positionals: Vec<String> = Vec::new();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--page" => {
                let v = args.next().ok_or("Missing value for --page")?;
                params.page = match v.to_ascii_lowercase().as_str() {
                    "schedule" => PageKind::Schedule,
                    "squares" => PageKind::Squares,
                    other => return Err(format!("Unknown page: {}", other).into()),
                };}
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--data-dir" => params.data_dir = PathBuf::from(args.next().ok_or("Missing value for --data-dir")?),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--fetch" => params.fetch = true,
            "--picks" => params.picks = Some(PathBuf::from(args.next().ok_or("Missing value for --picks")?)),
            "--seed" => {
                let v = args.next().ok_or("Missing value for --seed")?;
                params.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {}", v))?);}
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            other if other.starts_with('-') => return Err(format!("Unknown arg: {}", other).into()),
            _ => positionals.push(a.clone()),
        }
    }

    match positionals.len() {
        0 => {} // configuration defaults
        2 => {
            params.year = positionals[0]
                .parse()
                .map_err(|_| format!("Invalid year: {}", positionals[0]))?;
            params.week = positionals[1]
                .parse()
                .map_err(|_| format!("Invalid week: {}", positionals[1]))?;
            if params.week == 0 || params.week > 18 {
                return Err("Week out of range (1..18)".into());
            }
        }
        _ => return Err("Expected positional arguments: <year> <week>".into()),
    }

    Ok(())
}
