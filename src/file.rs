// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::csv::{Delim, rows_to_string};

/// Write header + rows through a sibling temp file, renaming into place on
/// success. A failed run never leaves a truncated output behind.
pub fn write_rows_atomic(
    path: &Path,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    delim: Delim,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = rows_to_string(rows, &headers.map(|h| h.to_vec()), delim);

    let mut tmp = path.to_path_buf();
    let file_name = tmp
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("out"));
    tmp.set_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Resolve a user-supplied `-o` value against the default filename:
/// empty → default; a directory (or trailing-slash hint) → joined default.
pub fn resolve_out_path(
    user_o: Option<&Path>,
    default_path: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let Some(p) = user_o else {
        return Ok(default_path.to_path_buf());
    };
    if looks_like_dir_hint(p) || p.is_dir() {
        ensure_directory(p)?;
        let name = default_path
            .file_name()
            .ok_or("Default output path has no filename")?;
        Ok(p.join(name))
    } else {
        Ok(p.to_path_buf())
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("nfl_file_{name}"));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tmp_dir("atomic");
        let path = dir.join("week8.csv");
        let headers = vec![s!("a"), s!("b")];
        let rows = vec![vec![s!("1"), s!("2")]];

        write_rows_atomic(&path, Some(&headers), &rows, Delim::Csv).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "stray temp files: {leftovers:?}");
    }

    #[test]
    fn out_path_dir_hint_joins_default_name() {
        let dir = tmp_dir("hint");
        let hinted = format!("{}/", dir.display());
        let resolved = resolve_out_path(
            Some(Path::new(&hinted)),
            Path::new("output/nfl/2021/week8.csv"),
        )
        .unwrap();
        assert!(resolved.ends_with("week8.csv"));
        assert!(resolved.starts_with(&dir));
    }
}
