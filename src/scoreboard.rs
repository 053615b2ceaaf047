//! Local scoreboard persistence — a plain `score,wave,date` CSV.
//!
//! The file is append-only during play and re-read for the game-over screen.
//! A missing file means an empty board; a malformed row is an error so a
//! corrupted file is noticed rather than silently truncated.

use crate::error::{GameError, GameResult};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub score: u32,
    pub wave: u32,
    /// ISO date the run ended, e.g. `2026-08-25`.
    pub date: String,
}

/// Read the whole board, best score first. A missing file is an empty board.
pub fn load_scoreboard(path: &str) -> GameResult<Vec<ScoreRow>> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| GameError::ScoreboardIo {
        path: path.to_string(),
        source,
    })?;

    let mut rows = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(',');
        let row = (|| {
            let score = fields.next()?.trim().parse().ok()?;
            let wave = fields.next()?.trim().parse().ok()?;
            let date = fields.next()?.trim().to_string();
            Some(ScoreRow { score, wave, date })
        })()
        .ok_or(GameError::ScoreboardFormat { line: i + 1 })?;
        rows.push(row);
    }
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(rows)
}

/// Append one finished run, stamped with today's date.
pub fn append_score(path: &str, score: u32, wave: u32) -> GameResult<()> {
    let date = Local::now().format("%Y-%m-%d");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::ScoreboardIo {
            path: path.to_string(),
            source,
        })?;
    writeln!(file, "{score},{wave},{date}").map_err(|source| GameError::ScoreboardIo {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        let mut p = std::env::temp_dir();
        p.push(format!("rockstorm-test-{name}-{}.csv", std::process::id()));
        p.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_is_an_empty_board() {
        let rows = load_scoreboard("/nonexistent/definitely-not-here.csv").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn append_then_load_round_trips_sorted() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        append_score(&path, 1200, 4).unwrap();
        append_score(&path, 4800, 9).unwrap();
        append_score(&path, 300, 1).unwrap();

        let rows = load_scoreboard(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].score, 4800, "best score first");
        assert_eq!(rows[0].wave, 9);
        assert_eq!(rows[2].score, 300);
        assert_eq!(rows[0].date.len(), 10, "ISO yyyy-mm-dd stamp");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_rows_are_reported_with_line_numbers() {
        let path = temp_path("malformed");
        std::fs::write(&path, "100,2,2026-08-25\nnot a row\n").unwrap();

        let err = load_scoreboard(&path).unwrap_err();
        assert!(matches!(err, GameError::ScoreboardFormat { line: 2 }));

        std::fs::remove_file(&path).unwrap();
    }
}
