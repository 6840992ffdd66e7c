use chrono::{DateTime, Local};
use itertools::Itertools;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::grading::Grade;

/// Outcome of a graded challenge, as handed to a persistence sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeResult {
    pub challenge_id: String,
    /// Seconds spent in the target zone
    pub time_achieved: f64,
    pub grade: Grade,
}

/// A persisted result row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResult {
    pub user: String,
    pub challenge_id: String,
    pub time_achieved: f64,
    pub grade: Grade,
    pub timestamp: DateTime<Local>,
}

/// Aggregate of a user's saved results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub count: usize,
    /// Mean grade points (A = 4 down to F = 0); zero when there are no results
    pub average_points: f64,
    pub average_grade: Option<Grade>,
}

/// Anything that accepts completed challenge results
pub trait ResultSink {
    fn record_result(&mut self, user: &str, result: &ChallengeResult) -> Result<()>;
}

/// Sink that drops results, for sessions without persistence
#[derive(Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn record_result(&mut self, _user: &str, _result: &ChallengeResult) -> Result<()> {
        Ok(())
    }
}

/// An absent sink (e.g. the database failed to open) drops results.
impl<R: ResultSink> ResultSink for Option<R> {
    fn record_result(&mut self, user: &str, result: &ChallengeResult) -> Result<()> {
        match self {
            Some(sink) => sink.record_result(user, result),
            None => {
                tracing::debug!(user, "no results store, dropping result");
                Ok(())
            }
        }
    }
}

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS challenge_results (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user TEXT NOT NULL,
        challenge_id TEXT NOT NULL,
        time_achieved REAL NOT NULL,
        grade TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_challenge_results_user ON challenge_results(user);
    CREATE INDEX IF NOT EXISTS idx_challenge_results_timestamp ON challenge_results(timestamp);
"#;

/// SQLite store for graded challenge results
#[derive(Debug)]
pub struct ResultsDb {
    conn: Connection,
}

impl ResultsDb {
    /// Open the database at the default state location
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("thump_results.db"));
        Self::open(db_path)
    }

    /// Open (creating if needed) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// A user's results, newest first
    pub fn results_for(&self, user: &str) -> Result<Vec<StoredResult>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user, challenge_id, time_achieved, grade, timestamp
            FROM challenge_results
            WHERE user = ?1
            ORDER BY timestamp DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map([user], |row| {
            let grade_str: String = row.get(3)?;
            let grade = Grade::parse(&grade_str).ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    3,
                    "grade".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;
            let timestamp_str: String = row.get(4)?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        4,
                        "timestamp".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);

            Ok(StoredResult {
                user: row.get(0)?,
                challenge_id: row.get(1)?,
                time_achieved: row.get(2)?,
                grade,
                timestamp,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Best grade per challenge for a user, ordered by challenge id
    pub fn best_grades(&self, user: &str) -> Result<Vec<(String, Grade)>> {
        let results = self.results_for(user)?;
        Ok(results
            .into_iter()
            .into_group_map_by(|r| r.challenge_id.clone())
            .into_iter()
            .filter_map(|(id, rows)| rows.iter().map(|r| r.grade).min().map(|g| (id, g)))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect())
    }

    /// Result count and average grade for a user
    pub fn summary(&self, user: &str) -> Result<ResultsSummary> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT grade, COUNT(*)
            FROM challenge_results
            WHERE user = ?1
            GROUP BY grade
            "#,
        )?;
        let rows = stmt.query_map([user], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut count = 0usize;
        let mut total_points = 0.0;
        for row in rows {
            let (letter, n) = row?;
            let n = usize::try_from(n).unwrap_or(0);
            match Grade::parse(&letter) {
                Some(grade) => {
                    count += n;
                    total_points += grade.points() * n as f64;
                }
                None => tracing::warn!(user, grade = %letter, "skipping unknown grade"),
            }
        }

        if count == 0 {
            return Ok(ResultsSummary {
                count: 0,
                average_points: 0.0,
                average_grade: None,
            });
        }
        let average_points = total_points / count as f64;
        Ok(ResultsSummary {
            count,
            average_points,
            average_grade: Some(Grade::from_points(average_points)),
        })
    }

    /// Write a user's history as CSV, newest first
    pub fn export_csv<W: Write>(&self, user: &str, writer: W) -> Result<usize> {
        let results = self.results_for(user)?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["timestamp", "challenge", "time_achieved", "grade"])?;
        for r in &results {
            csv_writer.write_record([
                r.timestamp.to_rfc3339(),
                r.challenge_id.clone(),
                format!("{:.1}", r.time_achieved),
                r.grade.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(results.len())
    }

    /// Clear all results (for testing or reset purposes)
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM challenge_results", [])?;
        Ok(())
    }

    fn insert(&self, user: &str, result: &ChallengeResult, at: DateTime<Local>) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO challenge_results (user, challenge_id, time_achieved, grade, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                user,
                result.challenge_id,
                result.time_achieved,
                result.grade.to_string(),
                at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

impl ResultSink for ResultsDb {
    fn record_result(&mut self, user: &str, result: &ChallengeResult) -> Result<()> {
        self.insert(user, result, Local::now())?;
        tracing::info!(
            user,
            challenge = %result.challenge_id,
            grade = %result.grade,
            "saved challenge result"
        );
        Ok(())
    }
}
