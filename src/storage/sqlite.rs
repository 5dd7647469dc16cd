use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use super::{RoundStore, StorageError};
use crate::model::{HoleRecord, HoleType, RoundAggregate, Tees, Yardages};

const SCHEMA: [&str; 2] = [
    include_str!("../sql/schema/sqlite/00_round.sql"),
    include_str!("../sql/schema/sqlite/01_hole.sql"),
];

const ROUND_COLUMNS: &str =
    "round_id, course_id, tees, date, start_time, end_time, holes_played, is_complete";

const HOLE_COLUMNS: &str = "hole_number, par, blues, whites, reds, hole_type, score, is_scored, \
     advanced_tracking, num_putts, sand_shots, penalties";

/// Rounds in a `round` table, holes in a child `hole` table. Every write runs
/// in one transaction on tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteRoundStore {
    conn: Arc<Mutex<Connection>>,
}

struct RoundRow {
    round_id: String,
    course_id: i64,
    tees: String,
    date: String,
    start_time: String,
    end_time: Option<String>,
    holes_played: i64,
    is_complete: bool,
}

impl SqliteRoundStore {
    /// Opens (or creates) the database file and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the file cannot be opened or the schema fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::init(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the schema fails.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&SCHEMA.join("\n"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StorageError::backend("sqlite connection lock poisoned"))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?
    }
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization(format!("bad timestamp {s}: {e}")))
}

fn write_round(conn: &mut Connection, round: &RoundAggregate) -> Result<(), StorageError> {
    let round_id = round.round_id.to_string();
    let holes_played = i64::try_from(round.holes_played)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    let tx = conn.transaction()?;
    tx.execute(
        &format!(
            "INSERT INTO round ({ROUND_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (round_id) DO UPDATE SET
                course_id = excluded.course_id,
                tees = excluded.tees,
                date = excluded.date,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                holes_played = excluded.holes_played,
                is_complete = excluded.is_complete"
        ),
        params![
            round_id,
            round.course_id,
            round.tees.as_str(),
            format_ts(&round.date),
            format_ts(&round.start_time),
            round.end_time.as_ref().map(format_ts),
            holes_played,
            round.is_complete,
        ],
    )?;
    tx.execute("DELETE FROM hole WHERE round_id = ?1", params![round_id])?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO hole (round_id, {HOLE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ))?;
        for hole in round.holes() {
            stmt.execute(params![
                round_id,
                hole.hole_number(),
                hole.par(),
                hole.yardages.blues,
                hole.yardages.whites,
                hole.yardages.reds,
                hole.hole_type.as_str(),
                hole.score(),
                hole.is_scored(),
                hole.advanced_tracking(),
                hole.num_putts(),
                hole.sand_shots(),
                hole.penalties(),
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn read_holes(conn: &Connection, round_id: &str) -> Result<Vec<HoleRecord>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HOLE_COLUMNS} FROM hole WHERE round_id = ?1 ORDER BY hole_number"
    ))?;
    let holes = stmt
        .query_map(params![round_id], |row| {
            let hole_type: String = row.get(5)?;
            Ok(HoleRecord::restore(
                row.get(0)?,
                row.get(1)?,
                Yardages::new(row.get(2)?, row.get(3)?, row.get(4)?),
                HoleType::from_str_or_default(&hole_type),
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
                row.get(11)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(holes)
}

fn round_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoundRow> {
    Ok(RoundRow {
        round_id: row.get(0)?,
        course_id: row.get(1)?,
        tees: row.get(2)?,
        date: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        holes_played: row.get(6)?,
        is_complete: row.get(7)?,
    })
}

fn assemble(conn: &Connection, row: RoundRow) -> Result<RoundAggregate, StorageError> {
    let round_id = Uuid::parse_str(&row.round_id)
        .map_err(|e| StorageError::Serialization(format!("bad round id {}: {e}", row.round_id)))?;
    let holes = read_holes(conn, &row.round_id)?;
    let end_time = row.end_time.as_deref().map(parse_ts).transpose()?;
    let holes_played = usize::try_from(row.holes_played)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(RoundAggregate::restore(
        round_id,
        row.course_id,
        Tees::from_str_or_default(&row.tees),
        parse_ts(&row.date)?,
        parse_ts(&row.start_time)?,
        end_time,
        holes_played,
        row.is_complete,
        holes,
    ))
}

#[async_trait]
impl RoundStore for SqliteRoundStore {
    async fn save(&self, round: &RoundAggregate) -> Result<(), StorageError> {
        let round = round.clone();
        let round_id = round.round_id;
        self.with_conn(move |conn| write_round(conn, &round)).await?;
        debug!(%round_id, "round saved to sqlite");
        Ok(())
    }

    async fn delete(&self, round_id: Uuid) -> Result<(), StorageError> {
        self.with_conn(move |conn| {
            let id = round_id.to_string();
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM hole WHERE round_id = ?1", params![id])?;
            let removed = tx.execute("DELETE FROM round WHERE round_id = ?1", params![id])?;
            if removed == 0 {
                // dropping tx rolls back
                return Err(StorageError::NotFound(round_id));
            }
            tx.commit()?;
            Ok(())
        })
        .await?;
        debug!(%round_id, "round deleted from sqlite");
        Ok(())
    }

    async fn fetch(&self, round_id: Uuid) -> Result<Option<RoundAggregate>, StorageError> {
        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {ROUND_COLUMNS} FROM round WHERE round_id = ?1"),
                    params![round_id.to_string()],
                    round_row,
                )
                .optional()?;
            row.map(|r| assemble(conn, r)).transpose()
        })
        .await
    }

    async fn fetch_all(&self) -> Result<Vec<RoundAggregate>, StorageError> {
        self.with_conn(|conn| {
            let rows = {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ROUND_COLUMNS} FROM round ORDER BY date DESC"
                ))?;
                stmt.query_map([], round_row)?
                    .collect::<Result<Vec<_>, _>>()?
            };
            rows.into_iter().map(|r| assemble(conn, r)).collect()
        })
        .await
    }
}
