//! Fixture tables shared by the unit tests.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::{HISTORY_TABLE, SUMMARY_TABLE};
use crate::state::{DataStore, Frame, HistoryTable, SummaryTable};
use crate::types::{Cell, ColumnKind, ColumnSpec};

pub const SNAPSHOT: &str = "2019-09-02 08:00:00";
pub const STALE_SNAPSHOT: &str = "2019-08-26 08:00:00";

pub fn summary_row(
    id: i64,
    first: &str,
    second: &str,
    element_type: i64,
    now_cost: i64,
    minutes: i64,
    goals_conceded: i64,
) -> Vec<Cell> {
    vec![
        Cell::Int(id),
        Cell::Text(first.to_string()),
        Cell::Text(second.to_string()),
        Cell::Int(element_type),
        Cell::Int(now_cost),
        Cell::Int(minutes),
        Cell::Int(goals_conceded),
    ]
}

pub fn summary_frame(rows: Vec<Vec<Cell>>) -> Frame {
    Frame::new(
        SUMMARY_TABLE,
        vec![
            ColumnSpec::new("id", ColumnKind::Integer),
            ColumnSpec::new("first_name", ColumnKind::Text),
            ColumnSpec::new("second_name", ColumnKind::Text),
            ColumnSpec::new("element_type", ColumnKind::Integer),
            ColumnSpec::new("now_cost", ColumnKind::Integer),
            ColumnSpec::new("minutes", ColumnKind::Integer),
            ColumnSpec::new("goals_conceded", ColumnKind::Integer),
        ],
        rows,
    )
}

/// History rows as `(element, round, goals_conceded)`, all at [`SNAPSHOT`].
pub fn history_frame(rows: Vec<(i64, i64, i64)>) -> Frame {
    Frame::new(
        HISTORY_TABLE,
        vec![
            ColumnSpec::new("element", ColumnKind::Integer),
            ColumnSpec::new("round", ColumnKind::Integer),
            ColumnSpec::new("timestamp", ColumnKind::Temporal),
            ColumnSpec::new("goals_conceded", ColumnKind::Integer),
        ],
        rows.into_iter()
            .map(|(element, round, goals)| {
                vec![
                    Cell::Int(element),
                    Cell::Int(round),
                    Cell::Text(SNAPSHOT.to_string()),
                    Cell::Int(goals),
                ]
            })
            .collect(),
    )
}

/// Joe Bloggs (MF, id 1) and Jane Doe (DF, id 2), with two rounds of history each
/// plus a history-only player 99.
pub fn sample_store() -> DataStore {
    let summary = SummaryTable::from_frame(summary_frame(vec![
        summary_row(1, "Joe", "Bloggs", 3, 55, 900, 10),
        summary_row(2, "Jane", "Doe", 2, 45, 810, 7),
    ]))
    .unwrap();
    let history = HistoryTable::from_frame(history_frame(vec![
        (1, 1, 0),
        (2, 1, 2),
        (1, 2, 1),
        (2, 2, 0),
        (99, 1, 4),
    ]))
    .unwrap();
    DataStore::new(summary, history)
}

/// In-memory database with both source tables. History carries a stale snapshot
/// that the loader must ignore.
pub async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(&format!(
        r#"
        CREATE TABLE player_summary (
            id INTEGER NOT NULL,
            first_name VARCHAR(64),
            second_name VARCHAR(64),
            element_type INTEGER,
            now_cost INTEGER,
            minutes INTEGER,
            goals_conceded INTEGER,
            ict_index REAL,
            in_dreamteam BOOLEAN
        );
        INSERT INTO player_summary VALUES (1, 'Joe', 'Bloggs', 3, 55, 900, 10, 12.5, 0);
        INSERT INTO player_summary VALUES (2, 'Jane', 'Doe', 2, 45, 810, 7, NULL, 1);

        CREATE TABLE player_history (
            element INTEGER,
            round INTEGER,
            timestamp DATETIME,
            goals_conceded INTEGER,
            total_points INTEGER
        );
        INSERT INTO player_history VALUES (1, 2, '{SNAPSHOT}', 1, 2);
        INSERT INTO player_history VALUES (1, 1, '{SNAPSHOT}', 0, 6);
        INSERT INTO player_history VALUES (2, 1, '{SNAPSHOT}', 2, 1);
        INSERT INTO player_history VALUES (1, 1, '{STALE_SNAPSHOT}', 3, 1);
        "#
    ))
    .execute(&pool)
    .await
    .unwrap();

    pool
}
