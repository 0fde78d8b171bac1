use std::collections::HashMap;

use tracing::warn;

use crate::config::{history_columns, summary_columns, HISTORY_TABLE, SUMMARY_TABLE};
use crate::error::{AppError, Result};
use crate::types::{Cell, ColumnSpec, PlayerId, Position};

// ---------------------------------------------------------------------------
// Frame: column schema plus row-major cells
// ---------------------------------------------------------------------------

/// A loaded table: declared columns in natural order and one `Vec<Cell>` per row,
/// aligned with the columns.
#[derive(Debug, Clone)]
pub struct Frame {
    table: &'static str,
    columns: Vec<ColumnSpec>,
    /// Numeric column names, derived once from the declared kinds.
    numeric: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(table: &'static str, columns: Vec<ColumnSpec>, rows: Vec<Vec<Cell>>) -> Self {
        let numeric = columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| c.name.clone())
            .collect();
        Self { table, columns, numeric, rows }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column position of a metric requested by a caller.
    pub fn metric_index(&self, metric: &str) -> Result<usize> {
        self.column_index(metric).ok_or_else(|| AppError::UnknownMetric {
            table: self.table,
            metric: metric.to_string(),
        })
    }

    /// The `col`-th cell of row `row`.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    fn required(&self, column: &'static str) -> Result<usize> {
        self.column_index(column).ok_or(AppError::MissingColumn {
            table: self.table,
            column,
        })
    }
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub first_name: String,
    pub second_name: String,
    /// None when `element_type` is outside 1..=4.
    pub position: Option<Position>,
    pub now_cost: Cell,
}

impl PlayerSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
    }
}

/// `player_summary`, one row per player. Ids are unique.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    frame: Frame,
    players: Vec<PlayerSummary>,
    by_id: HashMap<PlayerId, usize>,
}

impl SummaryTable {
    pub fn from_frame(frame: Frame) -> Result<Self> {
        let id_col = frame.required(summary_columns::ID)?;
        let first_col = frame.required(summary_columns::FIRST_NAME)?;
        let second_col = frame.required(summary_columns::SECOND_NAME)?;
        let position_col = frame.required(summary_columns::POSITION)?;
        let cost_col = frame.required(summary_columns::COST)?;

        let mut players = Vec::with_capacity(frame.len());
        let mut by_id = HashMap::with_capacity(frame.len());
        let mut unplaced = 0usize;

        for (i, row) in frame.rows().iter().enumerate() {
            let id = row[id_col].as_i64().ok_or_else(|| AppError::InvalidValue {
                table: SUMMARY_TABLE,
                column: summary_columns::ID.to_string(),
                row: i,
            })?;
            if by_id.insert(id, i).is_some() {
                return Err(AppError::DuplicatePlayer(id));
            }
            let position = row[position_col].as_i64().and_then(Position::from_code);
            if position.is_none() {
                unplaced += 1;
            }
            players.push(PlayerSummary {
                id,
                first_name: row[first_col].to_text(),
                second_name: row[second_col].to_text(),
                position,
                now_cost: row[cost_col].clone(),
            });
        }

        if unplaced > 0 {
            warn!(
                table = SUMMARY_TABLE,
                rows = unplaced,
                "{unplaced} players have no known position and are left out of the summary chart"
            );
        }

        Ok(Self { frame, players, by_id })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn players(&self) -> &[PlayerSummary] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Row position of a player id.
    pub fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerSummary> {
        self.position_of(id)
            .map(|i| &self.players[i])
            .ok_or(AppError::UnknownPlayer(id))
    }
}

// ---------------------------------------------------------------------------
// History table
// ---------------------------------------------------------------------------

/// `player_history` at its latest snapshot: one row per player per round.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    frame: Frame,
    round_col: usize,
    timestamp_col: usize,
    /// player id → row positions, in stored order
    by_player: HashMap<PlayerId, Vec<usize>>,
}

impl HistoryTable {
    pub fn from_frame(frame: Frame) -> Result<Self> {
        let player_col = frame.required(history_columns::PLAYER)?;
        let round_col = frame.required(history_columns::ROUND)?;
        let timestamp_col = frame.required(history_columns::TIMESTAMP)?;

        let mut by_player: HashMap<PlayerId, Vec<usize>> = HashMap::new();
        let mut orphaned = 0usize;
        for (i, row) in frame.rows().iter().enumerate() {
            match row[player_col].as_i64() {
                Some(id) => by_player.entry(id).or_default().push(i),
                None => orphaned += 1,
            }
        }
        if orphaned > 0 {
            warn!(
                table = HISTORY_TABLE,
                rows = orphaned,
                "{orphaned} history rows have no player id and will never be plotted"
            );
        }

        Ok(Self { frame, round_col, timestamp_col, by_player })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn round_col(&self) -> usize {
        self.round_col
    }

    /// Row positions for one player; empty when the player has no history.
    pub fn rows_for(&self, id: PlayerId) -> &[usize] {
        self.by_player.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Timestamp shared by every loaded row.
    pub fn snapshot(&self) -> Option<&Cell> {
        self.frame.rows().first().map(|row| &row[self.timestamp_col])
    }
}

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

/// Both tables, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct DataStore {
    summary: SummaryTable,
    history: HistoryTable,
}

impl DataStore {
    pub fn new(summary: SummaryTable, history: HistoryTable) -> Self {
        Self { summary, history }
    }

    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    pub fn summary_numeric_columns(&self) -> &[String] {
        self.summary.frame().numeric_columns()
    }

    pub fn history_numeric_columns(&self) -> &[String] {
        self.history.frame().numeric_columns()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
