use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::{DataStore, PlayerSummary};
use crate::types::{Cell, PlayerId, Selection};

/// Player table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerTableRow {
    pub full_name: String,
    pub now_cost: Cell,
}

impl From<&PlayerSummary> for PlayerTableRow {
    fn from(p: &PlayerSummary) -> Self {
        Self {
            full_name: p.full_name(),
            now_cost: p.now_cost.clone(),
        }
    }
}

/// Player chooser entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerOption {
    pub label: String,
    pub value: PlayerId,
}

/// Rows of the player table for the current summary chart selection.
///
/// Point indices are positions in the summary table and must line up with the
/// order rows were plotted in; an index past the end means the two have drifted
/// apart and is reported, never clamped. Id selections avoid that coupling.
pub fn select_players(store: &DataStore, selection: &Selection) -> Result<Vec<PlayerTableRow>> {
    let summary = store.summary();
    let players = summary.players();

    match selection {
        Selection::All => Ok(players.iter().map(PlayerTableRow::from).collect()),
        Selection::PointIndices(indices) => indices
            .iter()
            .map(|&index| {
                players
                    .get(index)
                    .map(PlayerTableRow::from)
                    .ok_or(AppError::IndexOutOfRange { index, len: players.len() })
            })
            .collect(),
        Selection::PlayerIds(ids) => ids
            .iter()
            .map(|&id| summary.player(id).map(PlayerTableRow::from))
            .collect(),
    }
}

/// Every player as a `{label, value}` option, in table order.
pub fn player_options(store: &DataStore) -> Vec<PlayerOption> {
    store
        .summary()
        .players()
        .iter()
        .map(|p| PlayerOption { label: p.full_name(), value: p.id })
        .collect()
}
