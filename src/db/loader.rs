use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, ValueRef};
use tracing::{debug, info};

use crate::config::{DB_MAX_CONNECTIONS, HISTORY_TABLE, SUMMARY_TABLE};
use crate::db::models::{ColumnInfoRow, HISTORY_QUERY, SUMMARY_QUERY, TABLE_INFO_QUERY};
use crate::error::{AppError, Result};
use crate::state::{DataStore, Frame, HistoryTable, SummaryTable};
use crate::types::{Cell, ColumnKind, ColumnSpec};

/// Opens the source database read-only.
pub async fn connect(db_path: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .connect(&format!("sqlite:{db_path}?mode=ro"))
        .await?;
    Ok(pool)
}

/// Reads both player tables into an immutable [`DataStore`].
/// Any failure here is fatal: the dashboard has nothing to show without data.
pub async fn load(pool: &SqlitePool) -> Result<DataStore> {
    let summary = load_frame(pool, SUMMARY_TABLE, SUMMARY_QUERY).await?;
    let summary = SummaryTable::from_frame(summary)?;
    info!(
        table = SUMMARY_TABLE,
        rows = summary.len(),
        numeric_columns = summary.frame().numeric_columns().len(),
        "Loaded {} players",
        summary.len(),
    );

    let history = load_frame(pool, HISTORY_TABLE, HISTORY_QUERY).await?;
    let history = HistoryTable::from_frame(history)?;
    info!(
        table = HISTORY_TABLE,
        rows = history.len(),
        numeric_columns = history.frame().numeric_columns().len(),
        snapshot = ?history.snapshot(),
        "Loaded {} history rows at latest snapshot",
        history.len(),
    );

    Ok(DataStore::new(summary, history))
}

async fn load_frame(pool: &SqlitePool, table: &'static str, query: &str) -> Result<Frame> {
    let columns = table_schema(pool, table).await?;
    let rows = sqlx::query(query).fetch_all(pool).await?;
    debug!(table, columns = columns.len(), rows = rows.len(), "Fetched source rows");

    let mut cells = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let decoded = columns
            .iter()
            .map(|c| {
                decode_cell(row, &c.name, c.kind).ok_or_else(|| AppError::InvalidValue {
                    table,
                    column: c.name.clone(),
                    row: i,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        cells.push(decoded);
    }

    Ok(Frame::new(table, columns, cells))
}

/// Declared column types, read from the catalog so empty tables still have a schema.
async fn table_schema(pool: &SqlitePool, table: &'static str) -> Result<Vec<ColumnSpec>> {
    let info: Vec<ColumnInfoRow> = sqlx::query_as(TABLE_INFO_QUERY)
        .bind(table)
        .fetch_all(pool)
        .await?;
    if info.is_empty() {
        return Err(AppError::MissingTable(table.to_string()));
    }
    Ok(info
        .into_iter()
        .map(|c| {
            debug!(table, cid = c.cid, column = %c.name, declared = %c.declared_type, "Column");
            ColumnSpec::new(c.name, ColumnKind::from_declared(&c.declared_type))
        })
        .collect())
}

/// Decodes one value, preferring the representation the declared kind suggests.
/// SQLite stores values dynamically, so fall back to whatever storage class is present.
fn decode_cell(row: &SqliteRow, name: &str, kind: ColumnKind) -> Option<Cell> {
    let is_null = row.try_get_raw(name).ok()?.is_null();
    if is_null {
        return Some(Cell::Null);
    }

    let int = || row.try_get::<i64, _>(name).ok().map(Cell::Int);
    let float = || row.try_get::<f64, _>(name).ok().map(Cell::Float);
    let text = || row.try_get::<String, _>(name).ok().map(Cell::Text);

    match kind {
        ColumnKind::Integer | ColumnKind::Boolean => int().or_else(float).or_else(text),
        ColumnKind::Float => float()
            .or_else(|| row.try_get::<i64, _>(name).ok().map(|v| Cell::Float(v as f64)))
            .or_else(text),
        ColumnKind::Text | ColumnKind::Temporal | ColumnKind::Other => {
            text().or_else(int).or_else(float)
        }
    }
}
