//! Source queries and row types for the two player tables.

/// Every player, current-state attributes.
pub const SUMMARY_QUERY: &str = "SELECT * FROM player_summary";

/// History rows at the latest snapshot only.
pub const HISTORY_QUERY: &str = r#"
    SELECT a.*
    FROM player_history a
    JOIN (SELECT MAX(timestamp) AS timestamp FROM player_history) b
      ON a.timestamp = b.timestamp
    ORDER BY a.round
"#;

/// Declared schema of a table, in column order.
pub const TABLE_INFO_QUERY: &str =
    "SELECT cid, name, type AS declared_type FROM pragma_table_info(?) ORDER BY cid";

/// One row of `pragma_table_info`.
#[derive(Debug, sqlx::FromRow)]
pub struct ColumnInfoRow {
    pub cid: i64,
    pub name: String,
    pub declared_type: String,
}
