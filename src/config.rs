use crate::error::{AppError, Result};
use crate::types::RenderStyle;

pub const SUMMARY_TABLE: &str = "player_summary";
pub const HISTORY_TABLE: &str = "player_history";

/// Required `player_summary` columns.
pub mod summary_columns {
    pub const ID: &str = "id";
    pub const FIRST_NAME: &str = "first_name";
    pub const SECOND_NAME: &str = "second_name";
    pub const POSITION: &str = "element_type";
    pub const COST: &str = "now_cost";
}

/// Required `player_history` columns.
pub mod history_columns {
    pub const PLAYER: &str = "element";
    pub const ROUND: &str = "round";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Summary chart axes when the request names none.
pub const DEFAULT_SUMMARY_X: &str = "minutes";
pub const DEFAULT_SUMMARY_Y: &str = "goals_conceded";

/// History chart metric and style when the request names none.
pub const DEFAULT_HISTORY_METRIC: &str = "goals_conceded";
pub const DEFAULT_HISTORY_STYLE: RenderStyle = RenderStyle::LinesAndMarkers;

/// Loader connection pool size. Loading runs once, so one connection is plenty.
pub const DB_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// SQLite file holding player_summary and player_history (DB_PATH)
    pub db_path: String,
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "fantasy_football.db".to_string()),
            api_host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "8050".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
