use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Player identifier (`player_summary.id`, `player_history.element`).
pub type PlayerId = i64;

// ---------------------------------------------------------------------------
// Cells and column kinds
// ---------------------------------------------------------------------------

/// One value of one column in one loaded row.
/// Serializes as a bare JSON number, string, or null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Integer view. Floats only convert when they carry no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Text view used for name fields. Null renders as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => v.to_string(),
            Cell::Null => String::new(),
        }
    }
}

/// Declared-type classification of a column, following SQLite affinity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
    Temporal,
    Other,
}

impl ColumnKind {
    pub fn from_declared(declared: &str) -> Self {
        let t = declared.to_ascii_uppercase();
        if t.contains("BOOL") {
            ColumnKind::Boolean
        } else if t.contains("INT") {
            ColumnKind::Integer
        } else if t.contains("CHAR") || t.contains("CLOB") || t.contains("TEXT") {
            ColumnKind::Text
        } else if t.contains("DATE") || t.contains("TIME") {
            ColumnKind::Temporal
        } else if t.contains("REAL")
            || t.contains("FLOA")
            || t.contains("DOUB")
            || t.contains("NUMERIC")
            || t.contains("DECIMAL")
        {
            ColumnKind::Float
        } else {
            ColumnKind::Other
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self { name: name.into(), kind }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Player role, encoded 1..=4 in `player_summary.element_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Summary chart trace order.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Render style
// ---------------------------------------------------------------------------

/// Plotly scatter `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStyle {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesAndMarkers,
}

impl RenderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderStyle::Lines => "lines",
            RenderStyle::Markers => "markers",
            RenderStyle::LinesAndMarkers => "lines+markers",
        }
    }
}

impl std::str::FromStr for RenderStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lines" => Ok(RenderStyle::Lines),
            "markers" => Ok(RenderStyle::Markers),
            // `+` arrives as a space when the query string is not percent-encoded
            "lines+markers" | "lines markers" => Ok(RenderStyle::LinesAndMarkers),
            other => Err(AppError::InvalidParameter(format!("unknown style {other:?}"))),
        }
    }
}

impl std::fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Interaction inputs
// ---------------------------------------------------------------------------

/// Summary chart selection driving the player table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected: every player.
    #[default]
    All,
    /// Positions in the summary table, in the order the chart reported them.
    PointIndices(Vec<usize>),
    /// Player ids carried on the selected points.
    PlayerIds(Vec<PlayerId>),
}

/// One or many players for the history chart. Both forms behave the same.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlayerChoice {
    One(PlayerId),
    Many(Vec<PlayerId>),
}

impl PlayerChoice {
    pub fn ids(&self) -> &[PlayerId] {
        match self {
            PlayerChoice::One(id) => std::slice::from_ref(id),
            PlayerChoice::Many(ids) => ids,
        }
    }
}

impl From<PlayerId> for PlayerChoice {
    fn from(id: PlayerId) -> Self {
        PlayerChoice::One(id)
    }
}

impl From<Vec<PlayerId>> for PlayerChoice {
    fn from(ids: Vec<PlayerId>) -> Self {
        PlayerChoice::Many(ids)
    }
}
