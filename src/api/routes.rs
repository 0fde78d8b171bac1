use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::health::HealthState;
use crate::api::latency::{Binder, BinderLatency, LatencyReport};
use crate::binders::{
    history_figure, player_options, select_players, summary_figure, Figure, PlayerOption,
    PlayerTableRow,
};
use crate::config::{
    DEFAULT_HISTORY_METRIC, DEFAULT_HISTORY_STYLE, DEFAULT_SUMMARY_X, DEFAULT_SUMMARY_Y,
};
use crate::error::{AppError, Result};
use crate::state::DataStore;
use crate::types::{Cell, PlayerChoice, PlayerId, RenderStyle, Selection};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<DataStore>,
    pub health: Arc<HealthState>,
    pub latency: Arc<BinderLatency>,
}

impl ApiState {
    pub fn new(store: DataStore) -> Self {
        Self {
            store: Arc::new(store),
            health: Arc::new(HealthState::new()),
            latency: Arc::new(BinderLatency::new()),
        }
    }

    /// Runs one binder call, recording its latency and outcome.
    fn observe<T>(&self, binder: Binder, f: impl FnOnce(&DataStore) -> Result<T>) -> Result<T> {
        let started = Instant::now();
        let result = f(&self.store);
        let elapsed = started.elapsed();
        self.latency.record(binder, elapsed);
        self.health.record_request(result.is_ok());
        match &result {
            Ok(_) => debug!(%binder, elapsed_us = elapsed.as_micros() as u64, "Rendered"),
            Err(e) => warn!(%binder, "Render failed: {e}"),
        }
        result
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .route("/players", get(get_players))
        .route("/players/selected", post(post_selected_players))
        .route("/charts/summary", get(get_summary_chart))
        .route("/charts/history", get(get_history_chart))
        .route("/stats/latency", get(get_stats_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SummaryChartQuery {
    pub x: Option<String>,
    pub y: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryChartQuery {
    /// One id, or a comma-separated list.
    pub players: Option<String>,
    pub metric: Option<String>,
    pub style: Option<String>,
}

/// Body of POST /players/selected. At most one field may be set; none means
/// no selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectionRequest {
    pub point_indices: Option<Vec<usize>>,
    pub player_ids: Option<Vec<PlayerId>>,
    /// Plotly `selectedData.points` as emitted by the summary chart.
    pub points: Option<Vec<SelectedPoint>>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedPoint {
    #[serde(rename = "pointIndex")]
    pub point_index: usize,
    #[serde(default)]
    pub customdata: Option<PlayerId>,
}

impl TryFrom<SelectionRequest> for Selection {
    type Error = AppError;

    fn try_from(req: SelectionRequest) -> Result<Self> {
        match (req.point_indices, req.player_ids, req.points) {
            (None, None, None) => Ok(Selection::All),
            (Some(indices), None, None) => Ok(Selection::PointIndices(indices)),
            (None, Some(ids), None) => Ok(Selection::PlayerIds(ids)),
            (None, None, Some(points)) => {
                // Prefer ids when every point carries one
                let ids: Option<Vec<PlayerId>> = points.iter().map(|p| p.customdata).collect();
                Ok(match ids {
                    Some(ids) => Selection::PlayerIds(ids),
                    None => Selection::PointIndices(points.iter().map(|p| p.point_index).collect()),
                })
            }
            _ => Err(AppError::InvalidParameter(
                "set only one of point_indices, player_ids, points".to_string(),
            )),
        }
    }
}

fn parse_players(raw: Option<&str>, store: &DataStore) -> Result<PlayerChoice> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        // Default to the first player, as the chooser does
        return Ok(match store.summary().players().first() {
            Some(p) => PlayerChoice::One(p.id),
            None => PlayerChoice::Many(Vec::new()),
        });
    };

    let ids = raw
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<PlayerId>()
                .map_err(|_| AppError::InvalidParameter(format!("player id {s:?} is not an integer")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(if raw.contains(',') {
        PlayerChoice::Many(ids)
    } else {
        PlayerChoice::One(ids[0])
    })
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub summary_rows: usize,
    pub history_rows: usize,
    pub snapshot: Option<Cell>,
    pub requests_served: u64,
    pub render_failures: u64,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub summary: Vec<String>,
    pub history: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        summary_rows: state.store.summary().len(),
        history_rows: state.store.history().len(),
        snapshot: state.store.history().snapshot().cloned(),
        requests_served: state.health.requests_served(),
        render_failures: state.health.render_failures(),
    })
}

async fn get_metrics(State(state): State<ApiState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        summary: state.store.summary_numeric_columns().to_vec(),
        history: state.store.history_numeric_columns().to_vec(),
    })
}

async fn get_players(State(state): State<ApiState>) -> Json<Vec<PlayerOption>> {
    Json(player_options(&state.store))
}

async fn post_selected_players(
    State(state): State<ApiState>,
    Json(body): Json<Option<SelectionRequest>>,
) -> Result<Json<Vec<PlayerTableRow>>> {
    let selection = match body {
        Some(req) => Selection::try_from(req)?,
        None => Selection::All,
    };
    state
        .observe(Binder::PlayerTable, |store| select_players(store, &selection))
        .map(Json)
}

async fn get_summary_chart(
    State(state): State<ApiState>,
    Query(params): Query<SummaryChartQuery>,
) -> Result<Json<Figure>> {
    let x = params.x.as_deref().unwrap_or(DEFAULT_SUMMARY_X);
    let y = params.y.as_deref().unwrap_or(DEFAULT_SUMMARY_Y);
    state
        .observe(Binder::SummaryChart, |store| summary_figure(store, x, y))
        .map(Json)
}

async fn get_history_chart(
    State(state): State<ApiState>,
    Query(params): Query<HistoryChartQuery>,
) -> Result<Json<Figure>> {
    let players = parse_players(params.players.as_deref(), &state.store)?;
    let metric = params.metric.as_deref().unwrap_or(DEFAULT_HISTORY_METRIC);
    let style = match params.style.as_deref() {
        Some(s) => s.parse::<RenderStyle>()?,
        None => DEFAULT_HISTORY_STYLE,
    };
    state
        .observe(Binder::HistoryChart, |store| {
            history_figure(store, &players, metric, style)
        })
        .map(Json)
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyReport> {
    Json(state.latency.report())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
