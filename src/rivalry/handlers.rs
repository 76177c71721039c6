use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::types::{PointRequest, QuickEntryRequest, ScorerResponse};
use crate::{
    domain::MatchRecord,
    shared::{AppError, AppState},
    stats::{EloPoint, RivalrySummary},
};

/// GET /tables/:table/matches
///
/// Most recent first, bounded by the configured match limit
#[instrument(name = "list_matches", skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let matches = state.rivalry_service.recent_matches(&table_id).await?;
    info!(match_count = matches.len(), "Matches listed");
    Ok(Json(matches))
}

/// POST /tables/:table/matches
///
/// Records a match from final set scores
#[instrument(name = "submit_quick_entry", skip(state, request))]
pub async fn submit_quick_entry(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    Json(request): Json<QuickEntryRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), AppError> {
    info!(set_count = request.sets.len(), "Quick entry submitted");

    let record = state
        .rivalry_service
        .submit_quick_entry(&table_id, &request.sets)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /tables/:table/summary
#[instrument(name = "rivalry_summary", skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<RivalrySummary>, AppError> {
    Ok(Json(state.rivalry_service.summary(&table_id).await?))
}

/// GET /tables/:table/elo
#[instrument(name = "rivalry_elo", skip(state))]
pub async fn elo(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<Vec<EloPoint>>, AppError> {
    Ok(Json(state.rivalry_service.elo(&table_id).await?))
}

/// GET /tables/:table/scorer
pub async fn scorer(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<ScorerResponse>, AppError> {
    let board = state.scoring_service.board(&table_id).await?;
    Ok(Json(scorer_view(&state, &table_id, board, None)))
}

/// POST /tables/:table/scorer/start
#[instrument(name = "start_match", skip(state))]
pub async fn start_match(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<ScorerResponse>, AppError> {
    let board = state.scoring_service.start_match(&table_id).await?;
    Ok(Json(scorer_view(&state, &table_id, board, None)))
}

/// POST /tables/:table/scorer/point
#[instrument(name = "score_point", skip(state, request), fields(side = %request.side))]
pub async fn score_point(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    Json(request): Json<PointRequest>,
) -> Result<Json<ScorerResponse>, AppError> {
    let update = state
        .scoring_service
        .score_point(&table_id, request.side)
        .await?;

    if let Some(record) = &update.recorded {
        info!(match_id = %record.id, "Match decided");
    }

    Ok(Json(scorer_view(
        &state,
        &table_id,
        update.board,
        update.recorded,
    )))
}

/// POST /tables/:table/scorer/record
///
/// Stores a finished match whose earlier insert failed
#[instrument(name = "record_pending", skip(state))]
pub async fn record_pending(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<ScorerResponse>, AppError> {
    let update = state.scoring_service.record_pending(&table_id).await?;

    if let Some(record) = &update.recorded {
        info!(match_id = %record.id, "Pending match stored");
    }

    Ok(Json(scorer_view(
        &state,
        &table_id,
        update.board,
        update.recorded,
    )))
}

/// POST /tables/:table/scorer/undo
#[instrument(name = "undo_point", skip(state))]
pub async fn undo_point(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<Json<ScorerResponse>, AppError> {
    let board = state.scoring_service.undo_last_point(&table_id).await?;
    Ok(Json(scorer_view(&state, &table_id, board, None)))
}

/// DELETE /tables/:table/scorer
#[instrument(name = "discard_match", skip(state))]
pub async fn discard_match(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.scoring_service.discard(&table_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No match started on table: {}",
            table_id
        )))
    }
}

fn scorer_view(
    state: &AppState,
    table_id: &str,
    board: crate::scoring::ScoreBoard,
    recorded: Option<MatchRecord>,
) -> ScorerResponse {
    ScorerResponse::new(table_id, state.rivalry_service.sides(), board, recorded)
}
