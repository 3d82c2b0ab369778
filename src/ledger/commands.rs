use axum::{extract::State, Json};

use crate::{error::ApiError, ledger::LedgerStats, AppState};

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<LedgerStats>, ApiError> {
    let stats = state.db.ledger_stats().await?;
    Ok(Json(stats))
}
