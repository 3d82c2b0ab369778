use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use log::{debug, info, warn};

use crate::{
    db::models::{Interaction, InteractionInput, InteractionPatch},
    error::ApiError,
    AppState,
};

fn ensure_history_edits(
    state: &AppState,
    action: &str,
    interaction_id: i64,
) -> Result<(), ApiError> {
    if state.settings.allow_history_edits {
        warn!(
            "{action} of interaction {interaction_id} bypasses reconciliation; ledger history may no longer be self-consistent"
        );
        Ok(())
    } else {
        warn!("Rejected {action} of interaction {interaction_id}: history edits are disabled");
        Err(ApiError::AppendOnly)
    }
}

pub async fn list_interactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let interactions = state.db.list_interactions().await?;
    Ok(Json(interactions))
}

pub async fn create_interaction(
    State(state): State<AppState>,
    payload: Result<Json<InteractionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Interaction>), ApiError> {
    let Json(input) = payload?;
    let (interaction, outcome) = state.db.create_interaction(input).await?;

    info!(
        "Logged {} (magnitude {}): rule delta {}, stored {}, total now {}",
        interaction.kind.as_str(),
        interaction.magnitude,
        outcome.rule_delta,
        interaction.crumbs,
        outcome.target_end
    );
    if outcome.adjusted() {
        debug!(
            "Interaction {} adjusted from {} to {} crumbs (seen total {} -> {})",
            interaction.id,
            outcome.rule_delta,
            outcome.required_delta,
            outcome.effective_start,
            outcome.target_end
        );
    }

    Ok((StatusCode::CREATED, Json(interaction)))
}

pub async fn get_interaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Interaction>, ApiError> {
    let Path(interaction_id) = path?;
    state
        .db
        .get_interaction(interaction_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(interaction_id))
}

pub async fn replace_interaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<InteractionInput>, JsonRejection>,
) -> Result<Json<Interaction>, ApiError> {
    let Path(interaction_id) = path?;
    ensure_history_edits(&state, "Update", interaction_id)?;
    let Json(input) = payload?;
    apply_patch(&state, interaction_id, input.into()).await
}

pub async fn patch_interaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<InteractionPatch>, JsonRejection>,
) -> Result<Json<Interaction>, ApiError> {
    let Path(interaction_id) = path?;
    ensure_history_edits(&state, "Update", interaction_id)?;
    let Json(patch) = payload?;
    if patch.is_empty() {
        return Err(ApiError::Validation("No fields to update".into()));
    }
    apply_patch(&state, interaction_id, patch).await
}

async fn apply_patch(
    state: &AppState,
    interaction_id: i64,
    patch: InteractionPatch,
) -> Result<Json<Interaction>, ApiError> {
    state
        .db
        .update_interaction(interaction_id, patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(interaction_id))
}

pub async fn delete_interaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(interaction_id) = path?;
    ensure_history_edits(&state, "Delete", interaction_id)?;
    if state.db.delete_interaction(interaction_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(interaction_id))
    }
}
