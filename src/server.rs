//! HTTP routes.

use axum::{routing::get, Router};

use crate::{interactions::commands as interactions, ledger::commands as ledger, AppState};

async fn healthz() -> &'static str {
    "ok"
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/interactions/",
            get(interactions::list_interactions).post(interactions::create_interaction),
        )
        .route(
            "/interactions/:id/",
            get(interactions::get_interaction)
                .put(interactions::replace_interaction)
                .patch(interactions::patch_interaction)
                .delete(interactions::delete_interaction),
        )
        .route("/stats/", get(ledger::get_stats))
}

/// Build the full application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_router())
        .with_state(state)
}
