//! An in-memory notes service with per-method request metrics.
use axum::{
    middleware,
    routing::get,
    Extension, Router,
};

pub mod config;
pub mod metrics;
pub mod notes;
pub mod state;

use notes::routes::{create_note, delete_note, get_note, list_notes, update_note};
use state::SharedState;

/// Builds the router for the service. Every request, matched or not, is
/// counted by method before it is dispatched.
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/metrics", get(metrics::metrics))
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(Extension(state))
}
