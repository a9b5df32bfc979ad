//! Route definitions for the `/trash` resource.

use axum::routing::{delete, get, post};
use axum::Router;
use bizdesk_core::lifecycle::EntityStore;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/trash`.
///
/// ```text
/// GET    /                              -> list_trashed  (?type=entity_type)
/// GET    /snapshot                      -> snapshot
/// DELETE /purge                         -> purge_all
/// GET    /purge-preview                 -> purge_preview
/// POST   /{entity_type}/{id}/restore    -> restore
/// DELETE /{entity_type}/{id}/purge      -> purge_one
/// ```
pub fn router<S: EntityStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(trash::list_trashed::<S>))
        .route("/snapshot", get(trash::snapshot::<S>))
        .route("/purge", delete(trash::purge_all::<S>))
        .route("/purge-preview", get(trash::purge_preview::<S>))
        .route("/{entity_type}/{id}/restore", post(trash::restore::<S>))
        .route("/{entity_type}/{id}/purge", delete(trash::purge_one::<S>))
}
