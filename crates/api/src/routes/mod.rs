pub mod health;
pub mod trash;

use axum::routing::{delete, get};
use axum::Router;
use bizdesk_core::lifecycle::EntityStore;

use crate::handlers::lifecycle;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trash                                       list trashed (?type=)
/// /trash/snapshot                              deleted projects, clients, suppliers, orders
/// /trash/purge                                 empty the trash (DELETE)
/// /trash/purge-preview                         counts per entity type
/// /trash/{entity_type}/{id}/restore            restore (POST)
/// /trash/{entity_type}/{id}/purge              purge one (DELETE)
///
/// /{entity_type}/{id}                          soft or hard delete (DELETE)
/// /{entity_type}/{id}/dependents               live dependents (GET)
/// ```
pub fn api_routes<S: EntityStore>() -> Router<AppState<S>> {
    Router::new()
        .nest("/trash", trash::router())
        .route("/{entity_type}/{id}", delete(lifecycle::delete_entity::<S>))
        .route(
            "/{entity_type}/{id}/dependents",
            get(lifecycle::dependents::<S>),
        )
}
