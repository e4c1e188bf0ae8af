//! Menu listing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use store::{MenuListing, Store};

use crate::AppState;
use crate::error::ApiError;

/// GET /menus — list menu items joined with restaurant names. Public.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<MenuListing>>, ApiError> {
    Ok(Json(state.store.list_menus().await?))
}
