//! Customer listing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use store::{CustomerProfile, Store};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::CurrentCustomer;

/// GET /customers — list customer profiles. Requires authentication.
#[tracing::instrument(skip(state, _customer))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    _customer: CurrentCustomer,
) -> Result<Json<Vec<CustomerProfile>>, ApiError> {
    Ok(Json(state.store.list_customers().await?))
}
