use std::sync::Arc;

use axum::{extract::State, Json};
use tasas_rates::AggregatedRates;

use crate::main_lib::AppState;

/// Current aggregated rates.
///
/// Always 200: upstream failures surface as `"0.00"` fields, never as an
/// error body.
pub(crate) async fn get_tasas(State(state): State<Arc<AppState>>) -> Json<AggregatedRates> {
    Json(state.rates_service.aggregate().await)
}
