//! Instrument API handlers

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::models::InstrumentView;
use crate::resolvers::instrument::{self, CreateInstrumentInput, InstrumentMutationResponse};
use crate::AppState;

pub fn instrument_routes() -> Router<AppState> {
    Router::new().route(
        "/api/instruments",
        get(list_instruments).post(create_instrument),
    )
}

/// GET /api/instruments
async fn list_instruments(State(state): State<AppState>) -> ApiResult<Json<Vec<InstrumentView>>> {
    Ok(Json(instrument::instrument_list(&state.db).await?))
}

/// POST /api/instruments
async fn create_instrument(
    State(state): State<AppState>,
    Json(input): Json<CreateInstrumentInput>,
) -> ApiResult<Json<InstrumentMutationResponse>> {
    Ok(Json(instrument::create_instrument(&state.db, input).await?))
}
