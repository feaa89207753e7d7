use crate::AppState;
use crate::error::ApiError;
use crate::response::TipResponse;
use axum::{Json, extract::State};
use log::warn;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub(crate) async fn current_tip(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TipResponse>, ApiError> {
    let record = match state.service.current_tip() {
        Ok(record) => record,
        Err(e) => {
            warn!("get: {}", e);

            return Err(e.into());
        }
    };

    Ok(Json(TipResponse {
        record,
        annotations: state.annotations.clone(),
    }))
}
