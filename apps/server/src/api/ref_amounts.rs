use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use ledgerly_core::ref_amount::RefAmountRequest;
use serde::Serialize;

use super::json::ApiJson;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefAmountResponse {
    ref_amount: i64,
}

async fn calculate_ref_amount(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RefAmountRequest>,
) -> ApiResult<Json<RefAmountResponse>> {
    let ref_amount = state.ref_amount_service.calculate_ref_amount(request).await?;
    Ok(Json(RefAmountResponse { ref_amount }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ref-amounts", post(calculate_ref_amount))
}
