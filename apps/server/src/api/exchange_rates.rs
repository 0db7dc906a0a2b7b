use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use ledgerly_core::fx::{ExchangeRate, NewExchangeRate};

use super::json::ApiJson;
use crate::{error::ApiResult, main_lib::AppState};

async fn add_exchange_rate(
    State(state): State<Arc<AppState>>,
    ApiJson(new_rate): ApiJson<NewExchangeRate>,
) -> ApiResult<Json<ExchangeRate>> {
    let added = state.fx_service.add_exchange_rate(new_rate).await?;
    Ok(Json(added))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/exchange-rates", post(add_exchange_rate))
}
