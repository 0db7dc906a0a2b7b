use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use ledgerly_core::{
    currencies::UserCurrency,
    rebase::{RebaseRequest, RebaseSummary},
};

use super::json::ApiJson;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn change_base_currency(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RebaseRequest>,
) -> ApiResult<Json<RebaseSummary>> {
    // Detached so a dropped request never abandons a held lock mid-run.
    let service = state.rebase_service.clone();
    let summary = tokio::spawn(async move { service.change_base_currency(request).await })
        .await
        .map_err(|e| ApiError::Anyhow(anyhow::anyhow!("Base currency change aborted: {}", e)))??;
    Ok(Json(summary))
}

async fn list_user_currencies(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserCurrency>>> {
    let currencies = state.currency_repository.list_user_currencies(&user_id)?;
    Ok(Json(currencies))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currencies/change-base", post(change_base_currency))
        .route("/users/{user_id}/currencies", get(list_user_currencies))
}
