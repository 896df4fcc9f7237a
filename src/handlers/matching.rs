// region:    --- Imports
use super::AppState;
use super::extract::Path;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::matching::model::{MatchApplicant, MatchResult};
use crate::matching::service;
use crate::response::ApiResponse;
use axum::extract::State;
use tracing::info;
// endregion: --- Imports

// region:    --- Match Handlers

/// 나눔 신청
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<i64>,
) -> Result<ApiResponse<MatchResult>, AppError> {
    info!(
        "{:<12} --> 나눔 신청 product: {}, user: {}",
        "Handler", product_id, auth.user_id
    );
    let result = service::apply_to_product(&state.db_manager, product_id, auth.user_id).await?;
    Ok(ApiResponse::data(result))
}

/// 신청자 목록 조회
pub async fn handle_get_applicants(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<ApiResponse<Vec<MatchApplicant>>, AppError> {
    info!("{:<12} --> 신청자 목록 product: {}", "Handler", product_id);
    let applicants = service::list_applicants(&state.db_manager, product_id).await?;
    Ok(ApiResponse::data(applicants))
}

/// 나눔 대상 확정
pub async fn handle_confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(match_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    info!("{:<12} --> 나눔 대상 확정 match: {}", "Handler", match_id);
    service::confirm_match(&state.db_manager, match_id, auth.user_id).await?;
    Ok(ApiResponse::success())
}

// endregion: --- Match Handlers
