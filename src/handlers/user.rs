// region:    --- Imports
use super::AppState;
use super::extract::Json;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::user::model::{AddressRequest, UserProfile};
use crate::user::service;
use axum::extract::State;
use tracing::info;
// endregion: --- Imports

/// 내 정보 조회
pub async fn handle_get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<UserProfile>, AppError> {
    let profile = service::get_profile(&state.db_manager, auth.user_id).await?;
    Ok(ApiResponse::data(profile))
}

/// 주소 등록
pub async fn handle_register_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<AddressRequest>,
) -> Result<ApiResponse<UserProfile>, AppError> {
    info!(
        "{:<12} --> 주소 등록 user: {}, region: {}",
        "Handler", auth.user_id, request.region_code
    );
    let profile = service::register_address(&state.db_manager, auth.user_id, request).await?;
    Ok(ApiResponse::data(profile))
}
