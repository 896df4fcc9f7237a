// region:    --- Imports
use super::AppState;
use super::extract::{Json, Path};
use crate::error::AppError;
use crate::oauth::service;
use crate::oauth::{LoginRequest, LoginResponse};
use crate::response::ApiResponse;
use axum::extract::State;
use tracing::info;
// endregion: --- Imports

/// 소셜 로그인
pub async fn handle_login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    info!("{:<12} --> 소셜 로그인 요청: {}", "Handler", provider);
    let response = service::login(
        &state.db_manager,
        &state.oauth_providers,
        &state.jwt_keys,
        &provider,
        request,
    )
    .await?;
    Ok(ApiResponse::data(response))
}
