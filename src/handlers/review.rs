// region:    --- Imports
use super::AppState;
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::review::model::ReviewRequest;
use crate::review::service;
use axum::extract::State;
use tracing::info;
// endregion: --- Imports

/// 거래한 상대방 평가
/// 작성자는 토큰의 회원이며 경로의 user id 와 같아야 한다.
pub async fn handle_save_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((match_id, user_id)): Path<(i64, i64)>,
    Json(review): Json<ReviewRequest>,
) -> Result<ApiResponse<()>, AppError> {
    info!(
        "{:<12} --> 후기 요청 match: {}, writer: {}, star: {}",
        "Handler", match_id, user_id, review.star_point
    );
    if user_id != auth.user_id {
        return Err(AppError::Forbidden);
    }
    if !review.is_valid() {
        return Err(AppError::BadRequest(
            "별점은 0에서 5 사이여야 합니다.".to_string(),
        ));
    }

    // 별점을 남겼을 경우에만 저장
    if review.has_rating() {
        service::save_user_review(&state.db_manager, &review, auth.user_id, match_id).await?;
    }
    Ok(ApiResponse::success())
}
