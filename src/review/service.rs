/// 후기 관련 서비스
/// 받는 사람은 요청 값이 아니라 매칭과 상품 작성자 관계에서 정한다.
// region:    --- Imports
use super::model::{resolve_receiver, Review, ReviewRequest};
use super::queries;
use crate::database::DatabaseManager;
use crate::error::{AppError, Entity};
use crate::matching::repository as match_repository;
use crate::product::repository as product_repository;
use tracing::info;
// endregion: --- Imports

// region:    --- Services

/// 거래 상대 평가 저장
/// 호출하는 쪽에서 별점 0 인 요청은 걸러야 한다.
pub async fn save_user_review(
    db_manager: &DatabaseManager,
    review: &ReviewRequest,
    writer_id: i64,
    match_id: i64,
) -> Result<Review, AppError> {
    info!(
        "{:<12} --> 후기 저장 writer: {}, match: {}",
        "Service", writer_id, match_id
    );
    let mut tx = db_manager.pool().begin().await?;

    let found = match_repository::find_by_id(&mut *tx, match_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Match))?;
    // 삭제된 상품의 매칭에도 후기는 남길 수 있다
    let owner_id = product_repository::find_owner_id(&mut *tx, found.product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;

    let receiver_id =
        resolve_receiver(writer_id, owner_id, found.receiver_id).ok_or(AppError::Forbidden)?;
    if !found.is_matching {
        return Err(AppError::BadRequest(
            "나눔이 확정된 매칭에만 후기를 남길 수 있습니다.".to_string(),
        ));
    }

    // 같은 요청이 동시에 들어와도 한 건만 저장된다
    let saved = sqlx::query_as::<_, Review>(queries::INSERT_REVIEW)
        .bind(writer_id)
        .bind(receiver_id)
        .bind(match_id)
        .bind(review.star_point)
        .bind(&review.content)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::BadRequest("이미 작성한 후기입니다.".to_string()))?;
    tx.commit().await?;

    info!(
        "{:<12} --> 후기 저장 완료 id: {}, receiver: {}",
        "Service", saved.id, receiver_id
    );
    Ok(saved)
}

// endregion: --- Services
