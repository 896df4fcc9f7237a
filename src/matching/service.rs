/// 나눔 신청 관련 서비스
/// 1. 나눔 신청 (상품당 최대 3명, 3번째 신청 시 마감)
/// 2. 신청자 목록 조회
/// 3. 나눔 대상 확정
// region:    --- Imports
use super::model::{Admission, MatchApplicant, MatchResult};
use super::repository;
use crate::database::DatabaseManager;
use crate::error::{AppError, Entity};
use crate::product::repository as product_repository;
use crate::user::repository as user_repository;
use tracing::info;
// endregion: --- Imports

// region:    --- Services

/// 1. 나눔 신청
/// 상품 행을 FOR UPDATE 로 잠근 뒤 신청 수를 확인하므로 같은 상품에 대한
/// 동시 신청은 직렬화되고 네 번째 신청은 만들어지지 않는다.
pub async fn apply_to_product(
    db_manager: &DatabaseManager,
    product_id: i64,
    user_id: i64,
) -> Result<MatchResult, AppError> {
    info!(
        "{:<12} --> 나눔 신청 처리 시작 product: {}, user: {}",
        "Service", product_id, user_id
    );
    let mut tx = db_manager.pool().begin().await?;

    let product = product_repository::lock_active(&mut *tx, product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    if product.user_id == user_id {
        return Err(AppError::BadRequest(
            "본인 상품에는 신청할 수 없습니다.".to_string(),
        ));
    }
    user_repository::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or(AppError::NotFound(Entity::User))?;

    let existing = repository::count_by_product(&mut *tx, product_id).await?;
    let admission = Admission::for_count(existing);
    if admission == Admission::Full {
        tx.rollback().await?;
        info!(
            "{:<12} --> 신청 거절: 인원 초과 product: {}",
            "Service", product_id
        );
        return Ok(MatchResult::full());
    }

    let new_match = repository::insert(&mut *tx, product_id, user_id).await?;
    if admission == Admission::Closing {
        product_repository::close(&mut *tx, product_id).await?;
    }
    tx.commit().await?;

    info!(
        "{:<12} --> 신청 완료 match: {}, 마감: {}",
        "Service",
        new_match.id,
        admission == Admission::Closing
    );
    Ok(MatchResult::applied(new_match.id))
}

/// 2. 신청자 목록 조회
pub async fn list_applicants(
    db_manager: &DatabaseManager,
    product_id: i64,
) -> Result<Vec<MatchApplicant>, AppError> {
    product_repository::find_active(db_manager.pool(), product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    Ok(repository::find_applicants(db_manager.pool(), product_id).await?)
}

/// 3. 나눔 대상 확정 (상품 작성자만 가능, 상품당 한 명)
pub async fn confirm_match(
    db_manager: &DatabaseManager,
    match_id: i64,
    owner_id: i64,
) -> Result<(), AppError> {
    info!(
        "{:<12} --> 나눔 대상 확정 match: {}, owner: {}",
        "Service", match_id, owner_id
    );
    let mut tx = db_manager.pool().begin().await?;

    let found = repository::find_by_id(&mut *tx, match_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Match))?;
    let product = product_repository::lock_active(&mut *tx, found.product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    if product.user_id != owner_id {
        return Err(AppError::Forbidden);
    }

    if let Some(active) =
        repository::find_active_between(&mut *tx, product.id, owner_id, found.receiver_id).await?
    {
        if active.id == found.id {
            tx.commit().await?;
            return Ok(());
        }
    }
    if repository::find_active_by_product(&mut *tx, product.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "이미 나눔 대상이 정해진 상품입니다.".to_string(),
        ));
    }

    repository::confirm(&mut *tx, found.id).await?;
    tx.commit().await?;
    Ok(())
}

// endregion: --- Services
