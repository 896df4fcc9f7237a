// region:    --- Imports
use super::model::{Match, MatchApplicant};
use super::queries;
use sqlx::postgres::PgExecutor;
use tracing::info;
// endregion: --- Imports

// region:    --- Match Queries

/// 상품별 신청 수
pub async fn count_by_product<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(queries::COUNT_MATCHES_BY_PRODUCT)
        .bind(product_id)
        .fetch_one(executor)
        .await
}

/// 신청 등록
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
    user_id: i64,
) -> Result<Match, sqlx::Error> {
    info!(
        "{:<12} --> 신청 등록 product: {}, user: {}",
        "Query", product_id, user_id
    );
    sqlx::query_as::<_, Match>(queries::INSERT_MATCH)
        .bind(product_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
}

/// 신청 조회
pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<Option<Match>, sqlx::Error> {
    info!("{:<12} --> 신청 조회 id: {}", "Query", match_id);
    sqlx::query_as::<_, Match>(queries::GET_MATCH)
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

/// 상품별 신청자 목록 (신청 순 3명)
pub async fn find_applicants<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Vec<MatchApplicant>, sqlx::Error> {
    sqlx::query_as::<_, MatchApplicant>(queries::GET_MATCH_LIST_BY_PRODUCT)
        .bind(product_id)
        .fetch_all(executor)
        .await
}

/// 두 회원 사이의 확정된 매칭 조회
pub async fn find_active_between<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
    send_user_id: i64,
    receive_user_id: i64,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(queries::GET_ACTIVE_MATCH_BETWEEN)
        .bind(product_id)
        .bind(send_user_id)
        .bind(receive_user_id)
        .fetch_optional(executor)
        .await
}

/// 상품의 확정된 매칭 조회
pub async fn find_active_by_product<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(queries::GET_ACTIVE_MATCH_BY_PRODUCT)
        .bind(product_id)
        .fetch_optional(executor)
        .await
}

/// 매칭 확정
pub async fn confirm<'e>(executor: impl PgExecutor<'e>, match_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(queries::CONFIRM_MATCH)
        .bind(match_id)
        .execute(executor)
        .await?;
    Ok(())
}

// endregion: --- Match Queries
