// region:    --- Imports
use super::model::{Address, NewUser, User};
use super::queries;
use sqlx::postgres::PgExecutor;
use tracing::info;
// endregion: --- Imports

// region:    --- User Queries

/// 회원 조회
pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    info!("{:<12} --> 회원 조회 id: {}", "Query", user_id);
    sqlx::query_as::<_, User>(queries::GET_USER)
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// 소셜 계정으로 회원 조회
pub async fn find_by_provider_account<'e>(
    executor: impl PgExecutor<'e>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(queries::GET_USER_BY_PROVIDER_ACCOUNT)
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(executor)
        .await
}

/// 회원 생성 또는 프로필 갱신
pub async fn upsert<'e>(executor: impl PgExecutor<'e>, user: &NewUser) -> Result<User, sqlx::Error> {
    info!(
        "{:<12} --> 회원 저장 provider: {}, account: {}",
        "Query", user.provider, user.provider_account_id
    );
    sqlx::query_as::<_, User>(queries::UPSERT_USER)
        .bind(&user.provider)
        .bind(&user.provider_account_id)
        .bind(&user.nickname)
        .bind(&user.profile_url)
        .fetch_one(executor)
        .await
}

/// 회원 주소 변경
pub async fn update_address<'e>(
    executor: impl PgExecutor<'e>,
    user_id: i64,
    address_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(queries::UPDATE_USER_ADDRESS)
        .bind(user_id)
        .bind(address_id)
        .fetch_optional(executor)
        .await
}

// endregion: --- User Queries

// region:    --- Address Queries

/// 주소 조회
pub async fn find_address<'e>(
    executor: impl PgExecutor<'e>,
    address_id: i64,
) -> Result<Option<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(queries::GET_ADDRESS)
        .bind(address_id)
        .fetch_optional(executor)
        .await
}

/// 지역 코드로 주소 생성 또는 조회
pub async fn upsert_address<'e>(
    executor: impl PgExecutor<'e>,
    region_code: &str,
    name: &str,
) -> Result<Address, sqlx::Error> {
    sqlx::query_as::<_, Address>(queries::UPSERT_ADDRESS)
        .bind(region_code)
        .bind(name)
        .fetch_one(executor)
        .await
}

// endregion: --- Address Queries
