/// 회원 관련 서비스
/// 1. 내 정보 조회
/// 2. 주소 등록
// region:    --- Imports
use super::model::{Address, AddressRequest, User, UserProfile};
use super::repository;
use crate::database::DatabaseManager;
use crate::error::{AppError, Entity};
use sqlx::PgConnection;
use tracing::info;
// endregion: --- Imports

// region:    --- Services

/// 1. 내 정보 조회
pub async fn get_profile(db_manager: &DatabaseManager, user_id: i64) -> Result<UserProfile, AppError> {
    let user = repository::find_by_id(db_manager.pool(), user_id)
        .await?
        .ok_or(AppError::NotFound(Entity::User))?;
    let address = match user.address_id {
        Some(address_id) => repository::find_address(db_manager.pool(), address_id).await?,
        None => None,
    };
    Ok(UserProfile::new(user, address))
}

/// 2. 주소 등록
pub async fn register_address(
    db_manager: &DatabaseManager,
    user_id: i64,
    request: AddressRequest,
) -> Result<UserProfile, AppError> {
    request.validate()?;
    let region_code = request.region_code.trim();
    info!(
        "{:<12} --> 주소 등록 user: {}, region: {}",
        "Service", user_id, region_code
    );

    let mut tx = db_manager.pool().begin().await?;
    let address = repository::upsert_address(&mut *tx, region_code, request.name.trim()).await?;
    let user = repository::update_address(&mut *tx, user_id, address.id)
        .await?
        .ok_or(AppError::NotFound(Entity::User))?;
    tx.commit().await?;

    Ok(UserProfile::new(user, Some(address)))
}

/// 회원과 회원의 주소를 함께 조회. 주소가 없으면 NotFound(Address)
pub async fn require_user_with_address(
    conn: &mut PgConnection,
    user_id: i64,
) -> Result<(User, Address), AppError> {
    let user = repository::find_by_id(&mut *conn, user_id)
        .await?
        .ok_or(AppError::NotFound(Entity::User))?;
    let address_id = user.address_id.ok_or(AppError::NotFound(Entity::Address))?;
    let address = repository::find_address(&mut *conn, address_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Address))?;
    Ok((user, address))
}

// endregion: --- Services
