/// 상품 관련 서비스
/// 1. 검색 / 전체 / 카테고리별 목록 (회원 주소 기준)
/// 2. 상세 조회
/// 3. 등록 / 수정 / 삭제
// region:    --- Imports
use super::model::{
    Category, ProductDetail, ProductFilter, ProductForm, ProductOwner, ProductSummary,
};
use super::repository;
use crate::database::DatabaseManager;
use crate::error::{AppError, Entity};
use crate::matching::repository as match_repository;
use crate::response::{Page, PageRequest};
use crate::storage::{self, ImageStorage, StoredImage};
use crate::user::repository as user_repository;
use crate::user::service::require_user_with_address;
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Listing

/// 검색어로 상품 검색
pub async fn search_products(
    db_manager: &DatabaseManager,
    user_id: i64,
    words: &str,
    page: PageRequest,
) -> Result<Page<ProductSummary>, AppError> {
    info!(
        "{:<12} --> 상품 검색 user: {}, words: {}",
        "Service", user_id, words
    );
    let mut conn = db_manager.pool().acquire().await?;
    let (_, address) = require_user_with_address(&mut conn, user_id).await?;
    let filter = ProductFilter::address(address.id).with_words(words);
    list_page(&mut conn, &filter, page).await
}

/// 전체 상품 목록
pub async fn list_products(
    db_manager: &DatabaseManager,
    user_id: i64,
    page: PageRequest,
) -> Result<Page<ProductSummary>, AppError> {
    info!("{:<12} --> 상품 전체 조회 user: {}", "Service", user_id);
    let mut conn = db_manager.pool().acquire().await?;
    let (_, address) = require_user_with_address(&mut conn, user_id).await?;
    list_page(&mut conn, &ProductFilter::address(address.id), page).await
}

/// 카테고리별 상품 목록
pub async fn list_by_category(
    db_manager: &DatabaseManager,
    category_id: i64,
    user_id: i64,
    page: PageRequest,
) -> Result<Page<ProductSummary>, AppError> {
    info!(
        "{:<12} --> 카테고리별 조회 user: {}, category: {}",
        "Service", user_id, category_id
    );
    let mut conn = db_manager.pool().acquire().await?;
    let (_, address) = require_user_with_address(&mut conn, user_id).await?;
    repository::find_category(&mut *conn, category_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Category))?;
    let filter = ProductFilter::address(address.id).with_category(category_id);
    list_page(&mut conn, &filter, page).await
}

async fn list_page(
    conn: &mut PgConnection,
    filter: &ProductFilter,
    page: PageRequest,
) -> Result<Page<ProductSummary>, AppError> {
    let page = page.normalized();
    let (content, total) = repository::list_summaries(conn, filter, page).await?;
    Ok(Page::new(content, page, total))
}

/// 카테고리 목록
pub async fn list_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, AppError> {
    Ok(repository::find_all_categories(db_manager.pool()).await?)
}

// endregion: --- Listing

// region:    --- Detail

/// 상품 상세 조회. 삭제된 상품은 NotFound
pub async fn get_product_detail(
    db_manager: &DatabaseManager,
    product_id: i64,
) -> Result<ProductDetail, AppError> {
    let mut conn = db_manager.pool().acquire().await?;

    let product = repository::find_active(&mut *conn, product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    let category = repository::find_category(&mut *conn, product.category_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Category))?;
    let owner = user_repository::find_by_id(&mut *conn, product.user_id)
        .await?
        .ok_or(AppError::NotFound(Entity::User))?;
    let address = user_repository::find_address(&mut *conn, product.address_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Address))?;
    let images = repository::find_images(&mut *conn, product.id).await?;
    let match_count = match_repository::count_by_product(&mut *conn, product.id).await?;

    Ok(ProductDetail {
        id: product.id,
        name: product.name,
        content: product.content,
        is_closed: product.is_closed,
        category,
        owner: ProductOwner {
            id: owner.id,
            nickname: owner.nickname,
            profile_url: owner.profile_url,
        },
        address,
        images: images.into_iter().map(|image| image.image_url).collect(),
        match_count,
        create_date: product.create_date,
        update_date: product.update_date,
    })
}

// endregion: --- Detail

// region:    --- Commands

/// 상품 등록
/// 상품 저장과 이미지 연결은 하나의 트랜잭션이며, 실패 시 업로드된 이미지도 정리한다.
pub async fn create_product(
    db_manager: &DatabaseManager,
    storage: &dyn ImageStorage,
    form: ProductForm,
    user_id: i64,
) -> Result<i64, AppError> {
    info!(
        "{:<12} --> 상품 등록 user: {}, name: {}, images: {}",
        "Service",
        user_id,
        form.name,
        form.images.len()
    );
    form.validate()?;
    let mut tx = db_manager.pool().begin().await?;

    let category = repository::find_category(&mut *tx, form.category_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Category))?;
    let (user, address) = require_user_with_address(&mut tx, user_id).await?;

    let product = repository::insert(
        &mut *tx,
        &form.name,
        &form.content,
        user.id,
        category.id,
        address.id,
    )
    .await?;

    let stored = storage::upload_all(storage, product.id, form.images).await?;
    commit_with_images(tx, storage, product.id, &stored).await?;

    info!("{:<12} --> 상품 등록 완료 id: {}", "Service", product.id);
    Ok(product.id)
}

/// 상품 수정
/// 기존 이미지는 모두 새 이미지로 교체된다. 이전 이미지 파일은 커밋 후 삭제한다.
pub async fn update_product(
    db_manager: &DatabaseManager,
    storage: &dyn ImageStorage,
    product_id: i64,
    user_id: i64,
    form: ProductForm,
) -> Result<(), AppError> {
    info!(
        "{:<12} --> 상품 수정 id: {}, images: {}",
        "Service",
        product_id,
        form.images.len()
    );
    form.validate()?;
    let mut tx = db_manager.pool().begin().await?;

    let product = repository::lock_active(&mut *tx, product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    if product.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    let category = repository::find_category(&mut *tx, form.category_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Category))?;

    let previous_keys = repository::delete_images(&mut *tx, product.id).await?;
    repository::update(&mut *tx, product.id, &form.name, &form.content, category.id).await?;

    let stored = storage::upload_all(storage, product.id, form.images).await?;
    commit_with_images(tx, storage, product.id, &stored).await?;

    // 이미 커밋된 수정은 되돌리지 않는다
    if let Err(e) = storage::delete_all(storage, &previous_keys).await {
        warn!(
            "{:<12} --> 이전 이미지 삭제 실패 product: {}: {}",
            "Service", product.id, e
        );
    }
    Ok(())
}

/// 상품 삭제 (soft delete)
pub async fn delete_product(
    db_manager: &DatabaseManager,
    product_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    info!("{:<12} --> 상품 삭제 id: {}", "Service", product_id);
    let mut tx = db_manager.pool().begin().await?;

    let product = repository::lock_active(&mut *tx, product_id)
        .await?
        .ok_or(AppError::NotFound(Entity::Product))?;
    if product.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    if !repository::soft_delete(&mut *tx, product.id).await? {
        return Err(AppError::NotFound(Entity::Product));
    }
    tx.commit().await?;
    Ok(())
}

/// 이미지 행을 연결하고 커밋. 실패하면 업로드된 이미지를 정리한다.
async fn commit_with_images(
    mut tx: Transaction<'_, Postgres>,
    storage: &dyn ImageStorage,
    product_id: i64,
    stored: &[StoredImage],
) -> Result<(), AppError> {
    let result = match repository::insert_images(&mut tx, product_id, stored).await {
        Ok(()) => tx.commit().await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        storage::discard(storage, stored).await;
        return Err(e.into());
    }
    Ok(())
}

// endregion: --- Commands
