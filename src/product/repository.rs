// region:    --- Imports
use super::model::{Category, Product, ProductFilter, ProductImage, ProductSummary};
use super::queries;
use crate::response::PageRequest;
use crate::storage::StoredImage;
use sqlx::postgres::PgExecutor;
use sqlx::PgConnection;
use tracing::info;
// endregion: --- Imports

// region:    --- Product Queries

/// 상품 조회 (삭제된 상품 제외)
pub async fn find_active<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", product_id);
    sqlx::query_as::<_, Product>(queries::GET_PRODUCT)
        .bind(product_id)
        .fetch_optional(executor)
        .await
}

/// 상품 조회 후 트랜잭션 종료까지 행 잠금
pub async fn lock_active<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    info!("{:<12} --> 상품 잠금 조회 id: {}", "Query", product_id);
    sqlx::query_as::<_, Product>(queries::LOCK_PRODUCT)
        .bind(product_id)
        .fetch_optional(executor)
        .await
}

/// 주소 기준 상품 목록 + 전체 개수
pub async fn list_summaries(
    conn: &mut PgConnection,
    filter: &ProductFilter,
    page: PageRequest,
) -> Result<(Vec<ProductSummary>, i64), sqlx::Error> {
    info!("{:<12} --> 상품 목록 조회 filter: {:?}", "Query", filter);
    let pattern = filter.like_pattern();

    let content = sqlx::query_as::<_, ProductSummary>(queries::LIST_PRODUCTS)
        .bind(filter.address_id)
        .bind(filter.category_id)
        .bind(pattern.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

    let total = sqlx::query_scalar::<_, i64>(queries::COUNT_PRODUCTS)
        .bind(filter.address_id)
        .bind(filter.category_id)
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await?;

    Ok((content, total))
}

/// 작성자 조회 (삭제된 상품 포함)
pub async fn find_owner_id<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(queries::GET_PRODUCT_OWNER)
        .bind(product_id)
        .fetch_optional(executor)
        .await
}

/// 상품 등록
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    content: &str,
    user_id: i64,
    category_id: i64,
    address_id: i64,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(queries::INSERT_PRODUCT)
        .bind(name)
        .bind(content)
        .bind(user_id)
        .bind(category_id)
        .bind(address_id)
        .fetch_one(executor)
        .await
}

/// 상품 수정
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
    name: &str,
    content: &str,
    category_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(queries::UPDATE_PRODUCT)
        .bind(product_id)
        .bind(name)
        .bind(content)
        .bind(category_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// 상품 삭제 표시. 대상이 없으면 false
pub async fn soft_delete<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(queries::SOFT_DELETE_PRODUCT)
        .bind(product_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// 상품 마감
pub async fn close<'e>(executor: impl PgExecutor<'e>, product_id: i64) -> Result<(), sqlx::Error> {
    info!("{:<12} --> 상품 마감 id: {}", "Query", product_id);
    sqlx::query(queries::CLOSE_PRODUCT)
        .bind(product_id)
        .execute(executor)
        .await?;
    Ok(())
}

// endregion: --- Product Queries

// region:    --- Image Queries

/// 상품 이미지 조회
pub async fn find_images<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Vec<ProductImage>, sqlx::Error> {
    sqlx::query_as::<_, ProductImage>(queries::GET_PRODUCT_IMAGES)
        .bind(product_id)
        .fetch_all(executor)
        .await
}

/// 업로드된 이미지 연결
pub async fn insert_images(
    conn: &mut PgConnection,
    product_id: i64,
    images: &[StoredImage],
) -> Result<(), sqlx::Error> {
    for image in images {
        sqlx::query(queries::INSERT_PRODUCT_IMAGE)
            .bind(&image.url)
            .bind(&image.key)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// 상품 이미지 전체 삭제 후 저장소 키 반환
pub async fn delete_images<'e>(
    executor: impl PgExecutor<'e>,
    product_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(queries::DELETE_PRODUCT_IMAGES)
        .bind(product_id)
        .fetch_all(executor)
        .await
}

// endregion: --- Image Queries

// region:    --- Category Queries

/// 카테고리 조회
pub async fn find_category<'e>(
    executor: impl PgExecutor<'e>,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(queries::GET_CATEGORY)
        .bind(category_id)
        .fetch_optional(executor)
        .await
}

/// 모든 카테고리 조회
pub async fn find_all_categories<'e>(
    executor: impl PgExecutor<'e>,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(queries::GET_ALL_CATEGORIES)
        .fetch_all(executor)
        .await
}

// endregion: --- Category Queries
