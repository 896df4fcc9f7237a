// region:    --- Imports
use super::AppState;
use super::extract::{Path, Query};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::product::model::{Category, ProductCreated, ProductDetail, ProductForm, ProductSummary};
use crate::product::service;
use crate::response::{ApiResponse, Page, PageRequest};
use crate::storage::ImageUpload;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Deserialize;
use tracing::info;
// endregion: --- Imports

// region:    --- Query Handlers

/// 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub words: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchParams {
    fn page_request(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(default.page),
            self.size.unwrap_or(default.size),
        )
    }
}

/// 상품 전체 조회
pub async fn handle_get_products(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<ApiResponse<Page<ProductSummary>>, AppError> {
    info!("{:<12} --> 상품 전체 조회 user: {}", "Handler", auth.user_id);
    let products = service::list_products(&state.db_manager, auth.user_id, page).await?;
    Ok(ApiResponse::data(products))
}

/// 상품 검색
pub async fn handle_search_products(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<ApiResponse<Page<ProductSummary>>, AppError> {
    info!("{:<12} --> 상품 검색 words: {}", "Handler", params.words);
    let products = service::search_products(
        &state.db_manager,
        auth.user_id,
        &params.words,
        params.page_request(),
    )
    .await?;
    Ok(ApiResponse::data(products))
}

/// 상세 페이지 조회
pub async fn handle_get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<ApiResponse<ProductDetail>, AppError> {
    info!("{:<12} --> 상품 상세 조회 id: {}", "Handler", product_id);
    let detail = service::get_product_detail(&state.db_manager, product_id).await?;
    Ok(ApiResponse::data(detail))
}

/// 카테고리별 조회
pub async fn handle_get_category_products(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<i64>,
    Query(page): Query<PageRequest>,
) -> Result<ApiResponse<Page<ProductSummary>>, AppError> {
    info!(
        "{:<12} --> 카테고리별 조회 category: {}",
        "Handler", category_id
    );
    let products =
        service::list_by_category(&state.db_manager, category_id, auth.user_id, page).await?;
    Ok(ApiResponse::data(products))
}

/// 카테고리 목록
pub async fn handle_get_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Category>>, AppError> {
    let categories = service::list_categories(&state.db_manager).await?;
    Ok(ApiResponse::data(categories))
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 상품 등록
pub async fn handle_create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<ProductCreated>, AppError> {
    let form = read_product_form(multipart?).await?;
    info!(
        "{:<12} --> 상품 등록 요청 user: {}, name: {}",
        "Handler", auth.user_id, form.name
    );
    let product_id =
        service::create_product(&state.db_manager, state.storage.as_ref(), form, auth.user_id)
            .await?;
    Ok(ApiResponse::data(ProductCreated { product_id }))
}

/// 상품 수정
pub async fn handle_update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let form = read_product_form(multipart?).await?;
    info!("{:<12} --> 상품 수정 요청 id: {}", "Handler", product_id);
    service::update_product(
        &state.db_manager,
        state.storage.as_ref(),
        product_id,
        auth.user_id,
        form,
    )
    .await?;
    Ok(ApiResponse::success())
}

/// 상품 삭제
pub async fn handle_delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    info!("{:<12} --> 상품 삭제 요청 id: {}", "Handler", product_id);
    service::delete_product(&state.db_manager, product_id, auth.user_id).await?;
    Ok(ApiResponse::success())
}

// endregion: --- Command Handlers

// region:    --- Multipart

/// multipart 본문에서 상품 입력 추출 (images, name, content, categoryId)
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut name = None;
    let mut content = None;
    let mut category_id = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "images" | "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                // 파일을 고르지 않은 빈 파트
                if bytes.is_empty() {
                    continue;
                }
                if !content_type.starts_with("image/") {
                    return Err(AppError::BadRequest(format!(
                        "이미지 파일만 올릴 수 있습니다: {}",
                        file_name
                    )));
                }
                images.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "name" => name = Some(field.text().await.map_err(bad_multipart)?),
            "content" => content = Some(field.text().await.map_err(bad_multipart)?),
            "categoryId" => {
                let text = field.text().await.map_err(bad_multipart)?;
                let id = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest("잘못된 카테고리입니다.".to_string()))?;
                category_id = Some(id);
            }
            _ => {}
        }
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("상품 이름이 필요합니다.".to_string()))?;
    let category_id =
        category_id.ok_or_else(|| AppError::BadRequest("카테고리가 필요합니다.".to_string()))?;

    Ok(ProductForm {
        name,
        content: content.unwrap_or_default(),
        category_id,
        images,
    })
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(e.body_text())
}

// endregion: --- Multipart
