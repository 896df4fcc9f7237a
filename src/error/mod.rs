// region:    --- Imports
use crate::storage::StorageError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

// region:    --- Entity
/// 조회 대상 엔티티
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Address,
    Category,
    Product,
    Match,
}

impl Entity {
    fn code(self) -> &'static str {
        match self {
            Entity::User => "NOT_FOUND_USER",
            Entity::Address => "NOT_FOUND_ADDRESS",
            Entity::Category => "NOT_FOUND_CATEGORY",
            Entity::Product => "NOT_FOUND_PRODUCT",
            Entity::Match => "NOT_FOUND_MATCH",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "사용자",
            Entity::Address => "주소",
            Entity::Category => "카테고리",
            Entity::Product => "상품",
            Entity::Match => "매칭",
        };
        f.write_str(name)
    }
}
// endregion: --- Entity

// region:    --- App Error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} 정보를 찾을 수 없습니다.")]
    NotFound(Entity),
    #[error("이미지 저장소 오류: {0}")]
    Storage(#[from] StorageError),
    #[error("소셜 로그인 오류: {0}")]
    UpstreamAuth(String),
    #[error("로그인이 필요합니다.")]
    Unauthorized,
    #[error("권한이 없습니다.")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// 실패 응답 본문
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub is_success: bool,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// 클라이언트에 노출되는 고정 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(entity) => entity.code(),
            AppError::Storage(_) => "STORAGE_FAILURE",
            AppError::UpstreamAuth(_) => "UPSTREAM_AUTH_FAILURE",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::UpstreamAuth(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Database(e) => {
                error!("{:<12} --> 데이터베이스 오류: {:?}", "Error", e);
                "요청을 처리하지 못했습니다.".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            is_success: false,
            code: self.code(),
            message,
        };
        (self.status(), Json(body)).into_response()
    }
}
// endregion: --- App Error

// region:    --- Extractor Rejections
/// 잘못된 경로/쿼리/본문은 모두 BAD_REQUEST 실패 응답으로 바꾼다
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
// endregion: --- Extractor Rejections

// endregion: --- Tests
