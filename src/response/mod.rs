/// 공통 응답 포맷과 페이지네이션
// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
// endregion: --- Imports

// region:    --- Envelope
/// 모든 성공 응답을 감싸는 공통 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

const SUCCESS_MESSAGE: &str = "요청에 성공하였습니다.";

impl ApiResponse<()> {
    /// 결과 없는 성공 응답
    pub fn success() -> Self {
        Self {
            is_success: true,
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            result: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// 결과를 포함한 성공 응답
    pub fn data(result: T) -> Self {
        Self {
            is_success: true,
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            result: Some(result),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
// endregion: --- Envelope

// region:    --- Page
const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;
/// offset 계산이 넘치지 않는 가장 큰 페이지 번호
const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE - 1;

/// 페이지 요청 (page 는 0부터 시작)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// 범위를 벗어난 값 보정
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.clamp(0, MAX_PAGE),
            size: self.size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/// 페이지 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            last: request.page + 1 >= total_pages,
        }
    }
}
// endregion: --- Page

// endregion: --- Tests
