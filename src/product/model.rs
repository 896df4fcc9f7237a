use crate::error::AppError;
use crate::storage::ImageUpload;
use crate::user::model::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 카테고리 모델
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// 상품 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub user_id: i64,
    pub category_id: i64,
    pub address_id: i64,
    pub is_closed: bool,
    pub is_deleted: bool,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

// 상품 이미지 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductImage {
    pub id: i64,
    pub image_url: String,
    pub image_key: String,
    pub product_id: i64,
}

/// 목록 조회용 상품 요약
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub thumbnail_url: Option<String>,
    pub is_closed: bool,
    pub match_count: i64,
    pub create_date: DateTime<Utc>,
}

/// 상품 작성자 정보
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOwner {
    pub id: i64,
    pub nickname: String,
    pub profile_url: Option<String>,
}

/// 상세 조회 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub is_closed: bool,
    pub category: Category,
    pub owner: ProductOwner,
    pub address: Address,
    pub images: Vec<String>,
    pub match_count: i64,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// 상품 등록/수정 입력 (multipart 에서 추출)
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub content: String,
    pub category_id: i64,
    pub images: Vec<ImageUpload>,
}

/// products.name 컬럼 길이
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

impl ProductForm {
    /// 저장 전에 입력 확인
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("상품 이름이 필요합니다.".to_string()));
        }
        if self.name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "상품 이름은 {}자 이하여야 합니다.",
                MAX_PRODUCT_NAME_LEN
            )));
        }
        Ok(())
    }
}

/// 상품 등록 결과
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    pub product_id: i64,
}

/// 목록 조회 조건. 주소는 항상 필수
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub address_id: i64,
    pub category_id: Option<i64>,
    pub words: Option<String>,
}

impl ProductFilter {
    pub fn address(address_id: i64) -> Self {
        Self {
            address_id,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// 공백 검색어는 조건에서 제외
    pub fn with_words(mut self, words: &str) -> Self {
        let words = words.trim();
        self.words = (!words.is_empty()).then(|| words.to_string());
        self
    }

    /// ILIKE 패턴 (%, _, \ 는 이스케이프)
    pub fn like_pattern(&self) -> Option<String> {
        self.words.as_deref().map(|words| {
            let mut pattern = String::with_capacity(words.len() + 2);
            pattern.push('%');
            for c in words.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}
