use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 회원 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub provider: String,
    pub provider_account_id: String,
    pub nickname: String,
    pub profile_url: Option<String>,
    pub address_id: Option<i64>,
    pub create_date: DateTime<Utc>,
}

// 주소(행정구역) 모델
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub region_code: String,
    pub name: String,
}

/// 소셜 로그인으로 들어온 신규/갱신 회원 정보
#[derive(Debug, Clone)]
pub struct NewUser {
    pub provider: String,
    pub provider_account_id: String,
    pub nickname: String,
    pub profile_url: Option<String>,
}

/// 주소 등록 요청
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub region_code: String,
    #[serde(default)]
    pub name: String,
}

/// addresses 컬럼 길이
pub const MAX_REGION_CODE_LEN: usize = 20;
pub const MAX_ADDRESS_NAME_LEN: usize = 100;

impl AddressRequest {
    /// 앞뒤 공백 제거 후 길이 확인
    pub fn validate(&self) -> Result<(), AppError> {
        let region_code = self.region_code.trim();
        if region_code.is_empty() {
            return Err(AppError::BadRequest("지역 코드가 필요합니다.".to_string()));
        }
        if region_code.chars().count() > MAX_REGION_CODE_LEN {
            return Err(AppError::BadRequest(format!(
                "지역 코드는 {}자 이하여야 합니다.",
                MAX_REGION_CODE_LEN
            )));
        }
        if self.name.trim().chars().count() > MAX_ADDRESS_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "주소 이름은 {}자 이하여야 합니다.",
                MAX_ADDRESS_NAME_LEN
            )));
        }
        Ok(())
    }
}

/// 회원 정보 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub nickname: String,
    pub profile_url: Option<String>,
    pub address: Option<Address>,
}

impl UserProfile {
    pub fn new(user: User, address: Option<Address>) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            profile_url: user.profile_url,
            address,
        }
    }
}
