// region:    --- Imports
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
// endregion: --- Imports

/// 소셜 로그인 요청. 인가 코드 또는 이미 발급받은 제공자 액세스 토큰
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub code: Option<String>,
    pub access_token: Option<String>,
    pub redirect_uri: Option<String>,
}

/// 제공자에서 받아온 회원 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub account_id: String,
    pub nickname: String,
    pub profile_url: Option<String>,
}

/// 소셜 로그인 제공자 트레이트
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OauthProvider: Send + Sync {
    /// 경로와 회원 테이블에 쓰이는 제공자 이름
    fn name(&self) -> &'static str;

    /// 로그인 요청을 제공자 액세스 토큰으로 교환
    async fn exchange_token(&self, request: &LoginRequest) -> Result<String, AppError>;

    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile, AppError>;
}
