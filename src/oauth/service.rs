/// 소셜 로그인 서비스
/// 제공자 자격 증명 -> 제공자 회원 정보 -> 로컬 회원(찾거나 생성) -> 세션 토큰
// region:    --- Imports
use super::provider::{LoginRequest, OauthProvider};
use crate::auth::JwtKeys;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::user::model::NewUser;
use crate::user::repository as user_repository;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Providers
/// 이름으로 찾는 로그인 제공자 목록
#[derive(Default, Clone)]
pub struct OauthProviders {
    providers: HashMap<&'static str, Arc<dyn OauthProvider>>,
}

impl OauthProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn OauthProvider>) -> Self {
        self.providers.insert(provider.name(), provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn OauthProvider>> {
        self.providers.get(name).cloned()
    }
}
// endregion: --- Providers

// region:    --- Login
/// 로그인 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i64,
    pub nickname: String,
    pub profile_url: Option<String>,
    pub access_token: String,
    pub token_type: &'static str,
    pub is_new_user: bool,
    pub has_address: bool,
}

/// 소셜 로그인
pub async fn login(
    db_manager: &DatabaseManager,
    providers: &OauthProviders,
    jwt_keys: &JwtKeys,
    provider_name: &str,
    request: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let provider = providers
        .get(provider_name)
        .ok_or_else(|| AppError::BadRequest(format!("지원하지 않는 로그인입니다: {}", provider_name)))?;
    info!("{:<12} --> 소셜 로그인 시작: {}", "Oauth", provider.name());

    let provider_token = provider.exchange_token(&request).await?;
    let profile = provider.fetch_profile(&provider_token).await?;

    let existing =
        user_repository::find_by_provider_account(db_manager.pool(), provider.name(), &profile.account_id)
            .await?;
    let user = user_repository::upsert(
        db_manager.pool(),
        &NewUser {
            provider: provider.name().to_string(),
            provider_account_id: profile.account_id,
            nickname: profile.nickname,
            profile_url: profile.profile_url,
        },
    )
    .await?;

    let access_token = jwt_keys.issue(user.id)?;
    info!(
        "{:<12} --> 소셜 로그인 완료 user: {}, 신규: {}",
        "Oauth",
        user.id,
        existing.is_none()
    );

    Ok(LoginResponse {
        user_id: user.id,
        nickname: user.nickname,
        profile_url: user.profile_url,
        access_token,
        token_type: "Bearer",
        is_new_user: existing.is_none(),
        has_address: user.address_id.is_some(),
    })
}
// endregion: --- Login

// endregion: --- Tests
