/// 카카오 로그인 제공자
// region:    --- Imports
use super::provider::{LoginRequest, OauthProvider, ProviderProfile};
use crate::config::KakaoSettings;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Kakao Responses
#[derive(Debug, Deserialize)]
struct KakaoTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct KakaoUserResponse {
    id: i64,
    properties: Option<KakaoProperties>,
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct KakaoProperties {
    nickname: Option<String>,
    profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
    profile_image_url: Option<String>,
}

impl KakaoUserResponse {
    /// kakao_account.profile 을 우선하고 없으면 properties 를 쓴다
    fn into_profile(self) -> ProviderProfile {
        let (account_nickname, account_image) = self
            .kakao_account
            .and_then(|account| account.profile)
            .map(|profile| (profile.nickname, profile.profile_image_url))
            .unwrap_or_default();
        let (property_nickname, property_image) = self
            .properties
            .map(|properties| (properties.nickname, properties.profile_image))
            .unwrap_or_default();

        ProviderProfile {
            account_id: self.id.to_string(),
            nickname: account_nickname
                .or(property_nickname)
                .unwrap_or_else(|| format!("나눔이{}", self.id)),
            profile_url: account_image.or(property_image),
        }
    }
}
// endregion: --- Kakao Responses

// region:    --- Kakao Provider
pub struct KakaoProvider {
    client: Client,
    settings: KakaoSettings,
}

impl KakaoProvider {
    pub fn new(client: Client, settings: KakaoSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl OauthProvider for KakaoProvider {
    fn name(&self) -> &'static str {
        "kakao"
    }

    async fn exchange_token(&self, request: &LoginRequest) -> Result<String, AppError> {
        // 앱에서 이미 토큰을 받아온 경우
        if let Some(token) = request.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }
        let code = request
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("인가 코드가 필요합니다.".to_string()))?;

        let redirect_uri = request
            .redirect_uri
            .as_deref()
            .unwrap_or(&self.settings.redirect_uri);
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ];
        if let Some(secret) = self.settings.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        info!("{:<12} --> 카카오 토큰 요청", "Oauth");
        let response = self
            .client
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{:<12} --> 카카오 토큰 요청 실패 {}: {}", "Oauth", status, body);
            return Err(AppError::UpstreamAuth(format!("token request failed: {}", status)));
        }

        let token: KakaoTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile, AppError> {
        info!("{:<12} --> 카카오 회원 정보 요청", "Oauth");
        let response = self
            .client
            .get(&self.settings.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{:<12} --> 카카오 회원 정보 요청 실패 {}", "Oauth", status);
            return Err(AppError::UpstreamAuth(format!("profile request failed: {}", status)));
        }

        let user: KakaoUserResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;
        Ok(user.into_profile())
    }
}
// endregion: --- Kakao Provider

// endregion: --- Tests
