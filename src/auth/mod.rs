/// 로컬 세션 토큰(JWT) 발급/검증과 인증 사용자 추출
// region:    --- Imports
use crate::config::JwtSettings;
use crate::error::AppError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
// endregion: --- Imports

// region:    --- Jwt Keys
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    iss: String,
}

pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
    issuer: String,
}

impl JwtKeys {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            ttl_seconds: settings.ttl_seconds,
            issuer: settings.issuer.clone(),
        }
    }

    /// 회원 id 로 세션 토큰 발급
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            iss: self.issuer.clone(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |e| {
                error!("{:<12} --> 토큰 발급 실패: {:?}", "Auth", e);
                AppError::Unauthorized
            },
        )
    }

    /// 토큰 검증 후 회원 id 반환
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!("{:<12} --> 토큰 검증 실패: {:?}", "Auth", e);
            AppError::Unauthorized
        })?;
        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized)
    }
}
// endregion: --- Jwt Keys

// region:    --- Auth Extractor
/// Authorization: Bearer 토큰으로 인증된 회원
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<JwtKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let keys = Arc::<JwtKeys>::from_ref(state);
        let user_id = keys.verify(token.trim())?;
        Ok(AuthUser { user_id })
    }
}
// endregion: --- Auth Extractor

// endregion: --- Tests
