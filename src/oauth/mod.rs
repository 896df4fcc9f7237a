pub mod kakao;
pub mod provider;
pub mod service;

pub use kakao::KakaoProvider;
pub use provider::{LoginRequest, OauthProvider, ProviderProfile};
pub use service::{LoginResponse, OauthProviders};
