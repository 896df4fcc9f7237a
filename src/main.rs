// region:    --- Imports
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use nanumi_service::auth::JwtKeys;
use nanumi_service::config::Settings;
use nanumi_service::database::DatabaseManager;
use nanumi_service::handlers::{self, AppState};
use nanumi_service::oauth::{KakaoProvider, OauthProviders};
use nanumi_service::storage::S3ImageStorage;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let settings = Settings::load()?;

    // DatabaseManager 생성
    let db_manager = match DatabaseManager::new(&settings.database).await {
        Ok(db_manager) => Arc::new(db_manager),
        Err(e) => {
            error!("{:<12} --> 데이터베이스 연결 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 이미지 저장소
    let storage = Arc::new(S3ImageStorage::from_settings(&settings.storage).await);

    // 소셜 로그인 제공자
    let oauth_providers = OauthProviders::new().register(Arc::new(KakaoProvider::new(
        reqwest::Client::new(),
        settings.oauth.kakao.clone(),
    )));

    let state = AppState {
        db_manager,
        storage,
        oauth_providers: Arc::new(oauth_providers),
        jwt_keys: Arc::new(JwtKeys::new(&settings.jwt)),
    };

    // cors 설정
    let origins: Vec<HeaderValue> = settings
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("{:<12} --> 잘못된 origin 무시: {}", "Main", origin);
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = handlers::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * settings.server.body_limit_mb));

    // 리스너 생성
    let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
