// region:    --- Imports
use crate::auth::JwtKeys;
use crate::database::DatabaseManager;
use crate::oauth::OauthProviders;
use crate::storage::ImageStorage;
use axum::extract::FromRef;
use axum::routing::{get, patch, post, put};
use axum::Router;
use std::sync::Arc;

mod extract;
pub mod matching;
pub mod oauth;
pub mod product;
pub mod review;
pub mod user;
// endregion: --- Imports

// region:    --- App State
/// 핸들러 공용 상태
#[derive(Clone)]
pub struct AppState {
    pub db_manager: Arc<DatabaseManager>,
    pub storage: Arc<dyn ImageStorage>,
    pub oauth_providers: Arc<OauthProviders>,
    pub jwt_keys: Arc<JwtKeys>,
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.jwt_keys)
    }
}
// endregion: --- App State

// region:    --- Routes
/// 라우터 설정
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/oauth/:provider/login", post(oauth::handle_login))
        .route("/users/me", get(user::handle_get_me))
        .route("/users/me/address", put(user::handle_register_address))
        .route("/categories", get(product::handle_get_categories))
        .route(
            "/products",
            get(product::handle_get_products).post(product::handle_create_product),
        )
        .route("/products/search", get(product::handle_search_products))
        .route(
            "/products/categories/:category_id",
            get(product::handle_get_category_products),
        )
        .route(
            "/products/:product_id",
            get(product::handle_get_product)
                .patch(product::handle_update_product)
                .delete(product::handle_delete_product),
        )
        .route(
            "/products/:product_id/matches",
            get(matching::handle_get_applicants).post(matching::handle_apply),
        )
        .route("/matches/:match_id/confirm", patch(matching::handle_confirm))
        .route(
            "/matches/:match_id/reviews/:user_id",
            post(review::handle_save_review),
        )
        .with_state(state)
}
// endregion: --- Routes

// endregion: --- Tests
