use async_trait::async_trait;
use nanumi_service::auth::JwtKeys;
use nanumi_service::config::{DatabaseSettings, JwtSettings};
use nanumi_service::database::DatabaseManager;
use nanumi_service::error::{AppError, Entity};
use nanumi_service::matching::repository as match_repository;
use nanumi_service::matching::service as match_service;
use nanumi_service::oauth::service as oauth_service;
use nanumi_service::oauth::{LoginRequest, OauthProvider, OauthProviders, ProviderProfile};
use nanumi_service::product::model::ProductForm;
use nanumi_service::product::repository as product_repository;
use nanumi_service::product::service as product_service;
use nanumi_service::response::PageRequest;
use nanumi_service::review::model::ReviewRequest;
use nanumi_service::review::service as review_service;
use nanumi_service::storage::{ImageStorage, ImageUpload, StorageError};
use nanumi_service::user::model::{AddressRequest, NewUser};
use nanumi_service::user::repository as user_repository;
use nanumi_service::user::service as user_service;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

// region:    --- Test Fixtures

/// 메모리 이미지 저장소
/// fail_after 로 n 번 업로드 후 실패하도록 만들 수 있다.
#[derive(Default)]
struct InMemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    remaining_uploads: Mutex<Option<usize>>,
}

impl InMemoryStorage {
    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn fail_after(&self, uploads: usize) {
        *self.remaining_uploads.lock().unwrap() = Some(uploads);
    }
}

#[async_trait]
impl ImageStorage for InMemoryStorage {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        {
            let mut remaining = self.remaining_uploads.lock().unwrap();
            match remaining.as_mut() {
                Some(0) => return Err(StorageError::Upload(format!("{} 업로드 거부", key))),
                Some(n) => *n -= 1,
                None => {}
            }
        }
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(format!("https://images.test/{}", key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

/// 고정된 회원 정보를 돌려주는 로그인 제공자
struct FixedProvider {
    profile: ProviderProfile,
}

#[async_trait]
impl OauthProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn exchange_token(&self, request: &LoginRequest) -> Result<String, AppError> {
        request
            .access_token
            .clone()
            .ok_or_else(|| AppError::UpstreamAuth("토큰 없음".to_string()))
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<ProviderProfile, AppError> {
        Ok(self.profile.clone())
    }
}

/// 데이터베이스 매니저 설정. DATABASE_URL 이 없으면 테스트를 건너뛴다.
async fn setup() -> Option<Arc<DatabaseManager>> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL 이 없어 DB 테스트를 건너뜁니다.");
            return None;
        }
    };
    let db_manager = DatabaseManager::new(&DatabaseSettings {
        url,
        max_connections: 10,
    })
    .await
    .expect("데이터베이스 연결 실패");
    db_manager
        .initialize_database()
        .await
        .expect("데이터베이스 초기화 실패");
    Some(Arc::new(db_manager))
}

/// 테스트용 회원 생성 (region 이 있으면 주소까지 등록)
async fn create_test_user(db_manager: &DatabaseManager, region: Option<&str>) -> i64 {
    let user = user_repository::upsert(
        db_manager.pool(),
        &NewUser {
            provider: "test".to_string(),
            provider_account_id: Uuid::new_v4().to_string(),
            nickname: "테스트회원".to_string(),
            profile_url: None,
        },
    )
    .await
    .unwrap();

    if let Some(region) = region {
        user_service::register_address(
            db_manager,
            user.id,
            AddressRequest {
                region_code: region.to_string(),
                name: "테스트동".to_string(),
            },
        )
        .await
        .unwrap();
    }
    user.id
}

/// 테스트마다 겹치지 않는 지역 코드
fn unique_region() -> String {
    format!("T{}", &Uuid::new_v4().simple().to_string()[..12])
}

async fn first_category_id(db_manager: &DatabaseManager) -> i64 {
    product_service::list_categories(db_manager).await.unwrap()[0].id
}

fn image(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xff, 0xd8, 0xff],
    }
}

/// 테스트용 상품 생성
async fn create_test_product(
    db_manager: &DatabaseManager,
    storage: &InMemoryStorage,
    owner_id: i64,
    name: &str,
    images: Vec<ImageUpload>,
) -> i64 {
    let form = ProductForm {
        name: name.to_string(),
        content: format!("{} 나눔합니다.", name),
        category_id: first_category_id(db_manager).await,
        images,
    };
    product_service::create_product(db_manager, storage, form, owner_id)
        .await
        .unwrap()
}

/// 신청자 n 명 추가
async fn apply_times(db_manager: &DatabaseManager, product_id: i64, region: &str, n: usize) {
    for _ in 0..n {
        let applicant = create_test_user(db_manager, Some(region)).await;
        let result = match_service::apply_to_product(db_manager, product_id, applicant)
            .await
            .unwrap();
        assert!(result.result);
    }
}

async fn is_closed(db_manager: &DatabaseManager, product_id: i64) -> bool {
    product_repository::find_active(db_manager.pool(), product_id)
        .await
        .unwrap()
        .unwrap()
        .is_closed
}

// endregion: --- Test Fixtures

// region:    --- Match Tests

/// 첫 번째, 두 번째 신청은 모집 중 유지
#[tokio::test]
async fn test_first_two_applications_keep_product_open() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "책상", vec![]).await;

    for expected in 1..=2 {
        let applicant = create_test_user(&db_manager, Some(&region)).await;
        let result = match_service::apply_to_product(&db_manager, product_id, applicant)
            .await
            .unwrap();

        assert!(result.result);
        assert!(result.match_id.is_some());
        assert!(!is_closed(&db_manager, product_id).await);
        assert_eq!(
            match_repository::count_by_product(db_manager.pool(), product_id)
                .await
                .unwrap(),
            expected
        );
    }
}

/// 세 번째 신청은 성공하고 상품이 마감된다
#[tokio::test]
async fn test_third_application_closes_product() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "의자", vec![]).await;
    apply_times(&db_manager, product_id, &region, 2).await;

    let applicant = create_test_user(&db_manager, Some(&region)).await;
    let result = match_service::apply_to_product(&db_manager, product_id, applicant)
        .await
        .unwrap();

    assert!(result.result);
    assert!(result.match_id.is_some());
    assert!(is_closed(&db_manager, product_id).await);
    assert_eq!(
        match_repository::count_by_product(db_manager.pool(), product_id)
            .await
            .unwrap(),
        3
    );
}

/// 정원이 찬 상품의 신청은 거절되고 아무것도 바뀌지 않는다
#[tokio::test]
async fn test_application_to_full_product_is_rejected() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "전자레인지", vec![]).await;
    apply_times(&db_manager, product_id, &region, 3).await;

    let applicant = create_test_user(&db_manager, Some(&region)).await;
    let result = match_service::apply_to_product(&db_manager, product_id, applicant)
        .await
        .unwrap();

    assert!(!result.result);
    assert!(result.match_id.is_none());
    assert_eq!(result.result_message, "인원이 다 찼습니다.");
    assert!(is_closed(&db_manager, product_id).await);
    assert_eq!(
        match_repository::count_by_product(db_manager.pool(), product_id)
            .await
            .unwrap(),
        3
    );

    // 신청자 목록은 신청 순 3명
    let applicants = match_service::list_applicants(&db_manager, product_id)
        .await
        .unwrap();
    assert_eq!(applicants.len(), 3);
    assert!(applicants
        .windows(2)
        .all(|pair| pair[0].create_date <= pair[1].create_date));
}

/// 동시 신청 테스트: 2명이 신청한 상품에 동시에 신청하면 한 명만 성공
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_applications_admit_exactly_one() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "자전거", vec![]).await;
    apply_times(&db_manager, product_id, &region, 2).await;

    let mut applicants = Vec::new();
    for _ in 0..8 {
        applicants.push(create_test_user(&db_manager, Some(&region)).await);
    }

    let mut handles = vec![];
    for applicant in applicants {
        let db_manager = Arc::clone(&db_manager);
        handles.push(tokio::spawn(async move {
            match_service::apply_to_product(&db_manager, product_id, applicant).await
        }));
    }

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        if result.result {
            accepted += 1;
        } else {
            rejected += 1;
        }
    }
    info!("성공한 신청 수: {}, 거절된 신청 수: {}", accepted, rejected);

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 7);
    assert_eq!(
        match_repository::count_by_product(db_manager.pool(), product_id)
            .await
            .unwrap(),
        3
    );
    assert!(is_closed(&db_manager, product_id).await);
}

/// 본인 상품에는 신청할 수 없다
#[tokio::test]
async fn test_owner_cannot_apply_to_own_product() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "화분", vec![]).await;

    let result = match_service::apply_to_product(&db_manager, product_id, owner).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

/// 나눔 대상은 상품당 한 명이며 작성자만 확정할 수 있다
#[tokio::test]
async fn test_confirm_match_rules() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let first = create_test_user(&db_manager, Some(&region)).await;
    let second = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "밥솥", vec![]).await;
    let first_match = match_service::apply_to_product(&db_manager, product_id, first)
        .await
        .unwrap()
        .match_id
        .unwrap();
    let second_match = match_service::apply_to_product(&db_manager, product_id, second)
        .await
        .unwrap()
        .match_id
        .unwrap();

    // 작성자가 아니면 확정할 수 없다
    let by_applicant = match_service::confirm_match(&db_manager, first_match, first).await;
    assert!(matches!(by_applicant, Err(AppError::Forbidden)));

    match_service::confirm_match(&db_manager, first_match, owner)
        .await
        .unwrap();
    // 같은 매칭을 다시 확정해도 성공
    match_service::confirm_match(&db_manager, first_match, owner)
        .await
        .unwrap();

    // 다른 신청자는 확정할 수 없다
    let other = match_service::confirm_match(&db_manager, second_match, owner).await;
    assert!(matches!(other, Err(AppError::BadRequest(_))));

    let confirmed = match_repository::find_active_by_product(db_manager.pool(), product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.id, first_match);
}

// endregion: --- Match Tests

// region:    --- Product Tests

/// 삭제된 상품은 상세 조회되지 않는다
#[tokio::test]
async fn test_soft_deleted_product_is_not_found() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "선풍기", vec![]).await;

    product_service::delete_product(&db_manager, product_id, owner)
        .await
        .unwrap();

    let result = product_service::get_product_detail(&db_manager, product_id).await;
    assert!(matches!(result, Err(AppError::NotFound(Entity::Product))));

    // 행은 남아 있다
    let still_there: bool =
        sqlx::query_scalar("SELECT is_deleted FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(db_manager.pool())
            .await
            .unwrap();
    assert!(still_there);

    // 다시 삭제해도 NotFound
    let again = product_service::delete_product(&db_manager, product_id, owner).await;
    assert!(matches!(again, Err(AppError::NotFound(Entity::Product))));
}

/// 수정하면 이미지가 새 이미지로 전부 교체된다
#[tokio::test]
async fn test_update_replaces_all_images() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(
        &db_manager,
        &storage,
        owner,
        "옷장",
        vec![image("front.jpg"), image("side.jpg")],
    )
    .await;
    let before = product_service::get_product_detail(&db_manager, product_id)
        .await
        .unwrap();
    assert_eq!(before.images.len(), 2);

    let form = ProductForm {
        name: "큰 옷장".to_string(),
        content: "수정된 설명".to_string(),
        category_id: first_category_id(&db_manager).await,
        images: vec![image("new.jpg")],
    };
    product_service::update_product(&db_manager, &storage, product_id, owner, form)
        .await
        .unwrap();

    let after = product_service::get_product_detail(&db_manager, product_id)
        .await
        .unwrap();
    assert_eq!(after.name, "큰 옷장");
    assert_eq!(after.images.len(), 1);
    assert!(before.images.iter().all(|url| !after.images.contains(url)));

    // 저장소에도 새 이미지만 남는다
    let keys = storage.keys();
    assert_eq!(keys.len(), 1);
    assert!(after.images[0].ends_with(&keys[0]));
}

/// 다른 회원은 상품을 수정/삭제할 수 없다
#[tokio::test]
async fn test_only_owner_can_modify_product() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let stranger = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "램프", vec![]).await;

    let result = product_service::delete_product(&db_manager, product_id, stranger).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

/// 주소가 없는 회원은 상품을 등록할 수 없다
#[tokio::test]
async fn test_create_product_requires_address() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let user = create_test_user(&db_manager, None).await;

    let form = ProductForm {
        name: "거울".to_string(),
        content: String::new(),
        category_id: first_category_id(&db_manager).await,
        images: vec![image("mirror.png")],
    };
    let result = product_service::create_product(&db_manager, &storage, form, user).await;

    assert!(matches!(result, Err(AppError::NotFound(Entity::Address))));
    assert!(storage.keys().is_empty());
}

/// 목록/검색은 회원 주소의 상품만 보여준다
#[tokio::test]
async fn test_listing_is_scoped_to_user_address() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let home = unique_region();
    let elsewhere = unique_region();
    let neighbor = create_test_user(&db_manager, Some(&home)).await;
    let stranger = create_test_user(&db_manager, Some(&elsewhere)).await;
    let viewer = create_test_user(&db_manager, Some(&home)).await;

    let near = create_test_product(&db_manager, &storage, neighbor, "동네 유모차", vec![]).await;
    let far = create_test_product(&db_manager, &storage, stranger, "먼 유모차", vec![]).await;
    let deleted = create_test_product(&db_manager, &storage, neighbor, "삭제 유모차", vec![]).await;
    product_service::delete_product(&db_manager, deleted, neighbor)
        .await
        .unwrap();

    let page = product_service::list_products(&db_manager, viewer, PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<i64> = page.content.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![near]);
    assert_eq!(page.total_elements, 1);

    let found = product_service::search_products(&db_manager, viewer, "유모차", PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<i64> = found.content.iter().map(|p| p.id).collect();
    assert!(ids.contains(&near));
    assert!(!ids.contains(&far));
    assert!(!ids.contains(&deleted));

    let category_id = first_category_id(&db_manager).await;
    let by_category =
        product_service::list_by_category(&db_manager, category_id, viewer, PageRequest::default())
            .await
            .unwrap();
    assert!(by_category.content.iter().all(|p| p.id == near));

    let missing =
        product_service::list_by_category(&db_manager, -1, viewer, PageRequest::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound(Entity::Category))));
}

/// 두 번째 이미지 업로드가 실패하면 상품도 이미지도 남지 않는다
#[tokio::test]
async fn test_create_product_is_all_or_nothing() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    storage.fail_after(1);

    let form = ProductForm {
        name: "냉장고".to_string(),
        content: "작동 잘 됩니다".to_string(),
        category_id: first_category_id(&db_manager).await,
        images: vec![image("front.jpg"), image("back.jpg")],
    };
    let result = product_service::create_product(&db_manager, &storage, form, owner).await;

    assert!(matches!(result, Err(AppError::Storage(_))));
    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE user_id = $1")
        .bind(owner)
        .fetch_one(db_manager.pool())
        .await
        .unwrap();
    assert_eq!(products, 0);
    assert!(storage.keys().is_empty());
}

/// 수정 중 업로드가 실패하면 이전 이름과 이미지가 그대로 남는다
#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(
        &db_manager,
        &storage,
        owner,
        "서랍장",
        vec![image("one.jpg"), image("two.jpg")],
    )
    .await;
    let before = product_service::get_product_detail(&db_manager, product_id)
        .await
        .unwrap();
    let keys_before = storage.keys();
    storage.fail_after(1);

    let form = ProductForm {
        name: "새 서랍장".to_string(),
        content: "수정".to_string(),
        category_id: first_category_id(&db_manager).await,
        images: vec![image("three.jpg"), image("four.jpg")],
    };
    let result =
        product_service::update_product(&db_manager, &storage, product_id, owner, form).await;

    assert!(matches!(result, Err(AppError::Storage(_))));
    let after = product_service::get_product_detail(&db_manager, product_id)
        .await
        .unwrap();
    assert_eq!(after.name, "서랍장");
    assert_eq!(after.images, before.images);
    assert_eq!(storage.keys(), keys_before);
}

/// 너무 긴 상품 이름은 저장 전에 거절된다
#[tokio::test]
async fn test_overlong_product_name_is_bad_request() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;

    let form = ProductForm {
        name: "가".repeat(101),
        content: String::new(),
        category_id: first_category_id(&db_manager).await,
        images: vec![],
    };
    let result = product_service::create_product(&db_manager, &storage, form, owner).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

// endregion: --- Product Tests

// region:    --- Review Tests

/// 후기 받는 사람은 매칭 관계에서 정해진다
#[tokio::test]
async fn test_review_receiver_is_derived_from_match() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let applicant = create_test_user(&db_manager, Some(&region)).await;
    let outsider = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "장난감", vec![]).await;
    let match_id = match_service::apply_to_product(&db_manager, product_id, applicant)
        .await
        .unwrap()
        .match_id
        .unwrap();
    match_service::confirm_match(&db_manager, match_id, owner)
        .await
        .unwrap();

    let review = ReviewRequest {
        star_point: 5,
        content: "친절하셨어요".to_string(),
    };

    let saved = review_service::save_user_review(&db_manager, &review, applicant, match_id)
        .await
        .unwrap();
    assert_eq!(saved.receiver_id, owner);

    let saved = review_service::save_user_review(&db_manager, &review, owner, match_id)
        .await
        .unwrap();
    assert_eq!(saved.receiver_id, applicant);

    let forbidden =
        review_service::save_user_review(&db_manager, &review, outsider, match_id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let duplicate =
        review_service::save_user_review(&db_manager, &review, owner, match_id).await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));
}

/// 확정되지 않은 매칭에는 후기를 남길 수 없다
#[tokio::test]
async fn test_review_requires_confirmed_match() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let chosen = create_test_user(&db_manager, Some(&region)).await;
    let waiting = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "인형", vec![]).await;
    let chosen_match = match_service::apply_to_product(&db_manager, product_id, chosen)
        .await
        .unwrap()
        .match_id
        .unwrap();
    let waiting_match = match_service::apply_to_product(&db_manager, product_id, waiting)
        .await
        .unwrap()
        .match_id
        .unwrap();
    match_service::confirm_match(&db_manager, chosen_match, owner)
        .await
        .unwrap();

    let review = ReviewRequest {
        star_point: 3,
        content: String::new(),
    };
    let by_waiting =
        review_service::save_user_review(&db_manager, &review, waiting, waiting_match).await;
    assert!(matches!(by_waiting, Err(AppError::BadRequest(_))));

    let by_owner =
        review_service::save_user_review(&db_manager, &review, owner, waiting_match).await;
    assert!(matches!(by_owner, Err(AppError::BadRequest(_))));

    let reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE match_id = $1")
        .bind(waiting_match)
        .fetch_one(db_manager.pool())
        .await
        .unwrap();
    assert_eq!(reviews, 0);
}

/// 같은 후기를 동시에 보내도 한 건만 저장된다
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_reviews_save_once() {
    let Some(db_manager) = setup().await else { return };
    let storage = InMemoryStorage::default();
    let region = unique_region();
    let owner = create_test_user(&db_manager, Some(&region)).await;
    let applicant = create_test_user(&db_manager, Some(&region)).await;
    let product_id = create_test_product(&db_manager, &storage, owner, "공구", vec![]).await;
    let match_id = match_service::apply_to_product(&db_manager, product_id, applicant)
        .await
        .unwrap()
        .match_id
        .unwrap();
    match_service::confirm_match(&db_manager, match_id, owner)
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..4 {
        let db_manager = Arc::clone(&db_manager);
        handles.push(tokio::spawn(async move {
            let review = ReviewRequest {
                star_point: 5,
                content: "감사합니다".to_string(),
            };
            review_service::save_user_review(&db_manager, &review, applicant, match_id).await
        }));
    }

    let mut saved = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => saved += 1,
            Err(AppError::BadRequest(_)) => {}
            Err(e) => panic!("예상하지 못한 오류: {:?}", e),
        }
    }
    assert_eq!(saved, 1);
}

// endregion: --- Review Tests

// region:    --- Login Tests

/// 같은 외부 계정은 같은 회원으로 로그인되고 정보가 갱신된다
#[tokio::test]
async fn test_login_finds_or_creates_user() {
    let Some(db_manager) = setup().await else { return };
    let jwt_keys = JwtKeys::new(&JwtSettings {
        secret: "integration-test-secret-0123456789".to_string(),
        ttl_seconds: 3600,
        issuer: "nanumi".to_string(),
    });
    let account_id = Uuid::new_v4().to_string();
    let providers_with = |nickname: &str| {
        OauthProviders::new().register(Arc::new(FixedProvider {
            profile: ProviderProfile {
                account_id: account_id.clone(),
                nickname: nickname.to_string(),
                profile_url: None,
            },
        }))
    };
    let request = LoginRequest {
        access_token: Some("provider-token".to_string()),
        ..LoginRequest::default()
    };

    let first = oauth_service::login(
        &db_manager,
        &providers_with("처음이름"),
        &jwt_keys,
        "fixed",
        request.clone(),
    )
    .await
    .unwrap();
    assert!(first.is_new_user);
    assert!(!first.has_address);
    assert_eq!(jwt_keys.verify(&first.access_token).unwrap(), first.user_id);

    let second = oauth_service::login(
        &db_manager,
        &providers_with("바뀐이름"),
        &jwt_keys,
        "fixed",
        request,
    )
    .await
    .unwrap();
    assert!(!second.is_new_user);
    assert_eq!(second.user_id, first.user_id);
    assert_eq!(second.nickname, "바뀐이름");

    // 토큰 교환에 실패하면 회원이 만들어지지 않는다
    let failed = oauth_service::login(
        &db_manager,
        &providers_with("없음"),
        &jwt_keys,
        "fixed",
        LoginRequest::default(),
    )
    .await;
    assert!(matches!(failed, Err(AppError::UpstreamAuth(_))));
}

// endregion: --- Login Tests
