/// 상품 이미지 저장소
/// 외부 오브젝트 스토리지를 좁은 인터페이스(upload, delete) 뒤에 둔다.
// region:    --- Imports
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

mod s3;
pub use s3::S3ImageStorage;
// endregion: --- Imports

// region:    --- Storage Trait
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("이미지 업로드 실패: {0}")]
    Upload(String),
    #[error("이미지 삭제 실패: {0}")]
    Delete(String),
}

/// 이미지 저장소 트레이트
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// 주어진 키로 저장하고 공개 URL 반환
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
// endregion: --- Storage Trait

// region:    --- Image Model
/// 업로드 요청된 이미지 파일
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 저장소에 올라간 이미지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}
// endregion: --- Image Model

// region:    --- Helpers
/// 상품별 고유 이미지 키 생성: products/{product_id}/{uuid}.{ext}
pub fn image_key(product_id: i64, file_name: &str) -> String {
    let id = Uuid::new_v4();
    match extension(file_name) {
        Some(ext) => format!("products/{}/{}.{}", product_id, id, ext),
        None => format!("products/{}/{}", product_id, id),
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let valid = !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

/// 이미지 일괄 업로드
/// 중간에 실패하면 이번 요청으로 올라간 이미지를 지우고 오류를 돌려준다.
pub async fn upload_all(
    storage: &dyn ImageStorage,
    product_id: i64,
    images: Vec<ImageUpload>,
) -> Result<Vec<StoredImage>, StorageError> {
    let mut stored = Vec::with_capacity(images.len());
    for image in images {
        let key = image_key(product_id, &image.file_name);
        match storage.upload(&key, &image.content_type, image.bytes).await {
            Ok(url) => stored.push(StoredImage { key, url }),
            Err(e) => {
                warn!(
                    "{:<12} --> 업로드 실패, 업로드된 {}개 정리: {}",
                    "Storage",
                    stored.len(),
                    e
                );
                discard(storage, &stored).await;
                return Err(e);
            }
        }
    }
    info!(
        "{:<12} --> 상품 {} 이미지 {}개 업로드",
        "Storage",
        product_id,
        stored.len()
    );
    Ok(stored)
}

/// 이미지 일괄 삭제 (첫 실패를 그대로 전파)
pub async fn delete_all(storage: &dyn ImageStorage, keys: &[String]) -> Result<(), StorageError> {
    for key in keys {
        storage.delete(key).await?;
    }
    Ok(())
}

/// 롤백용 정리. 실패는 로그만 남긴다.
pub async fn discard(storage: &dyn ImageStorage, stored: &[StoredImage]) {
    for image in stored {
        if let Err(e) = storage.delete(&image.key).await {
            warn!("{:<12} --> 이미지 정리 실패 {}: {}", "Storage", image.key, e);
        }
    }
}
// endregion: --- Helpers

// endregion: --- Tests
