// region:    --- Imports
use super::{ImageStorage, StorageError};
use crate::config::StorageSettings;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
// endregion: --- Imports

// region:    --- S3 Image Storage
/// S3 호환 버킷 구현체
#[derive(Clone, Debug)]
pub struct S3ImageStorage {
    inner: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStorage {
    pub fn new(inner: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            inner,
            bucket,
            public_base_url,
        }
    }

    /// 설정으로부터 클라이언트 생성
    pub async fn from_settings(settings: &StorageSettings) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        // MinIO 등 로컬 엔드포인트는 path-style 주소를 쓴다
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(
            aws_sdk_s3::Client::from_conf(builder.build()),
            settings.bucket.clone(),
            settings.public_base_url.clone(),
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ImageStorage for S3ImageStorage {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(&e).to_string()))?;

        info!("{:<12} --> 업로드 완료: {}", "Storage", key);
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(DisplayErrorContext(&e).to_string()))?;

        info!("{:<12} --> 삭제 완료: {}", "Storage", key);
        Ok(())
    }
}
// endregion: --- S3 Image Storage
