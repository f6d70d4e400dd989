/// 경매 이미지 업로드
/// 블롭 스토어에 업로드하고 공개 URL을 돌려준다.
/// 업로드 실패는 해당 등록 요청 전체를 중단시킨다.
// region:    --- Imports
use crate::error::{AuctionError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Image Model
/// 업로드 대상 이미지 파일
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
// endregion: --- Image Model

// region:    --- Image Uploader
/// 이미지 업로더 트레이트
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<String>;
}

/// HTTP 블롭 스토어 업로더 구현체 (S3 호환 PUT 업로드)
pub struct HttpImageUploader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageUploader {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        // 파일명 충돌 방지를 위해 오브젝트 이름에 uuid를 붙인다
        let object_name = format!("{}-{}", Uuid::new_v4(), file.file_name);
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), object_name);

        info!("{:<12} --> 이미지 업로드: {}", "Image", object_name);

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.data.clone())
            .send()
            .await
            .map_err(|e| AuctionError::Upload(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| AuctionError::Upload(e.to_string()))?;

        Ok(url)
    }
}
// endregion: --- Image Uploader
