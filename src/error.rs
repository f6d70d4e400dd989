// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Auction Error
/// 경매 서비스 공통 에러
#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),

    #[error("입찰 캐시 오류: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("직렬화 오류: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("이미지 업로드 오류: {0}")]
    Upload(String),

    /// 종료 대상 경매의 캐시 엔트리가 없으면 해당 경매의 종료를 진행할 수 없다
    #[error("입찰 캐시 엔트리 없음: auction_id={auction_id}")]
    CacheEntryMissing { auction_id: i64 },

    #[error("사용자 없음: user_id={user_id}")]
    UserNotFound { user_id: i64 },

    #[error("알림 전송 오류: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, AuctionError>;
// endregion: --- Auction Error
