// region:    --- Imports
use crate::image::ImageFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Auction Status
/// 경매 상태 (BEFORE -> PROGRESS -> COMPLETED, 단방향 전이)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AuctionStatus {
    Before,
    Progress,
    Completed,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Before => "BEFORE",
            AuctionStatus::Progress => "PROGRESS",
            AuctionStatus::Completed => "COMPLETED",
        }
    }

    /// 상태 문자열 파싱. 세 가지 상태 값 외에는 None
    pub fn parse(value: &str) -> Option<AuctionStatus> {
        match value {
            "BEFORE" => Some(AuctionStatus::Before),
            "PROGRESS" => Some(AuctionStatus::Progress),
            "COMPLETED" => Some(AuctionStatus::Completed),
            _ => None,
        }
    }
}

/// 등록 시점의 초기 상태 판정
/// 시작/종료 비교는 반드시 동일한 시각(now) 기준으로 수행한다
pub fn initial_status(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AuctionStatus {
    if start_time <= now && end_time <= now {
        AuctionStatus::Completed
    } else if start_time <= now && end_time > now {
        AuctionStatus::Progress
    } else {
        AuctionStatus::Before
    }
}
// endregion: --- Auction Status

// region:    --- Auction Model
/// 경매 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub car_id: i64,
    pub user_id: i64,
    pub auction_title: String,
    pub auction_start_time: DateTime<Utc>,
    pub auction_end_time: DateTime<Utc>,
    pub auction_start_price: i64,
    pub auction_end_price: i64,
    pub auction_status: AuctionStatus,
}

impl Auction {
    /// 경매 오픈: PROGRESS 상태로 전이. 이후 가격의 원본은 입찰 캐시
    pub fn open(&mut self) {
        self.auction_status = AuctionStatus::Progress;
    }

    /// 경매 종료: 캐시의 최종 가격을 반영하고 COMPLETED 상태로 전이
    pub fn close(&mut self, final_price: i64) {
        self.auction_end_price = final_price;
        self.auction_status = AuctionStatus::Completed;
    }
}

/// 경매 등록 요청
#[derive(Debug, Clone)]
pub struct AuctionRegisterRequest {
    pub car_id: i64,
    pub auction_title: String,
    pub auction_start_time: DateTime<Utc>,
    pub auction_end_time: DateTime<Utc>,
    pub auction_start_price: i64,
    pub images: Vec<ImageFile>,
}

/// 조회용 프로젝션 (경매 + 이미지 URL 목록)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuctionInfo {
    pub auction_id: i64,
    pub car_id: i64,
    pub car_type: String,
    pub auction_title: String,
    pub auction_start_time: DateTime<Utc>,
    pub auction_end_time: DateTime<Utc>,
    pub auction_start_price: i64,
    pub auction_end_price: i64,
    pub auction_status: AuctionStatus,
    #[sqlx(skip)]
    pub images: Vec<String>,
}
// endregion: --- Auction Model

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn initial_status_both_in_past_is_completed() {
        let now = Utc::now();
        let status = initial_status(now - Duration::hours(2), now - Duration::hours(1), now);
        assert_eq!(status, AuctionStatus::Completed);
    }

    #[test]
    fn initial_status_started_but_not_ended_is_progress() {
        let now = Utc::now();
        let status = initial_status(now - Duration::hours(1), now + Duration::hours(1), now);
        assert_eq!(status, AuctionStatus::Progress);
    }

    #[test]
    fn initial_status_both_in_future_is_before() {
        let now = Utc::now();
        let status = initial_status(now + Duration::hours(1), now + Duration::hours(2), now);
        assert_eq!(status, AuctionStatus::Before);
    }

    #[test]
    fn initial_status_start_exactly_now_is_progress() {
        let now = Utc::now();
        let status = initial_status(now, now + Duration::hours(1), now);
        assert_eq!(status, AuctionStatus::Progress);
    }

    #[test]
    fn parse_accepts_only_known_status_values() {
        assert_eq!(
            AuctionStatus::parse("PROGRESS"),
            Some(AuctionStatus::Progress)
        );
        assert_eq!(AuctionStatus::parse("ALL"), None);
        assert_eq!(AuctionStatus::parse("progress"), None);
    }
}
// endregion: --- Tests
