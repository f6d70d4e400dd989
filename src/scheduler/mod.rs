/// 경매 스윕 스케줄러
/// 주기적으로 현재 시각을 잡아 오픈/종료 스윕을 호출한다.
/// 스윕 자체는 멱등이라 여러 인스턴스가 같은 시간 창을 돌아도
/// 상태 필터에서 이미 전이된 경매는 후보에 들어오지 않는다.
// region:    --- Imports
use crate::auction::service::AuctionService;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::error;

// endregion: --- Imports

// region:    --- Auction Scheduler
pub struct AuctionScheduler {
    service: Arc<AuctionService>,
}

impl AuctionScheduler {
    pub fn new(service: Arc<AuctionService>) -> Self {
        Self { service }
    }

    /// 스케줄러 시작 (1초 간격)
    pub async fn start(&self) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                let now = Utc::now();
                if let Err(e) = service.sweep_open(now).await {
                    error!("{:<12} --> 오픈 스윕 오류: {:?}", "Scheduler", e);
                }
                if let Err(e) = service.sweep_close(now).await {
                    error!("{:<12} --> 종료 스윕 오류: {:?}", "Scheduler", e);
                }
            }
        });
    }
}
// endregion: --- Auction Scheduler
