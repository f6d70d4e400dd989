// region:    --- Imports
use autobid_service::auction::service::AuctionService;
use autobid_service::cache::RedisBidCache;
use autobid_service::database::DatabaseManager;
use autobid_service::image::HttpImageUploader;
use autobid_service::notify::KafkaNotifier;
use autobid_service::scheduler::AuctionScheduler;
use autobid_service::store::PostgresAuctionRepository;
use autobid_service::user::PostgresUserRepository;
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Main
const NOTIFICATION_TOPIC: &str = "notifications";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 입찰 캐시 연결
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string());
    let bid_cache = Arc::new(RedisBidCache::new(&redis_url).await?);
    info!("{:<12} --> 입찰 캐시 연결 성공", "Main");

    // 알림 토픽 준비
    let brokers = std::env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
    if let Err(e) = KafkaNotifier::create_topic(&brokers, NOTIFICATION_TOPIC, 5, 1).await {
        error!("{:<12} --> 알림 토픽 생성 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    let notifier = Arc::new(KafkaNotifier::new(&brokers, NOTIFICATION_TOPIC));
    info!("{:<12} --> 알림 전송기 초기화 성공", "Main");

    // 이미지 업로더
    let image_store_url = std::env::var("IMAGE_STORE_URL")
        .unwrap_or_else(|_| "http://localhost:9000/autobid-images".to_string());
    let image_uploader = Arc::new(HttpImageUploader::new(image_store_url));

    // 저장소 및 서비스 조립
    let auction_repository = Arc::new(PostgresAuctionRepository::new(Arc::clone(&db_manager)));
    let user_repository = Arc::new(PostgresUserRepository::new(Arc::clone(&db_manager)));
    let service = Arc::new(AuctionService::new(
        auction_repository,
        bid_cache,
        user_repository,
        image_uploader,
        notifier,
    ));

    // 스윕 스케줄러 시작
    let scheduler = AuctionScheduler::new(Arc::clone(&service));
    scheduler.start().await;
    info!("{:<12} --> 경매 스윕 스케줄러 시작", "Main");

    // 종료 신호 대기
    tokio::signal::ctrl_c().await?;
    info!("{:<12} --> 종료 신호 수신, 서비스 종료", "Main");
    Ok(())
}
// endregion: --- Main
