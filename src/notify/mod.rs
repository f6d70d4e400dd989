/// 낙찰 알림 전송
/// 종료된 경매의 입찰자별 알림을 Kafka 토픽으로 비동기 전달한다.
/// 전달 보장(재시도, 실제 발송)은 토픽을 소비하는 별도 서비스의 몫.
// region:    --- Imports
use crate::auction::model::Auction;
use crate::error::{AuctionError, Result};
use crate::user::User;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Notification Message
/// 낙찰 알림 메시지 (토픽 페이로드)
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub auction_id: i64,
    pub auction_title: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub settled_price: i64,
    pub timestamp: DateTime<Utc>,
}
// endregion: --- Notification Message

// region:    --- Notifier
/// 알림 전송 트레이트
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, auction: &Auction, recipient: &User, settled_price: i64) -> Result<()>;
}

/// Kafka 기반 알림 전송 구현체
pub struct KafkaNotifier {
    producer: Arc<FutureProducer>,
    topic: String,
}

impl KafkaNotifier {
    pub fn new(brokers: &str, topic: &str) -> Self {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .expect("Producer creation error");

        KafkaNotifier {
            producer: Arc::new(producer),
            topic: topic.to_string(),
        }
    }

    /// 알림 토픽 생성
    pub async fn create_topic(
        brokers: &str,
        topic_name: &str,
        num_partitions: i32,
        replication_factor: i32,
    ) -> std::result::Result<(), String> {
        info!("{:<12} --> Kafka 토픽 생성 시작: {}", "Notifier", topic_name);

        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .create()
            .map_err(|e| format!("AdminClient 생성 실패: {:?}", e))?;

        let new_topic = NewTopic::new(
            topic_name,
            num_partitions,
            TopicReplication::Fixed(replication_factor),
        );

        match admin_client
            .create_topics(&[new_topic], &AdminOptions::new())
            .await
        {
            Ok(_) => {
                info!("{:<12} --> Kafka 토픽 생성 성공: {}", "Notifier", topic_name);
                Ok(())
            }
            Err(e) => {
                error!("{:<12} --> Kafka 토픽 생성 실패: {:?}", "Notifier", e);
                Err(format!("토픽 생성 실패: {:?}", e))
            }
        }
    }
}

#[async_trait]
impl Notifier for KafkaNotifier {
    /// 알림 전송. 커밋된 종료를 되돌리지 않으므로 실패는 호출 측에서 기록만 한다
    async fn send(&self, auction: &Auction, recipient: &User, settled_price: i64) -> Result<()> {
        let message = NotificationMessage {
            auction_id: auction.id,
            auction_title: auction.auction_title.clone(),
            recipient_name: recipient.user_name.clone(),
            recipient_email: recipient.email.clone(),
            settled_price,
            timestamp: Utc::now(),
        };
        let payload = serde_json::to_string(&message)?;
        let key = auction.id.to_string();

        info!(
            "{:<12} --> 낙찰 알림 전송: auction_id={}, user_id={}, price={}",
            "Notifier", auction.id, recipient.id, settled_price
        );

        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);
        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map_err(|(e, _)| AuctionError::Notification(format!("{:?}", e)))?;

        Ok(())
    }
}
// endregion: --- Notifier
