/// 입찰 캐시 저장소
/// 진행 중(PROGRESS) 경매의 실시간 입찰 상태를 보관한다.
/// 경매가 PROGRESS인 동안에는 이 캐시가 가격/입찰자의 원본이고,
/// 종료 전이 시 내구 저장소로 반영된 뒤 엔트리가 삭제된다.
// region:    --- Imports
use crate::auction::model::Auction;
use crate::error::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

// endregion: --- Imports

// region:    --- Bid Cache Model
/// 입찰자 (경매 하나의 입찰자 집합 안에서 user_id 기준 유일)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidder {
    pub user_id: i64,
    pub price: i64,
}

/// 경매별 실시간 입찰 상태
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidCacheEntry {
    pub auction_id: i64,
    pub price: i64,
    pub bidders: Vec<Bidder>,
}

impl BidCacheEntry {
    /// 경매 오픈 시 미러링되는 초기 엔트리 (시작가 기준, 입찰자 없음)
    pub fn from_auction(auction: &Auction) -> Self {
        BidCacheEntry {
            auction_id: auction.id,
            price: auction.auction_start_price,
            bidders: Vec::new(),
        }
    }

    /// 입찰 반영: 동일 사용자는 기존 입찰가를 갱신, 최고가 유지
    pub fn record_bid(&mut self, user_id: i64, price: i64) {
        match self.bidders.iter_mut().find(|b| b.user_id == user_id) {
            Some(bidder) => bidder.price = price,
            None => self.bidders.push(Bidder { user_id, price }),
        }
        if price > self.price {
            self.price = price;
        }
    }
}
// endregion: --- Bid Cache Model

// region:    --- Bid Cache Repository
/// 입찰 캐시 저장소 트레이트
#[async_trait]
pub trait BidCacheRepository: Send + Sync {
    async fn save(&self, entry: &BidCacheEntry) -> Result<()>;
    async fn find_by_id(&self, auction_id: i64) -> Result<Option<BidCacheEntry>>;
    async fn delete(&self, auction_id: i64) -> Result<()>;
}

/// Redis 기반 입찰 캐시 구현체
pub struct RedisBidCache {
    redis: Arc<Mutex<redis::aio::ConnectionManager>>,
    key_prefix: String,
}

impl RedisBidCache {
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("{:<12} --> Redis 연결: {}", "BidCache", redis_url);
        let client = redis::Client::open(redis_url)?;
        let connection_manager = client.get_connection_manager().await?;
        Ok(RedisBidCache {
            redis: Arc::new(Mutex::new(connection_manager)),
            key_prefix: "auction".to_string(),
        })
    }

    fn entry_key(&self, auction_id: i64) -> String {
        format!("{}:{}", self.key_prefix, auction_id)
    }
}

#[async_trait]
impl BidCacheRepository for RedisBidCache {
    /// 엔트리 저장 (last-write-wins, 재실행해도 동일 결과)
    async fn save(&self, entry: &BidCacheEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        let mut redis = self.redis.lock().await;
        redis
            .set::<_, _, ()>(self.entry_key(entry.auction_id), json)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, auction_id: i64) -> Result<Option<BidCacheEntry>> {
        let mut redis = self.redis.lock().await;
        let result: Option<String> = redis.get(self.entry_key(auction_id)).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, auction_id: i64) -> Result<()> {
        let mut redis = self.redis.lock().await;
        redis.del::<_, ()>(self.entry_key(auction_id)).await?;
        Ok(())
    }
}
// endregion: --- Bid Cache Repository

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bid_keeps_one_entry_per_user() {
        let mut entry = BidCacheEntry {
            auction_id: 1,
            price: 1000,
            bidders: Vec::new(),
        };
        entry.record_bid(7, 1500);
        entry.record_bid(7, 2000);
        entry.record_bid(8, 1800);

        assert_eq!(entry.bidders.len(), 2);
        assert_eq!(entry.price, 2000);
        assert_eq!(
            entry.bidders.iter().find(|b| b.user_id == 7).unwrap().price,
            2000
        );
    }
}
// endregion: --- Tests
