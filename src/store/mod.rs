/// 경매 내구 저장소 (시스템의 레코드 원본)
// region:    --- Imports
use crate::auction::model::{Auction, AuctionInfo, AuctionStatus};
use crate::cache::Bidder;
use crate::database::DatabaseManager;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub mod queries;

// endregion: --- Imports

// region:    --- Auction Repository Trait
/// 경매 내구 저장소 트레이트
#[async_trait]
pub trait AuctionRepository: Send + Sync {
    /// 경매와 이미지 레코드를 하나의 트랜잭션으로 등록
    async fn create_with_images(&self, auction: Auction, image_urls: &[String])
        -> Result<Auction>;

    /// 경매 단건 갱신 (상태 전이 반영)
    async fn save(&self, auction: &Auction) -> Result<()>;

    /// 종료 경매 갱신과 입찰자 내구 반영을 하나의 트랜잭션으로 수행
    async fn save_closed(&self, auction: &Auction, bidders: &[Bidder]) -> Result<()>;

    async fn find_by_status_and_start_before(
        &self,
        status: AuctionStatus,
        time: DateTime<Utc>,
    ) -> Result<Vec<Auction>>;

    async fn find_by_status_and_end_before(
        &self,
        status: AuctionStatus,
        time: DateTime<Utc>,
    ) -> Result<Vec<Auction>>;

    /// 필터 조회. 결과는 낙찰가 오름차순 정렬 보장
    async fn find_by_filters(
        &self,
        car_type: Option<&str>,
        status: Option<AuctionStatus>,
        start_price: i64,
        end_price: i64,
    ) -> Result<Vec<AuctionInfo>>;

    /// 통계용 낙찰가 조회. 결과는 오름차순 정렬 보장
    async fn find_prices_for_statistics(
        &self,
        car_type: Option<&str>,
        status: Option<AuctionStatus>,
    ) -> Result<Vec<i64>>;

    async fn count_by_status(&self, status: AuctionStatus) -> Result<i64>;

    async fn find_images_by_auction_id(&self, auction_id: i64) -> Result<Vec<String>>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<AuctionInfo>>;

    async fn find_participating_by_user_id(&self, user_id: i64) -> Result<Vec<AuctionInfo>>;
}
// endregion: --- Auction Repository Trait

// region:    --- Postgres Auction Repository
/// Postgres 기반 경매 저장소 구현체
pub struct PostgresAuctionRepository {
    db: Arc<DatabaseManager>,
}

impl PostgresAuctionRepository {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuctionRepository for PostgresAuctionRepository {
    async fn create_with_images(
        &self,
        auction: Auction,
        image_urls: &[String],
    ) -> Result<Auction> {
        info!(
            "{:<12} --> 경매 등록: title={}, images={}",
            "Store",
            auction.auction_title,
            image_urls.len()
        );
        let image_urls = image_urls.to_vec();
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let saved = sqlx::query_as::<_, Auction>(queries::INSERT_AUCTION)
                        .bind(auction.car_id)
                        .bind(auction.user_id)
                        .bind(&auction.auction_title)
                        .bind(auction.auction_start_time)
                        .bind(auction.auction_end_time)
                        .bind(auction.auction_start_price)
                        .bind(auction.auction_end_price)
                        .bind(auction.auction_status)
                        .fetch_one(&mut **tx)
                        .await?;

                    for image_url in &image_urls {
                        sqlx::query(queries::INSERT_IMAGE)
                            .bind(saved.id)
                            .bind(image_url)
                            .execute(&mut **tx)
                            .await?;
                    }

                    Ok(saved)
                })
            })
            .await
    }

    async fn save(&self, auction: &Auction) -> Result<()> {
        let auction = auction.clone();
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query(queries::UPDATE_AUCTION)
                        .bind(auction.auction_end_price)
                        .bind(auction.auction_status)
                        .bind(auction.id)
                        .execute(&mut **tx)
                        .await?;
                    Ok(())
                })
            })
            .await
    }

    async fn save_closed(&self, auction: &Auction, bidders: &[Bidder]) -> Result<()> {
        let auction = auction.clone();
        let bidders = bidders.to_vec();
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query(queries::UPDATE_AUCTION)
                        .bind(auction.auction_end_price)
                        .bind(auction.auction_status)
                        .bind(auction.id)
                        .execute(&mut **tx)
                        .await?;

                    for bidder in &bidders {
                        sqlx::query(queries::UPSERT_BID)
                            .bind(auction.id)
                            .bind(bidder.user_id)
                            .bind(bidder.price)
                            .execute(&mut **tx)
                            .await?;
                    }

                    Ok(())
                })
            })
            .await
    }

    async fn find_by_status_and_start_before(
        &self,
        status: AuctionStatus,
        time: DateTime<Utc>,
    ) -> Result<Vec<Auction>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(
                        sqlx::query_as::<_, Auction>(queries::FIND_BY_STATUS_AND_START_BEFORE)
                            .bind(status)
                            .bind(time)
                            .fetch_all(&mut **tx)
                            .await?,
                    )
                })
            })
            .await
    }

    async fn find_by_status_and_end_before(
        &self,
        status: AuctionStatus,
        time: DateTime<Utc>,
    ) -> Result<Vec<Auction>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(
                        sqlx::query_as::<_, Auction>(queries::FIND_BY_STATUS_AND_END_BEFORE)
                            .bind(status)
                            .bind(time)
                            .fetch_all(&mut **tx)
                            .await?,
                    )
                })
            })
            .await
    }

    async fn find_by_filters(
        &self,
        car_type: Option<&str>,
        status: Option<AuctionStatus>,
        start_price: i64,
        end_price: i64,
    ) -> Result<Vec<AuctionInfo>> {
        let car_type = car_type.map(str::to_string);
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let query = match (&car_type, status) {
                        (None, None) => sqlx::query_as::<_, AuctionInfo>(queries::FIND_BY_FILTERS)
                            .bind(start_price)
                            .bind(end_price),
                        (None, Some(status)) => {
                            sqlx::query_as::<_, AuctionInfo>(queries::FIND_BY_FILTERS_WITH_STATUS)
                                .bind(start_price)
                                .bind(end_price)
                                .bind(status)
                        }
                        (Some(car_type), None) => {
                            sqlx::query_as::<_, AuctionInfo>(queries::FIND_BY_FILTERS_WITH_CAR_TYPE)
                                .bind(start_price)
                                .bind(end_price)
                                .bind(car_type.clone())
                        }
                        (Some(car_type), Some(status)) => sqlx::query_as::<_, AuctionInfo>(
                            queries::FIND_BY_FILTERS_WITH_STATUS_AND_CAR_TYPE,
                        )
                        .bind(start_price)
                        .bind(end_price)
                        .bind(status)
                        .bind(car_type.clone()),
                    };

                    Ok(query.fetch_all(&mut **tx).await?)
                })
            })
            .await
    }

    async fn find_prices_for_statistics(
        &self,
        car_type: Option<&str>,
        status: Option<AuctionStatus>,
    ) -> Result<Vec<i64>> {
        let car_type = car_type.map(str::to_string);
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let query = match (&car_type, status) {
                        (None, None) => {
                            sqlx::query_scalar::<_, i64>(queries::FIND_PRICES_FOR_STATISTICS)
                        }
                        (None, Some(status)) => {
                            sqlx::query_scalar::<_, i64>(queries::FIND_PRICES_BY_STATUS)
                                .bind(status)
                        }
                        (Some(car_type), None) => {
                            sqlx::query_scalar::<_, i64>(queries::FIND_PRICES_BY_CAR_TYPE)
                                .bind(car_type.clone())
                        }
                        (Some(car_type), Some(status)) => {
                            sqlx::query_scalar::<_, i64>(queries::FIND_PRICES_BY_STATUS_AND_CAR_TYPE)
                                .bind(status)
                                .bind(car_type.clone())
                        }
                    };

                    Ok(query.fetch_all(&mut **tx).await?)
                })
            })
            .await
    }

    async fn count_by_status(&self, status: AuctionStatus) -> Result<i64> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(sqlx::query_scalar::<_, i64>(queries::COUNT_BY_STATUS)
                        .bind(status)
                        .fetch_one(&mut **tx)
                        .await?)
                })
            })
            .await
    }

    async fn find_images_by_auction_id(&self, auction_id: i64) -> Result<Vec<String>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(
                        sqlx::query_scalar::<_, String>(queries::FIND_IMAGES_BY_AUCTION_ID)
                            .bind(auction_id)
                            .fetch_all(&mut **tx)
                            .await?,
                    )
                })
            })
            .await
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<AuctionInfo>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(sqlx::query_as::<_, AuctionInfo>(queries::FIND_BY_USER_ID)
                        .bind(user_id)
                        .fetch_all(&mut **tx)
                        .await?)
                })
            })
            .await
    }

    async fn find_participating_by_user_id(&self, user_id: i64) -> Result<Vec<AuctionInfo>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok(
                        sqlx::query_as::<_, AuctionInfo>(queries::FIND_PARTICIPATING_BY_USER_ID)
                            .bind(user_id)
                            .fetch_all(&mut **tx)
                            .await?,
                    )
                })
            })
            .await
    }
}
// endregion: --- Postgres Auction Repository
