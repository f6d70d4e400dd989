/// 경매 생명주기 코디네이터
/// 1. 경매 등록 (시간 창 기준 초기 상태 판정)
/// 2. 오픈 스윕 (BEFORE -> PROGRESS, 캐시 엔트리 미러링)
/// 3. 종료 스윕 (PROGRESS -> COMPLETED, 낙찰 정산과 알림 팬아웃)
///
/// 내구 저장소와 입찰 캐시가 동시에 원본이 되는 일은 없다.
/// PROGRESS 동안에만 캐시가 가격의 원본이고, 전이 함수가 원본을 옮긴다.
// region:    --- Imports
use crate::auction::model::{initial_status, Auction, AuctionRegisterRequest, AuctionStatus};
use crate::cache::{BidCacheEntry, BidCacheRepository, Bidder};
use crate::error::{AuctionError, Result};
use crate::image::ImageUploader;
use crate::notify::Notifier;
use crate::store::AuctionRepository;
use crate::user::{User, UserRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Auction Service
pub struct AuctionService {
    auction_repository: Arc<dyn AuctionRepository>,
    bid_cache: Arc<dyn BidCacheRepository>,
    user_repository: Arc<dyn UserRepository>,
    image_uploader: Arc<dyn ImageUploader>,
    notifier: Arc<dyn Notifier>,
}

impl AuctionService {
    pub fn new(
        auction_repository: Arc<dyn AuctionRepository>,
        bid_cache: Arc<dyn BidCacheRepository>,
        user_repository: Arc<dyn UserRepository>,
        image_uploader: Arc<dyn ImageUploader>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auction_repository,
            bid_cache,
            user_repository,
            image_uploader,
            notifier,
        }
    }

    /// 경매 등록
    /// 이미지를 먼저 업로드한 뒤 경매와 이미지 레코드를 한 트랜잭션으로 저장한다.
    /// 업로드 실패는 등록 전체를 중단시킨다.
    pub async fn register_auction(
        &self,
        request: AuctionRegisterRequest,
        owner: &User,
    ) -> Result<Auction> {
        // 시작/종료 비교는 같은 시각 기준이어야 상태가 갈라지지 않는다
        let now = Utc::now();
        let status = initial_status(request.auction_start_time, request.auction_end_time, now);

        let mut image_urls = Vec::with_capacity(request.images.len());
        for image in &request.images {
            image_urls.push(self.image_uploader.upload(image).await?);
        }

        let auction = Auction {
            id: 0,
            car_id: request.car_id,
            user_id: owner.id,
            auction_title: request.auction_title,
            auction_start_time: request.auction_start_time,
            auction_end_time: request.auction_end_time,
            auction_start_price: request.auction_start_price,
            auction_end_price: request.auction_start_price,
            auction_status: status,
        };
        let auction = self
            .auction_repository
            .create_with_images(auction, &image_urls)
            .await?;

        // 시작 시간이 이미 지난 경매는 오픈 스윕을 거치지 않으므로
        // 여기서 캐시 엔트리를 미러링해야 PROGRESS 불변식이 지켜진다
        if auction.auction_status == AuctionStatus::Progress {
            self.bid_cache
                .save(&BidCacheEntry::from_auction(&auction))
                .await?;
        }

        info!(
            "{:<12} --> 경매 등록 완료: id={}, status={:?}",
            "Lifecycle", auction.id, auction.auction_status
        );
        Ok(auction)
    }

    /// 오픈 스윕: 시작 시간이 지난 BEFORE 경매를 모두 PROGRESS로 전이
    /// 재실행해도 이미 전이된 경매는 후보에서 빠지므로 안전하다
    pub async fn sweep_open(&self, now: DateTime<Utc>) -> Result<usize> {
        let auctions = self
            .auction_repository
            .find_by_status_and_start_before(AuctionStatus::Before, now)
            .await?;

        let mut opened = 0;
        for mut auction in auctions {
            // 경매 하나의 실패가 배치 전체를 중단하지 않도록 개별 처리
            match self.open_auction(&mut auction).await {
                Ok(()) => opened += 1,
                Err(e) => error!(
                    "{:<12} --> 경매 오픈 실패: id={}, {:?}",
                    "Lifecycle", auction.id, e
                ),
            }
        }

        if opened > 0 {
            info!("{:<12} --> 오픈 스윕 완료: {}건", "Lifecycle", opened);
        }
        Ok(opened)
    }

    /// 단일 경매 오픈: 내구 저장 후 캐시 엔트리 미러링
    /// 캐시 저장은 last-write-wins라 중복 처리돼도 같은 엔트리가 된다
    async fn open_auction(&self, auction: &mut Auction) -> Result<()> {
        auction.open();
        self.auction_repository.save(auction).await?;
        self.bid_cache
            .save(&BidCacheEntry::from_auction(auction))
            .await?;
        Ok(())
    }

    /// 종료 스윕: 종료 시간이 지난 PROGRESS 경매를 모두 COMPLETED로 전이하고
    /// 입찰자 전원에게 낙찰 알림을 보낸다
    pub async fn sweep_close(&self, now: DateTime<Utc>) -> Result<usize> {
        let auctions = self
            .auction_repository
            .find_by_status_and_end_before(AuctionStatus::Progress, now)
            .await?;

        let mut closed = 0;
        for mut auction in auctions {
            let bidders = match self.close_auction(&mut auction).await {
                Ok(bidders) => bidders,
                Err(e) => {
                    // 캐시 엔트리가 없으면 이 경매는 PROGRESS로 남아 다음 스윕 대상이 된다
                    error!(
                        "{:<12} --> 경매 종료 실패: id={}, {:?}",
                        "Lifecycle", auction.id, e
                    );
                    continue;
                }
            };
            closed += 1;
            // 내구 커밋 이후에는 알림 실패가 종료를 되돌리지 않는다
            self.notify_bidders(&auction, &bidders).await;
        }

        if closed > 0 {
            info!("{:<12} --> 종료 스윕 완료: {}건", "Lifecycle", closed);
        }
        Ok(closed)
    }

    /// 단일 경매 종료: 캐시의 최종 가격/입찰자를 내구 저장소로 반영하고 캐시를 삭제
    async fn close_auction(&self, auction: &mut Auction) -> Result<Vec<Bidder>> {
        let entry = self
            .bid_cache
            .find_by_id(auction.id)
            .await?
            .ok_or(AuctionError::CacheEntryMissing {
                auction_id: auction.id,
            })?;

        auction.close(entry.price);
        self.auction_repository
            .save_closed(auction, &entry.bidders)
            .await?;
        self.bid_cache.delete(auction.id).await?;

        Ok(entry.bidders)
    }

    /// 낙찰 알림 팬아웃. 입찰자 한 명의 실패가 나머지 전송을 막지 않는다
    async fn notify_bidders(&self, auction: &Auction, bidders: &[Bidder]) {
        for bidder in bidders {
            let user = match self.user_repository.find_user_by_id(bidder.user_id).await {
                Ok(user) => user,
                Err(e) => {
                    error!(
                        "{:<12} --> 알림 수신자 조회 실패: auction_id={}, user_id={}, {:?}",
                        "Lifecycle", auction.id, bidder.user_id, e
                    );
                    continue;
                }
            };
            if let Err(e) = self.notifier.send(auction, &user, bidder.price).await {
                error!(
                    "{:<12} --> 낙찰 알림 전송 실패: auction_id={}, user_id={}, {:?}",
                    "Lifecycle", auction.id, user.id, e
                );
            }
        }
    }
}
// endregion: --- Auction Service
