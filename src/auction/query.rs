/// 경매 조회 및 통계 엔진
/// 1. 필터/페이지네이션 목록 조회 (이미지 URL 포함)
/// 2. 완료 경매 낙찰가 20버킷 히스토그램 통계
// region:    --- Imports
use crate::auction::model::{AuctionInfo, AuctionStatus};
use crate::error::Result;
use crate::store::AuctionRepository;
use crate::user::User;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Responses
/// 경매 목록 응답
#[derive(Debug, Serialize)]
pub struct AuctionInfoListResponse {
    pub auctions: Vec<AuctionInfo>,
    pub total_auction_num: usize,
}

/// 경매 통계 응답
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AuctionStatisticsResponse {
    pub total_sold: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub contents: [i64; 20],
}
// endregion: --- Responses

// region:    --- Query Service
pub struct AuctionQueryService {
    auction_repository: Arc<dyn AuctionRepository>,
}

impl AuctionQueryService {
    pub fn new(auction_repository: Arc<dyn AuctionRepository>) -> Self {
        Self { auction_repository }
    }

    /// 필터 목록 조회. "ALL"은 해당 필터 해제
    pub async fn get_auctions(
        &self,
        car_type: &str,
        auction_status: &str,
        start_price: i64,
        end_price: i64,
        page: usize,
        size: usize,
    ) -> Result<AuctionInfoListResponse> {
        info!(
            "{:<12} --> 경매 목록 조회: carType={}, status={}, page={}, size={}",
            "Query", car_type, auction_status, page, size
        );
        // 알 수 없는 상태 값은 어떤 경매와도 일치하지 않으므로 빈 목록
        let Some(status) = status_filter(auction_status) else {
            return Ok(AuctionInfoListResponse {
                auctions: Vec::new(),
                total_auction_num: 0,
            });
        };
        let auctions = self
            .auction_repository
            .find_by_filters(filter_value(car_type), status, start_price, end_price)
            .await?;

        let total_auction_num = auctions.len();
        let page_items = paginate(auctions, page, size);
        let auctions = self.attach_images(page_items).await?;

        Ok(AuctionInfoListResponse {
            auctions,
            total_auction_num,
        })
    }

    /// 완료 경매 낙찰가 통계
    /// total_sold는 필터와 무관한 전체 완료 건수다 (원 동작 유지)
    pub async fn get_statistics(
        &self,
        car_type: &str,
        auction_status: &str,
    ) -> Result<AuctionStatisticsResponse> {
        info!(
            "{:<12} --> 경매 통계 조회: carType={}, status={}",
            "Query", car_type, auction_status
        );
        // 알 수 없는 상태 값은 후보가 없는 것과 같으므로 0 통계
        let Some(status) = status_filter(auction_status) else {
            return Ok(AuctionStatisticsResponse {
                total_sold: 0,
                min_price: 0,
                max_price: 0,
                contents: [0; 20],
            });
        };
        let prices = self
            .auction_repository
            .find_prices_for_statistics(filter_value(car_type), status)
            .await?;

        if prices.is_empty() {
            return Ok(AuctionStatisticsResponse {
                total_sold: 0,
                min_price: 0,
                max_price: 0,
                contents: [0; 20],
            });
        }

        let total_sold = self
            .auction_repository
            .count_by_status(AuctionStatus::Completed)
            .await?;

        Ok(build_histogram(total_sold, &prices))
    }

    /// 내가 등록한 경매 목록
    pub async fn get_my_auctions(&self, user: &User) -> Result<AuctionInfoListResponse> {
        info!("{:<12} --> 내 경매 조회: user_id={}", "Query", user.id);
        let auctions = self.auction_repository.find_by_user_id(user.id).await?;
        let total_auction_num = auctions.len();
        let auctions = self.attach_images(auctions).await?;
        Ok(AuctionInfoListResponse {
            auctions,
            total_auction_num,
        })
    }

    /// 내가 입찰한 경매 목록
    pub async fn get_participating_auctions(&self, user: &User) -> Result<AuctionInfoListResponse> {
        info!("{:<12} --> 참여 경매 조회: user_id={}", "Query", user.id);
        let auctions = self
            .auction_repository
            .find_participating_by_user_id(user.id)
            .await?;
        let total_auction_num = auctions.len();
        let auctions = self.attach_images(auctions).await?;
        Ok(AuctionInfoListResponse {
            auctions,
            total_auction_num,
        })
    }

    /// 각 경매에 이미지 URL 목록을 붙인다 (읽기 전용 조회)
    async fn attach_images(&self, mut auctions: Vec<AuctionInfo>) -> Result<Vec<AuctionInfo>> {
        for info in &mut auctions {
            info.images = self
                .auction_repository
                .find_images_by_auction_id(info.auction_id)
                .await?;
        }
        Ok(auctions)
    }
}
// endregion: --- Query Service

// region:    --- Pagination / Histogram
fn filter_value(value: &str) -> Option<&str> {
    if value == "ALL" {
        None
    } else {
        Some(value)
    }
}

/// 상태 필터 해석
/// "ALL"은 필터 해제(Some(None)), 유효 상태는 일치 조건,
/// 그 외 값은 None을 돌려 호출부가 빈 결과로 처리한다
fn status_filter(value: &str) -> Option<Option<AuctionStatus>> {
    match value {
        "ALL" => Some(None),
        value => AuctionStatus::parse(value).map(Some),
    }
}

/// 1-indexed 페이지네이션: [size*(page-1), min(size*page, total))
/// 범위를 벗어난 페이지는 빈 목록이 된다
fn paginate(auctions: Vec<AuctionInfo>, page: usize, size: usize) -> Vec<AuctionInfo> {
    auctions
        .into_iter()
        .skip(size * page.saturating_sub(1))
        .take(size)
        .collect()
}

/// 낙찰가 히스토그램 (20버킷, prices는 오름차순 정렬 전제)
fn build_histogram(total_sold: i64, prices: &[i64]) -> AuctionStatisticsResponse {
    let mut contents = [0i64; 20];
    let min_price = prices[0];
    let mut max_price = prices[prices.len() - 1];

    // 구간이 너무 좁으면 버킷 폭이 0이 되므로 범위를 넓힌다
    if max_price - min_price <= 30 {
        max_price = min_price + 100;
    }
    let interval = (max_price - min_price) / 20;

    for price in prices {
        let idx = ((price - min_price) / interval) as usize;
        // 최대값 경계는 마지막 버킷으로 편입
        if idx >= 20 {
            contents[19] += 1;
        } else {
            contents[idx] += 1;
        }
    }

    AuctionStatisticsResponse {
        total_sold,
        min_price,
        max_price,
        contents,
    }
}
// endregion: --- Pagination / Histogram

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn info(auction_id: i64, price: i64) -> AuctionInfo {
        AuctionInfo {
            auction_id,
            car_id: 1,
            car_type: "SUV".to_string(),
            auction_title: format!("auction-{}", auction_id),
            auction_start_time: Utc::now(),
            auction_end_time: Utc::now(),
            auction_start_price: price,
            auction_end_price: price,
            auction_status: AuctionStatus::Completed,
            images: Vec::new(),
        }
    }

    #[test]
    fn status_filter_distinguishes_all_from_unknown() {
        assert_eq!(status_filter("ALL"), Some(None));
        assert_eq!(
            status_filter("COMPLETED"),
            Some(Some(AuctionStatus::Completed))
        );
        assert_eq!(status_filter("SOLD_OUT"), None);
    }

    #[test]
    fn paginate_middle_page() {
        let auctions: Vec<_> = (0..7).map(|i| info(i, 1000 + i)).collect();
        let page = paginate(auctions, 2, 3);
        let ids: Vec<_> = page.iter().map(|a| a.auction_id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn paginate_last_partial_page() {
        let auctions: Vec<_> = (0..7).map(|i| info(i, 1000 + i)).collect();
        let page = paginate(auctions, 3, 3);
        let ids: Vec<_> = page.iter().map(|a| a.auction_id).collect();
        assert_eq!(ids, vec![6]);
    }

    #[test]
    fn paginate_out_of_range_page_is_empty() {
        let auctions: Vec<_> = (0..7).map(|i| info(i, 1000 + i)).collect();
        assert!(paginate(auctions, 4, 3).is_empty());
        assert!(paginate(Vec::new(), 1, 3).is_empty());
    }

    #[test]
    fn histogram_boundary_price_folds_into_last_bucket() {
        // 1000..=3000, 100 간격 -> 버킷 폭 100, 3000은 idx 20이 되므로 19로 편입
        let prices: Vec<i64> = (0..=20).map(|i| 1000 + i * 100).collect();
        let stats = build_histogram(21, &prices);

        assert_eq!(stats.min_price, 1000);
        assert_eq!(stats.max_price, 3000);
        assert_eq!(stats.contents[19], 2);
        for i in 0..19 {
            assert_eq!(stats.contents[i], 1, "bucket {}", i);
        }
        assert_eq!(stats.contents.iter().sum::<i64>(), 21);
    }

    #[test]
    fn histogram_widens_degenerate_range() {
        // 폭 20(<=30)이면 max를 min+100으로 넓힌다
        let stats = build_histogram(2, &[1000, 1020]);
        assert_eq!(stats.min_price, 1000);
        assert_eq!(stats.max_price, 1100);
        assert_eq!(stats.contents[0], 1);
        assert_eq!(stats.contents[4], 1);
        assert_eq!(stats.contents.iter().sum::<i64>(), 2);
    }
}
// endregion: --- Tests
