/// 경매 단건 저장 (오픈/종료 전이 반영)
pub const UPDATE_AUCTION: &str =
    "UPDATE auctions SET auction_end_price = $1, auction_status = $2 WHERE id = $3";

/// 경매 등록
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (car_id, user_id, auction_title, auction_start_time, auction_end_time, auction_start_price, auction_end_price, auction_status)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING id, car_id, user_id, auction_title, auction_start_time, auction_end_time, auction_start_price, auction_end_price, auction_status
"#;

/// 이미지 레코드 저장
pub const INSERT_IMAGE: &str = "INSERT INTO images (auction_id, image_url) VALUES ($1, $2)";

/// 종료 시 입찰자 내구 반영 (재실행 허용)
pub const UPSERT_BID: &str = r#"
    INSERT INTO bids (auction_id, user_id, bid_price)
    VALUES ($1, $2, $3)
    ON CONFLICT (auction_id, user_id) DO UPDATE SET bid_price = EXCLUDED.bid_price
"#;

/// 오픈 대상 조회 (BEFORE + 시작 시간 경과)
pub const FIND_BY_STATUS_AND_START_BEFORE: &str = r#"
    SELECT id, car_id, user_id, auction_title, auction_start_time, auction_end_time, auction_start_price, auction_end_price, auction_status
    FROM auctions
    WHERE auction_status = $1 AND auction_start_time <= $2
"#;

/// 종료 대상 조회 (PROGRESS + 종료 시간 경과)
pub const FIND_BY_STATUS_AND_END_BEFORE: &str = r#"
    SELECT id, car_id, user_id, auction_title, auction_start_time, auction_end_time, auction_start_price, auction_end_price, auction_status
    FROM auctions
    WHERE auction_status = $1 AND auction_end_time <= $2
"#;

/// 가격 필터 조회 (carType/status 둘 다 ALL)
pub const FIND_BY_FILTERS: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_end_price BETWEEN $1 AND $2
    ORDER BY a.auction_end_price ASC
"#;

/// 가격 필터 조회 (status 지정)
pub const FIND_BY_FILTERS_WITH_STATUS: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_end_price BETWEEN $1 AND $2 AND a.auction_status = $3
    ORDER BY a.auction_end_price ASC
"#;

/// 가격 필터 조회 (carType 지정)
pub const FIND_BY_FILTERS_WITH_CAR_TYPE: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_end_price BETWEEN $1 AND $2 AND c.car_type = $3
    ORDER BY a.auction_end_price ASC
"#;

/// 가격 필터 조회 (status + carType 지정)
pub const FIND_BY_FILTERS_WITH_STATUS_AND_CAR_TYPE: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_end_price BETWEEN $1 AND $2 AND a.auction_status = $3 AND c.car_type = $4
    ORDER BY a.auction_end_price ASC
"#;

/// 통계용 낙찰가 조회 (둘 다 ALL, 완료 경매 전체)
pub const FIND_PRICES_FOR_STATISTICS: &str = r#"
    SELECT a.auction_end_price
    FROM auctions a
    WHERE a.auction_status = 'COMPLETED'
    ORDER BY a.auction_end_price ASC
"#;

/// 통계용 낙찰가 조회 (status 지정)
pub const FIND_PRICES_BY_STATUS: &str = r#"
    SELECT a.auction_end_price
    FROM auctions a
    WHERE a.auction_status = $1
    ORDER BY a.auction_end_price ASC
"#;

/// 통계용 낙찰가 조회 (carType 지정, 완료 경매)
pub const FIND_PRICES_BY_CAR_TYPE: &str = r#"
    SELECT a.auction_end_price
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_status = 'COMPLETED' AND c.car_type = $1
    ORDER BY a.auction_end_price ASC
"#;

/// 통계용 낙찰가 조회 (status + carType 지정)
pub const FIND_PRICES_BY_STATUS_AND_CAR_TYPE: &str = r#"
    SELECT a.auction_end_price
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.auction_status = $1 AND c.car_type = $2
    ORDER BY a.auction_end_price ASC
"#;

/// 상태별 경매 수 조회
pub const COUNT_BY_STATUS: &str = "SELECT COUNT(*) FROM auctions WHERE auction_status = $1";

/// 경매 이미지 URL 조회
pub const FIND_IMAGES_BY_AUCTION_ID: &str =
    "SELECT image_url FROM images WHERE auction_id = $1 ORDER BY id";

/// 내가 등록한 경매 조회
pub const FIND_BY_USER_ID: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a JOIN cars c ON a.car_id = c.id
    WHERE a.user_id = $1
    ORDER BY a.auction_start_time DESC
"#;

/// 내가 입찰한 경매 조회
pub const FIND_PARTICIPATING_BY_USER_ID: &str = r#"
    SELECT a.id AS auction_id, a.car_id, c.car_type, a.auction_title, a.auction_start_time, a.auction_end_time, a.auction_start_price, a.auction_end_price, a.auction_status
    FROM auctions a
    JOIN cars c ON a.car_id = c.id
    JOIN bids b ON b.auction_id = a.id
    WHERE b.user_id = $1
    ORDER BY a.auction_start_time DESC
"#;
