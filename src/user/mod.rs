/// 사용자 조회
/// 알림 수신자 식별에만 쓰인다. 인증/세션은 바깥 계층의 몫.
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AuctionError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// endregion: --- Imports

// region:    --- User Model
/// 사용자 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
}
// endregion: --- User Model

// region:    --- User Repository
/// 사용자 저장소 트레이트. 없는 사용자는 에러로 취급한다
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, user_id: i64) -> Result<User>;
}

/// Postgres 기반 사용자 저장소 구현체
pub struct PostgresUserRepository {
    db: Arc<DatabaseManager>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user_by_id(&self, user_id: i64) -> Result<User> {
        let user = self
            .db
            .transaction(|tx| {
                Box::pin(async move {
                    Ok::<_, AuctionError>(
                        sqlx::query_as::<_, User>(
                            "SELECT id, user_name, email FROM users WHERE id = $1",
                        )
                        .bind(user_id)
                        .fetch_optional(&mut **tx)
                        .await?,
                    )
                })
            })
            .await?;

        user.ok_or(AuctionError::UserNotFound { user_id })
    }
}
// endregion: --- User Repository
