//! 포인트 원장 리포지토리
//!
//! append-only 포인트 레코드를 저장하고 소유자별 잔액을 집계합니다.
//! 잔액은 짧은 TTL로 캐싱하며, 레코드 추가 시 무효화합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::members::GuestPoint,
};

/// 포인트 원장 데이터 액세스 리포지토리
#[repository(name = "point", collection = "guest_points")]
pub struct PointRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PointRepository {
    fn balance_cache_key(owner_id: &ObjectId) -> String {
        format!("points:balance:{}", owner_id.to_hex())
    }

    /// 포인트 레코드 추가
    ///
    /// 적립/사용 공통 경로입니다. 잔액 캐시를 무효화합니다.
    pub async fn insert(&self, mut record: GuestPoint) -> Result<GuestPoint, AppError> {
        let result = self.collection::<GuestPoint>()
            .insert_one(&record)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        record.id = result.inserted_id.as_object_id();

        let _ = self.redis.del(&Self::balance_cache_key(&record.owner_id)).await;

        Ok(record)
    }

    /// 소유자 잔액 조회 (부호 있는 금액 합산)
    ///
    /// # 캐싱 정책
    /// - **캐시 키**: `points:balance:{owner_id}`
    /// - **TTL**: 60초 - 잔액은 자주 바뀌므로 짧게 유지
    pub async fn balance(&self, owner_id: &ObjectId) -> Result<i64, AppError> {
        let cache_key = Self::balance_cache_key(owner_id);

        if let Ok(Some(cached)) = self.redis.get::<i64>(&cache_key).await {
            return Ok(cached);
        }

        let pipeline = vec![
            doc! { "$match": { "owner_id": owner_id } },
            doc! { "$group": { "_id": null, "balance": { "$sum": "$amount" } } },
        ];

        let mut cursor = self.collection::<GuestPoint>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let balance = match cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            Some(doc) => doc
                .get("balance")
                .and_then(|b| b.as_i64().or_else(|| b.as_i32().map(i64::from)))
                .unwrap_or(0),
            None => 0,
        };

        let _ = self.redis.set_with_expiry(&cache_key, &balance, 60).await;

        Ok(balance)
    }

    /// 소유자의 최근 포인트 내역 조회 (최신순)
    pub async fn find_recent(&self, owner_id: &ObjectId, limit: i64) -> Result<Vec<GuestPoint>, AppError> {
        let cursor = self.collection::<GuestPoint>()
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "_id": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
