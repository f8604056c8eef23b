//! 프로모션 배너 리포지토리
//!
//! 노출 중 배너 목록은 메인 화면마다 조회되므로 짧은 TTL로 캐싱합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::promotions::Promotion,
};

const VISIBLE_CACHE_KEY: &str = "promotions:visible";

/// 프로모션 데이터 액세스 리포지토리
#[repository(name = "promotion", collection = "promotions")]
pub struct PromotionRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PromotionRepository {
    /// 현재 노출 중인 배너 목록 조회 (노출 순서 오름차순)
    ///
    /// # 캐싱 정책
    /// - **캐시 키**: `promotions:visible`
    /// - **TTL**: 60초 - 기간 경계에서 최대 1분 지연 허용
    pub async fn find_visible(&self) -> Result<Vec<Promotion>, AppError> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<Promotion>>(VISIBLE_CACHE_KEY).await {
            return Ok(cached);
        }

        let now = DateTime::now();

        let banners: Vec<Promotion> = self.collection::<Promotion>()
            .find(doc! {
                "is_active": true,
                "starts_at": { "$lte": now },
                "ends_at": { "$gt": now },
            })
            .sort(doc! { "display_order": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.redis.set_with_expiry(VISIBLE_CACHE_KEY, &banners, 60).await;

        Ok(banners)
    }

    /// 배너 생성 (관리자)
    ///
    /// 생성 즉시 노출 캐시를 무효화합니다.
    pub async fn create(&self, mut promotion: Promotion) -> Result<Promotion, AppError> {
        let result = self.collection::<Promotion>()
            .insert_one(&promotion)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        promotion.id = result.inserted_id.as_object_id();

        let _ = self.redis.del(VISIBLE_CACHE_KEY).await;

        Ok(promotion)
    }
}
