//! 직군/직무 리포지토리
//!
//! 직무 분류는 사실상 정적 데이터이므로 전체 카탈로그를 통째로 캐싱합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::jobs::{Job, JobCategory},
};

const CATALOG_CACHE_KEY: &str = "jobs:catalog";

/// 직무 데이터 액세스 리포지토리
///
/// 주 컬렉션은 `jobs`이며 `job_categories`를 보조 컬렉션으로 사용합니다.
#[repository(name = "job", collection = "jobs")]
pub struct JobRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl JobRepository {
    fn categories_collection(&self) -> mongodb::Collection<JobCategory> {
        self.db.get_database().collection("job_categories")
    }

    /// 활성 직군 카테고리와 소속 직무를 함께 조회합니다.
    ///
    /// # 캐싱 정책
    /// - **캐시 키**: `jobs:catalog`
    /// - **TTL**: 600초 - 분류 체계는 드물게 변경됨
    pub async fn find_catalog(&self) -> Result<Vec<(JobCategory, Vec<Job>)>, AppError> {
        if let Ok(Some(cached)) = self.redis
            .get::<Vec<(JobCategory, Vec<Job>)>>(CATALOG_CACHE_KEY)
            .await
        {
            return Ok(cached);
        }

        let categories: Vec<JobCategory> = self.categories_collection()
            .find(doc! { "is_active": true })
            .sort(doc! { "display_order": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let jobs: Vec<Job> = self.collection::<Job>()
            .find(doc! { "is_active": true })
            .sort(doc! { "display_order": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let catalog: Vec<(JobCategory, Vec<Job>)> = categories
            .into_iter()
            .map(|category| {
                let category_id = category.id;
                let category_jobs = jobs
                    .iter()
                    .filter(|job| Some(job.category_id) == category_id)
                    .cloned()
                    .collect();
                (category, category_jobs)
            })
            .collect();

        let _ = self.redis.set_with_expiry(CATALOG_CACHE_KEY, &catalog, 600).await;

        Ok(catalog)
    }

    /// ID로 직무 조회 (모집 직무 검증용)
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Job>, AppError> {
        self.collection::<Job>()
            .find_one(doc! { "_id": id, "is_active": true })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
