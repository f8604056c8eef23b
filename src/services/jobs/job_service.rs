//! 직군/직무 카탈로그 서비스

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    repositories::jobs::JobRepository,
};

/// 직무 카탈로그 응답 항목
#[derive(Debug, Serialize, Deserialize)]
pub struct JobCatalogEntry {
    pub category_id: String,
    pub category_name: String,
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobEntry {
    pub id: String,
    pub name: String,
}

/// 직무 비즈니스 로직 서비스
#[service(name = "job")]
pub struct JobService {
    /// 직무 리포지토리 (자동 주입)
    job_repo: Arc<JobRepository>,
}

impl JobService {
    /// 직군 카테고리별 직무 카탈로그 조회
    pub async fn catalog(&self) -> Result<Vec<JobCatalogEntry>, AppError> {
        let catalog = self.job_repo.find_catalog().await?;

        Ok(catalog
            .into_iter()
            .map(|(category, jobs)| JobCatalogEntry {
                category_id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
                category_name: category.name,
                jobs: jobs
                    .into_iter()
                    .map(|job| JobEntry {
                        id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
                        name: job.name,
                    })
                    .collect(),
            })
            .collect())
    }
}
