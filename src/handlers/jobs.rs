//! Job Catalog HTTP Handlers

use actix_web::{get, HttpResponse};
use crate::{core::errors::AppError, services::jobs::JobService};

/// 직군 카테고리별 직무 카탈로그 조회 핸들러
///
/// 프로젝트 생성/모집 폼의 직무 선택에 사용됩니다. 캐시되어 있습니다.
///
/// # Endpoint
/// `GET /api/v1/jobs/categories`
#[get("/categories")]
pub async fn get_job_catalog() -> Result<HttpResponse, AppError> {
    let service = JobService::instance();
    let catalog = service.catalog().await?;

    Ok(HttpResponse::Ok().json(catalog))
}
