//! Promotion Banner HTTP Handlers

use actix_web::{get, HttpResponse};
use crate::{core::errors::AppError, services::promotions::PromotionService};

/// 노출 중 배너 목록 조회 핸들러
///
/// 노출 기간 내의 활성 배너를 정렬 순서대로 반환합니다. 캐시되어 있습니다.
///
/// # Endpoint
/// `GET /api/v1/promotions/banners`
#[get("/banners")]
pub async fn list_banners() -> Result<HttpResponse, AppError> {
    let service = PromotionService::instance();
    let banners = service.list_visible().await?;

    Ok(HttpResponse::Ok().json(banners))
}
