//! Product HTTP Handlers

use actix_web::{get, HttpResponse};
use crate::{core::errors::AppError, services::products::ProductService};

/// 포인트 상품 목록 조회 핸들러
///
/// 구매 가능한 포인트 충전 상품을 가격 오름차순으로 반환합니다.
///
/// # Endpoint
/// `GET /api/v1/products/points`
#[get("/points")]
pub async fn list_point_products() -> Result<HttpResponse, AppError> {
    let service = ProductService::instance();
    let products = service.list_point_products().await?;

    Ok(HttpResponse::Ok().json(products))
}
