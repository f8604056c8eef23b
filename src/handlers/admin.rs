//! Admin HTTP Handlers
//!
//! 관리자 전용 엔드포인트입니다. 라우트 스코프에
//! `AuthMiddleware::required_with_role("admin")`이 적용되어 있으며,
//! 환불은 추가로 핸들러에서도 역할을 확인합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::orders::RefundRequest,
    domain::dto::promotions::CreatePromotionRequest,
    domain::models::auth::AuthenticatedMember,
    domain::models::pagination::PageQuery,
    services::{orders::OrderService, promotions::PromotionService},
};

/// 전체 주문 목록 조회 핸들러 (커서 페이지네이션)
///
/// # Endpoint
/// `GET /api/v1/admin/orders?cursor={token}&size={n}`
#[get("/orders")]
pub async fn list_all_orders(
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let page = service.list_all(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// 주문 환불 처리 핸들러
///
/// 전체 환불은 REFUND, 일부 아이템 환불은 PARTIAL_REFUND로 전이됩니다.
/// 환불은 수동 관리자 개입 플로우입니다.
///
/// # Endpoint
/// `POST /api/v1/admin/orders/{order_id}/refund`
#[post("/orders/{order_id}/refund")]
pub async fn refund_order(
    order_id: web::Path<String>,
    admin: AuthenticatedMember,
    payload: web::Json<RefundRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if !admin.is_admin() {
        return Err(AppError::AuthorizationError("관리자 권한이 필요합니다".to_string()));
    }

    let service = OrderService::instance();
    let response = service.refund(&admin, &order_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 배너 생성 핸들러
///
/// # Endpoint
/// `POST /api/v1/admin/promotions`
#[post("/promotions")]
pub async fn create_promotion(
    payload: web::Json<CreatePromotionRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = PromotionService::instance();
    let response = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}
