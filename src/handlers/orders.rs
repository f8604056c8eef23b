//! Order & Payment HTTP Handlers
//!
//! 주문 생성, 결제 세션 오픈, 게이트웨이 콜백(approve/cancel/fail),
//! 주문 조회 엔드포인트를 처리합니다. 회원과 게스트 모두 주문할 수
//! 있습니다.
//!
//! ## 결제 플로우
//!
//! ```text
//! POST /orders               → READY 주문 생성
//! POST /orders/{id}/ready    → 게이트웨이 세션 오픈, redirect URL 수신
//! (사용자 결제 페이지 진행)
//! GET  /orders/{id}/approve?pg_token=... → SUCCESS + 포인트 지급
//! GET  /orders/{id}/cancel   → CANCEL
//! GET  /orders/{id}/fail     → FAIL
//! ```

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::orders::{ApproveQuery, CreateOrderRequest},
    domain::models::auth::AuthenticatedMember,
    domain::models::pagination::PageQuery,
    services::orders::OrderService,
};

/// 주문 생성 핸들러
///
/// READY 상태의 주문을 만듭니다. 가격은 서버의 상품 정의에서 계산합니다.
///
/// # Endpoint
/// `POST /api/v1/orders`
#[post("")]
pub async fn create_order(
    buyer: AuthenticatedMember,
    payload: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = OrderService::instance();
    let response = service.create(&buyer, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 결제 세션 오픈 핸들러 (게이트웨이 ready)
///
/// # Endpoint
/// `POST /api/v1/orders/{order_id}/ready`
#[post("/{order_id}/ready")]
pub async fn open_payment(
    order_id: web::Path<String>,
    buyer: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let response = service.open_payment(&buyer, &order_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 게이트웨이 승인 콜백 핸들러
///
/// 주문/아이템이 SUCCESS로 전이되고 상품 이행(포인트 지급)이 실행됩니다.
/// 중복 콜백은 409 Conflict입니다.
///
/// # Endpoint
/// `GET /api/v1/orders/{order_id}/approve?pg_token={token}`
#[get("/{order_id}/approve")]
pub async fn approve_order(
    order_id: web::Path<String>,
    query: web::Query<ApproveQuery>,
    buyer: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = OrderService::instance();
    let response = service.approve(&buyer, &order_id, &query.pg_token).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 게이트웨이 취소 콜백 핸들러
///
/// # Endpoint
/// `GET /api/v1/orders/{order_id}/cancel`
#[get("/{order_id}/cancel")]
pub async fn cancel_order(
    order_id: web::Path<String>,
    buyer: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let response = service.cancel(&buyer, &order_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 게이트웨이 실패 콜백 핸들러
///
/// # Endpoint
/// `GET /api/v1/orders/{order_id}/fail`
#[get("/{order_id}/fail")]
pub async fn fail_order(
    order_id: web::Path<String>,
    buyer: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let response = service.fail(&buyer, &order_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 주문 목록 조회 핸들러 (커서 페이지네이션)
///
/// # Endpoint
/// `GET /api/v1/orders?cursor={token}&size={n}`
#[get("")]
pub async fn list_my_orders(
    buyer: AuthenticatedMember,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let page = service.list_own(&buyer, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// 주문 상세 조회 핸들러 (본인 또는 관리자)
///
/// # Endpoint
/// `GET /api/v1/orders/{order_id}`
#[get("/{order_id}")]
pub async fn get_order(
    order_id: web::Path<String>,
    subject: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let response = service.detail(&subject, &order_id).await?;

    Ok(HttpResponse::Ok().json(response))
}
