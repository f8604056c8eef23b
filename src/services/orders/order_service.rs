//! # 주문 서비스 구현
//!
//! 주문 생명주기의 비즈니스 로직입니다. 상품으로부터 주문을 초기화하고,
//! 게이트웨이 콜백에 따라 상태를 전이시키며, 승인 시 상품별 이행
//! (포인트 지급)을 실행합니다.
//!
//! ## 상태 전이 규약
//!
//! 모든 전이는 다음 순서를 지킵니다:
//!
//! 1. `OrderStatus::can_transition_to`로 전이 허용 여부 판정
//! 2. 현재 상태를 필터 조건으로 주문 문서 갱신 (중복 콜백 방어)
//! 3. 전체 아이템 일괄 갱신
//! 4. 주문/아이템 로그 각각 append
//!
//! 트랜잭션/보상 로직은 없습니다 - 요청 단위의 순차 갱신이며, 중간
//! 실패는 에러 응답으로 끝나고 이후 처리는 관리자 수동 개입 영역입니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    core::errors::AppError,
    domain::{
        dto::orders::{CreateOrderRequest, OrderResponse, PaymentReadyResponse, RefundRequest},
        entities::orders::{
            Order, OrderItem, OrderItemDiscount, OrderItemRefund, OrderItemStatusLog,
            OrderStatus, OrderStatusLog,
        },
        models::auth::AuthenticatedMember,
        models::pagination::{normalize_page_size, Cursor, CursorPage, PageQuery},
    },
    repositories::orders::{OrderLogRepository, OrderRepository},
    repositories::products::ProductRepository,
    services::payments::PaymentGatewayService,
    services::products::product_service::ProductService,
    services::tasks::task_service::TaskService,
};

/// 주문 비즈니스 로직 서비스
#[service(name = "order")]
pub struct OrderService {
    /// 주문 리포지토리 (자동 주입)
    order_repo: Arc<OrderRepository>,

    /// 주문 상태 로그 리포지토리 (자동 주입)
    order_log_repo: Arc<OrderLogRepository>,

    /// 상품 리포지토리 (자동 주입)
    product_repo: Arc<ProductRepository>,

    /// 결제 게이트웨이 클라이언트 (자동 주입)
    gateway_service: Arc<PaymentGatewayService>,

    /// 상품 이행 서비스 (자동 주입)
    product_service: Arc<ProductService>,

    /// 백그라운드 태스크 디스패처 - 결제 완료 메일 (자동 주입)
    task_service: Arc<TaskService>,
}

impl OrderService {
    /// 구매자 클레임에서 (member_id, guest_id) 쌍을 만듭니다.
    fn buyer_ids(buyer: &AuthenticatedMember) -> Result<(Option<ObjectId>, Option<ObjectId>), AppError> {
        let id = ObjectId::parse_str(&buyer.member_id)
            .map_err(|_| AppError::InternalError("잘못된 주체 ID 클레임입니다".to_string()))?;

        if buyer.is_guest() {
            Ok((None, Some(id)))
        } else {
            Ok((Some(id), None))
        }
    }

    /// 주문 소유권 확인 (관리자는 통과)
    fn ensure_owner(order: &Order, subject: &AuthenticatedMember) -> Result<(), AppError> {
        if subject.is_admin() {
            return Ok(());
        }

        let id = ObjectId::parse_str(&subject.member_id)
            .map_err(|_| AppError::InternalError("잘못된 주체 ID 클레임입니다".to_string()))?;

        let owned = order.member_id == Some(id) || order.guest_id == Some(id);
        if !owned {
            return Err(AppError::AuthorizationError("본인의 주문이 아닙니다".to_string()));
        }
        Ok(())
    }

    /// 상품 구매 주문 생성 (READY)
    ///
    /// 가격과 할인은 서버의 상품 정의에서 계산하며, 상시 할인이 있으면
    /// 아이템 할인 레코드를 함께 남깁니다.
    pub async fn create(
        &self,
        buyer: &AuthenticatedMember,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        let (member_id, guest_id) = Self::buyer_ids(buyer)?;

        let product = self.product_repo.find_by_id(&request.product_id).await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        let product_id = product.id
            .ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;

        let quantity = request.quantity as i64;
        let total_price = product.price * quantity;
        let total_discounted_price = product.discounted_price() * quantity;

        let order_code = Uuid::new_v4().simple().to_string();
        let order = Order::new(member_id, guest_id, order_code, total_price, total_discounted_price);

        let item = OrderItem::new(
            ObjectId::new(), // create_with_items에서 실제 주문 ID로 대체됨
            product_id,
            product.name.clone(),
            request.quantity,
            total_price,
            total_discounted_price,
        );

        let (order, items) = self.order_repo.create_with_items(order, vec![item]).await?;

        // 상시 할인 레코드
        if product.discount_amount > 0 {
            for item in &items {
                if let Some(item_id) = item.id {
                    self.order_repo.insert_discount(OrderItemDiscount::new(
                        item_id,
                        "PRODUCT_PROMOTION".to_string(),
                        product.discount_amount * quantity,
                    )).await?;
                }
            }
        }

        log::info!(
            "주문 생성: {} (구매자 {}, 금액 {})",
            order.order_code, buyer.member_id, order.total_discounted_price
        );

        Ok(OrderResponse::from_parts(order, items))
    }

    /// 결제 세션 오픈 (게이트웨이 ready)
    ///
    /// READY 상태의 주문만 가능합니다. 수신한 tid를 주문에 저장합니다.
    pub async fn open_payment(
        &self,
        buyer: &AuthenticatedMember,
        order_id: &str,
    ) -> Result<PaymentReadyResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&order, buyer)?;

        if order.status != OrderStatus::Ready {
            return Err(AppError::ConflictError("결제 대기 상태의 주문이 아닙니다".to_string()));
        }

        let items = self.order_repo.find_items(
            &order.id.ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?
        ).await?;

        let item_name = items.first()
            .map(|i| {
                if items.len() > 1 {
                    format!("{} 외 {}건", i.product_name, items.len() - 1)
                } else {
                    i.product_name.clone()
                }
            })
            .unwrap_or_else(|| "주문 상품".to_string());

        let ready = self.gateway_service
            .ready(&order.order_code, &buyer.member_id, &item_name, order.total_discounted_price)
            .await?;

        let order_oid = order.id
            .ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?;
        self.order_repo.set_tid(&order_oid, &ready.tid).await?;

        Ok(PaymentReadyResponse {
            order_id: order_id.to_string(),
            tid: ready.tid,
            next_redirect_pc_url: ready.next_redirect_pc_url,
            next_redirect_mobile_url: ready.next_redirect_mobile_url,
        })
    }

    /// 게이트웨이 승인 콜백 처리
    ///
    /// # 처리 과정
    ///
    /// 1. 게이트웨이 approve 호출 (pg_token)
    /// 2. 주문/아이템 READY → SUCCESS 전이 + 로그
    /// 3. 아이템별 이행 (포인트 지급)
    /// 4. 결제 완료 메일 태스크 디스패치
    pub async fn approve(
        &self,
        buyer: &AuthenticatedMember,
        order_id: &str,
        pg_token: &str,
    ) -> Result<OrderResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&order, buyer)?;

        let tid = order.tid.clone()
            .ok_or_else(|| AppError::ConflictError("결제 세션이 오픈되지 않은 주문입니다".to_string()))?;

        // 게이트웨이 승인 확정이 먼저다 - 실패하면 주문은 READY로 남는다
        let approve = self.gateway_service
            .approve(&tid, &order.order_code, &buyer.member_id, pg_token)
            .await?;

        if approve.amount.total != order.total_discounted_price {
            log::error!(
                "승인 금액 불일치: 주문 {} 기대 {} 실제 {}",
                order.order_code, order.total_discounted_price, approve.amount.total
            );
            return Err(AppError::ExternalServiceError("승인 금액이 주문 금액과 일치하지 않습니다".to_string()));
        }

        let (order, items) = self
            .transition(&order, OrderStatus::Success, Some("게이트웨이 승인".to_string()))
            .await?;

        // 상품별 이행 - 포인트 지급
        for item in &items {
            self.product_service.fulfill_order_item(&order, item).await?;
        }

        // 결제 완료 안내 메일
        if let Err(e) = self.task_service.dispatch_order_completed_email(&order).await {
            log::warn!("결제 완료 메일 태스크 디스패치 실패: {}", e);
        }

        Ok(OrderResponse::from_parts(order, items))
    }

    /// 게이트웨이 취소 콜백 처리 (READY → CANCEL)
    pub async fn cancel(&self, buyer: &AuthenticatedMember, order_id: &str) -> Result<OrderResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&order, buyer)?;

        let (order, items) = self
            .transition(&order, OrderStatus::Cancel, Some("사용자 취소".to_string()))
            .await?;

        Ok(OrderResponse::from_parts(order, items))
    }

    /// 게이트웨이 실패 콜백 처리 (READY → FAIL)
    pub async fn fail(&self, buyer: &AuthenticatedMember, order_id: &str) -> Result<OrderResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&order, buyer)?;

        let (order, items) = self
            .transition(&order, OrderStatus::Fail, Some("게이트웨이 실패".to_string()))
            .await?;

        Ok(OrderResponse::from_parts(order, items))
    }

    /// 주문 상세 조회 (본인 또는 관리자)
    pub async fn detail(&self, subject: &AuthenticatedMember, order_id: &str) -> Result<OrderResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Self::ensure_owner(&order, subject)?;

        let items = self.order_repo.find_items(
            &order.id.ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?
        ).await?;

        Ok(OrderResponse::from_parts(order, items))
    }

    /// 본인 주문 커서 페이지 조회 (회원/게스트)
    pub async fn list_own(
        &self,
        buyer: &AuthenticatedMember,
        query: PageQuery,
    ) -> Result<CursorPage<OrderResponse>, AppError> {
        let buyer_id = ObjectId::parse_str(&buyer.member_id)
            .map_err(|_| AppError::InternalError("잘못된 주체 ID 클레임입니다".to_string()))?;

        let size = normalize_page_size(query.size);
        let cursor = match query.cursor.as_deref() {
            Some(token) => Some(Cursor::decode(token)?),
            None => None,
        };

        let orders = self.order_repo
            .find_page_by_buyer(&buyer_id, cursor.as_ref(), size)
            .await?;

        self.build_order_page(orders, size).await
    }

    /// 전체 주문 커서 페이지 조회 (관리자 전용)
    pub async fn list_all(&self, query: PageQuery) -> Result<CursorPage<OrderResponse>, AppError> {
        let size = normalize_page_size(query.size);
        let cursor = match query.cursor.as_deref() {
            Some(token) => Some(Cursor::decode(token)?),
            None => None,
        };

        let orders = self.order_repo.find_page_all(cursor.as_ref(), size).await?;

        self.build_order_page(orders, size).await
    }

    async fn build_order_page(
        &self,
        orders: Vec<Order>,
        size: i64,
    ) -> Result<CursorPage<OrderResponse>, AppError> {
        let page = CursorPage::from_overfetched(orders, size, |o: &Order| o.id);

        let mut items = Vec::with_capacity(page.items.len());
        for order in page.items {
            let order_items = self.order_repo.find_items(
                &order.id.ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?
            ).await?;
            items.push(OrderResponse::from_parts(order, order_items));
        }

        Ok(CursorPage {
            items,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        })
    }

    /// 관리자 환불 처리
    ///
    /// 요청된 아이템(비어 있으면 전체)을 환불하고, 미환불 아이템이
    /// 남으면 PARTIAL_REFUND, 모두 환불되면 REFUND로 전이합니다.
    pub async fn refund(
        &self,
        admin: &AuthenticatedMember,
        order_id: &str,
        request: RefundRequest,
    ) -> Result<OrderResponse, AppError> {
        let order = self.order_repo.find_by_id(order_id).await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        if !matches!(order.status, OrderStatus::Success | OrderStatus::PartialRefund) {
            return Err(AppError::ConflictError("환불 가능한 상태의 주문이 아닙니다".to_string()));
        }

        let order_oid = order.id
            .ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?;
        let items = self.order_repo.find_items(&order_oid).await?;

        // 환불 대상 결정 - 빈 목록이면 아직 SUCCESS인 아이템 전체
        let target_ids: Vec<ObjectId> = if request.order_item_ids.is_empty() {
            items.iter()
                .filter(|i| i.status == OrderStatus::Success)
                .filter_map(|i| i.id)
                .collect()
        } else {
            let mut ids = Vec::with_capacity(request.order_item_ids.len());
            for raw in &request.order_item_ids {
                ids.push(ObjectId::parse_str(raw)
                    .map_err(|_| AppError::ValidationError("유효하지 않은 아이템 ID입니다".to_string()))?);
            }
            ids
        };

        if target_ids.is_empty() {
            return Err(AppError::ValidationError("환불할 아이템이 없습니다".to_string()));
        }

        // 아이템별 환불 처리 + 레코드/로그
        for item_id in &target_ids {
            let refunded = self.order_repo
                .transition_item_status(item_id, OrderStatus::Success, OrderStatus::Refund)
                .await?
                .ok_or_else(|| AppError::ConflictError(
                    "환불 가능한 상태의 아이템이 아닙니다".to_string()
                ))?;

            self.order_repo.insert_refund(OrderItemRefund::new(
                *item_id,
                refunded.discounted_price,
                request.reason.clone(),
            )).await?;

            self.order_log_repo.append_item(OrderItemStatusLog::new(
                *item_id,
                OrderStatus::Success,
                OrderStatus::Refund,
            )).await?;
        }

        // 전체/부분 환불 판정
        let items_after = self.order_repo.find_items(&order_oid).await?;
        let all_refunded = items_after.iter().all(|i| i.status == OrderStatus::Refund);
        let next_status = if all_refunded {
            OrderStatus::Refund
        } else {
            OrderStatus::PartialRefund
        };

        // 이미 PARTIAL_REFUND인 주문의 추가 부분 환불은 상태가 그대로다
        let updated = if next_status == order.status {
            order.clone()
        } else {
            if !order.status.can_transition_to(next_status) {
                return Err(AppError::ConflictError(format!(
                    "{}에서 {}로 전이할 수 없습니다",
                    order.status.as_str(), next_status.as_str()
                )));
            }

            let updated = self.order_repo
                .transition_status(&order_oid, order.status, next_status)
                .await?
                .ok_or_else(|| AppError::ConflictError("주문 상태가 이미 변경되었습니다".to_string()))?;

            self.order_log_repo.append(OrderStatusLog::new(
                order_oid,
                order.status,
                next_status,
                request.reason.clone(),
            )).await?;

            updated
        };

        log::info!(
            "환불 처리: 주문 {} -> {} (관리자 {}, {}건)",
            updated.order_code, next_status.as_str(), admin.member_id, target_ids.len()
        );

        Ok(OrderResponse::from_parts(updated, items_after))
    }

    /// 공통 전이 경로: 주문 + 전체 아이템 + 로그
    ///
    /// 전이 테이블 검증 후, 현재 상태를 필터로 거는 갱신을 수행합니다.
    /// 같은 콜백이 두 번 와도 두 번째는 ConflictError입니다.
    async fn transition(
        &self,
        order: &Order,
        to: OrderStatus,
        note: Option<String>,
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        let from = order.status;

        if !from.can_transition_to(to) {
            return Err(AppError::ConflictError(format!(
                "{}에서 {}로 전이할 수 없습니다",
                from.as_str(), to.as_str()
            )));
        }

        let order_oid = order.id
            .ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?;

        let updated = self.order_repo
            .transition_status(&order_oid, from, to)
            .await?
            .ok_or_else(|| AppError::ConflictError("주문 상태가 이미 변경되었습니다".to_string()))?;

        // 전체 아이템 일괄 전이 + 아이템 로그
        let items_before = self.order_repo.find_items(&order_oid).await?;
        self.order_repo.transition_item_statuses(&order_oid, from, to).await?;

        for item in &items_before {
            if item.status == from {
                if let Some(item_id) = item.id {
                    self.order_log_repo
                        .append_item(OrderItemStatusLog::new(item_id, from, to))
                        .await?;
                }
            }
        }

        // 주문 로그
        self.order_log_repo
            .append(OrderStatusLog::new(order_oid, from, to, note))
            .await?;

        let items = self.order_repo.find_items(&order_oid).await?;

        log::info!("주문 상태 전이: {} {} -> {}", updated.order_code, from.as_str(), to.as_str());

        Ok((updated, items))
    }
}
