//! # 상품 서비스 구현
//!
//! 포인트 상품 목록 조회와 주문 승인 후 이행(fulfillment)을 담당합니다.
//!
//! ## 이행 경로
//!
//! 주문 아이템이 SUCCESS로 전이되면 아이템당 GiveProduct(READY)를 만들고,
//! 포인트 원장에 적립 레코드를 남긴 뒤 GiveProduct를 SUCCESS로 전이합니다.
//! 포인트 지급에 실패하면 GiveProduct는 FAIL로 남아 관리자 개입 대상이
//! 됩니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::products::PointProductResponse,
        entities::members::{GuestPoint, PointOwnerType, PointReason},
        entities::orders::{Order, OrderItem},
        entities::products::{GiveProduct, GiveStatus},
    },
    repositories::members::PointRepository,
    repositories::products::{GiveProductRepository, ProductRepository},
};

/// 상품 비즈니스 로직 서비스
#[service(name = "product")]
pub struct ProductService {
    /// 상품 리포지토리 (자동 주입)
    product_repo: Arc<ProductRepository>,

    /// 지급 리포지토리 (자동 주입)
    giveproduct_repo: Arc<GiveProductRepository>,

    /// 포인트 원장 리포지토리 (자동 주입)
    point_repo: Arc<PointRepository>,
}

impl ProductService {
    /// 활성 포인트 상품 목록 조회
    pub async fn list_point_products(&self) -> Result<Vec<PointProductResponse>, AppError> {
        let products = self.product_repo.find_active_point_products().await?;

        Ok(products
            .into_iter()
            .map(|(product, point_product)| PointProductResponse::from_parts(product, point_product))
            .collect())
    }

    /// 주문 아이템 이행 - 구매 혜택(포인트) 지급
    ///
    /// 이미 지급 레코드가 있는 아이템은 건너뜁니다 (승인 콜백 중복 방어).
    pub async fn fulfill_order_item(&self, order: &Order, item: &OrderItem) -> Result<(), AppError> {
        let item_id = item.id
            .ok_or_else(|| AppError::InternalError("주문 아이템 ID가 없습니다".to_string()))?;

        if self.giveproduct_repo.find_by_order_item(&item_id).await?.is_some() {
            log::warn!("이미 이행된 주문 아이템: {}", item_id.to_hex());
            return Ok(());
        }

        let give_product = self.giveproduct_repo
            .create(GiveProduct::new(item_id, item.product_id))
            .await?;

        let give_product_id = give_product.id
            .ok_or_else(|| AppError::InternalError("지급 레코드 ID가 없습니다".to_string()))?;

        // 포인트 상품이면 포인트 적립
        let point_product = self.product_repo.find_point_product(&item.product_id).await?;

        let grant_result = match point_product {
            Some(point_product) => {
                let (owner_id, owner_type) = match (order.member_id, order.guest_id) {
                    (Some(member_id), _) => (member_id, PointOwnerType::Member),
                    (None, Some(guest_id)) => (guest_id, PointOwnerType::Guest),
                    (None, None) => {
                        return Err(AppError::InternalError("주문에 구매자가 없습니다".to_string()));
                    }
                };

                let amount = point_product.total_point_amount() * item.quantity as i64;

                self.point_repo.insert(GuestPoint::earn(
                    owner_id,
                    owner_type,
                    amount,
                    PointReason::OrderFulfillment,
                    Some(item_id),
                )).await.map(|_| amount)
            }
            None => {
                // 포인트 외 상품 유형이 없으므로 여기 도달은 데이터 오류
                Err(AppError::InternalError(format!(
                    "포인트 상품 정의가 없습니다: {}", item.product_id.to_hex()
                )))
            }
        };

        match grant_result {
            Ok(amount) => {
                self.giveproduct_repo
                    .transition_status(&give_product_id, GiveStatus::Ready, GiveStatus::Success, None)
                    .await?;

                log::info!(
                    "이행 완료: 아이템 {} 포인트 {}P 지급",
                    item_id.to_hex(), amount
                );
                Ok(())
            }
            Err(e) => {
                // 지급 실패는 FAIL로 기록하고 에러를 전파한다
                let _ = self.giveproduct_repo
                    .transition_status(
                        &give_product_id,
                        GiveStatus::Ready,
                        GiveStatus::Fail,
                        Some(e.to_string()),
                    )
                    .await;

                log::error!("이행 실패: 아이템 {} - {}", item_id.to_hex(), e);
                Err(e)
            }
        }
    }
}
