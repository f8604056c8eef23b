//! 상품/지급 엔티티 모듈
//!
//! 판매 상품(`Product`/`PointProduct`)과 결제 성공 후 혜택 지급 단위
//! (`GiveProduct`)를 정의합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 상품 유형
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// 포인트 충전 상품
    Point,
}

/// 판매 상품 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 판매 가격 (원)
    pub price: i64,
    /// 상시 할인 금액 (0이면 할인 없음)
    pub discount_amount: i64,
    pub product_type: ProductType,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 할인 적용 후 판매 가격
    pub fn discounted_price(&self) -> i64 {
        (self.price - self.discount_amount).max(0)
    }
}

/// 포인트 상품 상세
///
/// `Product`와 1:1로 연결되며 지급할 포인트 양을 정의합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointProduct {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: ObjectId,
    /// 기본 지급 포인트
    pub point_amount: i64,
    /// 프로모션 보너스 포인트
    pub bonus_point_amount: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl PointProduct {
    /// 지급 총 포인트 (기본 + 보너스)
    pub fn total_point_amount(&self) -> i64 {
        self.point_amount + self.bonus_point_amount
    }
}

/// 지급 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiveStatus {
    Ready,
    Success,
    Fail,
}

impl GiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiveStatus::Ready => "READY",
            GiveStatus::Success => "SUCCESS",
            GiveStatus::Fail => "FAIL",
        }
    }
}

/// 혜택 지급 단위 레코드
///
/// 주문 아이템 하나의 이행(fulfillment)을 표현합니다. 결제 승인 시
/// READY로 생성되고, 포인트 지급이 끝나면 SUCCESS로 전이됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveProduct {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_item_id: ObjectId,
    pub product_id: ObjectId,
    pub status: GiveStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl GiveProduct {
    pub fn new(order_item_id: ObjectId, product_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            order_item_id,
            product_id,
            status: GiveStatus::Ready,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

/// 지급 상태 전이 로그 (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveProductLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub give_product_id: ObjectId,
    pub from_status: GiveStatus,
    pub to_status: GiveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime,
}

impl GiveProductLog {
    pub fn new(give_product_id: ObjectId, from_status: GiveStatus, to_status: GiveStatus, note: Option<String>) -> Self {
        Self {
            id: None,
            give_product_id,
            from_status,
            to_status,
            note,
            created_at: DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_price_never_negative() {
        let mut product = Product {
            id: None,
            name: "포인트 1000".to_string(),
            price: 1000,
            discount_amount: 100,
            product_type: ProductType::Point,
            is_active: true,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        };
        assert_eq!(product.discounted_price(), 900);

        product.discount_amount = 2000;
        assert_eq!(product.discounted_price(), 0);
    }

    #[test]
    fn test_point_product_total() {
        let pp = PointProduct {
            id: None,
            product_id: ObjectId::new(),
            point_amount: 1000,
            bonus_point_amount: 50,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        };
        assert_eq!(pp.total_point_amount(), 1050);
    }
}
