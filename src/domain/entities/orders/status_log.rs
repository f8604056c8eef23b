//! Order Status Log Entities
//!
//! 주문 애그리거트의 감사 추적 레코드들입니다. 모든 컬렉션이
//! append-only이며 갱신/삭제되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use super::order::OrderStatus;

/// 주문 상태 전이 로그
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_id: ObjectId,
    pub from_status: OrderStatus,
    pub to_status: OrderStatus,
    /// 전이 사유 (게이트웨이 메시지, 관리자 메모 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime,
}

impl OrderStatusLog {
    pub fn new(order_id: ObjectId, from_status: OrderStatus, to_status: OrderStatus, note: Option<String>) -> Self {
        Self {
            id: None,
            order_id,
            from_status,
            to_status,
            note,
            created_at: DateTime::now(),
        }
    }
}

/// 주문 아이템 상태 전이 로그
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemStatusLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_item_id: ObjectId,
    pub from_status: OrderStatus,
    pub to_status: OrderStatus,
    pub created_at: DateTime,
}

impl OrderItemStatusLog {
    pub fn new(order_item_id: ObjectId, from_status: OrderStatus, to_status: OrderStatus) -> Self {
        Self {
            id: None,
            order_item_id,
            from_status,
            to_status,
            created_at: DateTime::now(),
        }
    }
}

/// 주문 아이템 환불 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRefund {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_item_id: ObjectId,
    /// 환불 금액
    pub refunded_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime,
}

impl OrderItemRefund {
    pub fn new(order_item_id: ObjectId, refunded_price: i64, reason: Option<String>) -> Self {
        Self {
            id: None,
            order_item_id,
            refunded_price,
            reason,
            created_at: DateTime::now(),
        }
    }
}

/// 주문 아이템에 적용된 할인 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDiscount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_item_id: ObjectId,
    /// 할인 유형 식별자 (상품 프로모션, 쿠폰 등)
    pub discount_type: String,
    /// 할인 금액
    pub amount: i64,
    pub created_at: DateTime,
}

impl OrderItemDiscount {
    pub fn new(order_item_id: ObjectId, discount_type: String, amount: i64) -> Self {
        Self {
            id: None,
            order_item_id,
            discount_type,
            amount,
            created_at: DateTime::now(),
        }
    }
}
