//! 주문/결제 응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::entities::orders::{Order, OrderItem, OrderStatus};

/// 주문 아이템 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
    pub discounted_price: i64,
    pub status: OrderStatus,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: item.product_id.to_hex(),
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            discounted_price: item.discounted_price,
            status: item.status,
        }
    }
}

/// 주문 응답 (아이템 포함)
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_code: String,
    pub total_price: i64,
    pub total_discounted_price: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            order_code: order.order_code,
            total_price: order.total_price,
            total_discounted_price: order.total_discounted_price,
            status: order.status,
            items: items.into_iter().map(Into::into).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// 결제 세션 오픈(ready) 응답
///
/// 클라이언트는 환경에 맞는 redirect URL로 사용자를 이동시킵니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentReadyResponse {
    pub order_id: String,
    /// 게이트웨이 거래 ID
    pub tid: String,
    /// PC 웹 결제 페이지 URL
    pub next_redirect_pc_url: String,
    /// 모바일 웹 결제 페이지 URL
    pub next_redirect_mobile_url: String,
}
