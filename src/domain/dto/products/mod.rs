//! 상품 DTO 모듈

use serde::{Deserialize, Serialize};
use crate::domain::entities::products::{PointProduct, Product};

/// 포인트 상품 목록 아이템 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct PointProductResponse {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    pub point_amount: i64,
    pub bonus_point_amount: i64,
}

impl PointProductResponse {
    pub fn from_parts(product: Product, point_product: PointProduct) -> Self {
        let discounted_price = product.discounted_price();
        Self {
            product_id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: product.name,
            price: product.price,
            discounted_price,
            point_amount: point_product.point_amount,
            bonus_point_amount: point_product.bonus_point_amount,
        }
    }
}
