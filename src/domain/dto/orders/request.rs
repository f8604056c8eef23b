//! 주문/결제 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 주문 생성 요청 DTO
///
/// 상품 하나를 수량과 함께 주문합니다. 가격/할인은 서버가 상품
/// 정의에서 계산하며 클라이언트가 보낸 금액은 신뢰하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    /// 구매할 상품 (ObjectId hex)
    #[validate(length(min = 1, message = "상품을 선택해주세요"))]
    pub product_id: String,

    #[validate(range(min = 1, max = 10, message = "수량은 1-10 사이여야 합니다"))]
    pub quantity: i32,
}

/// 게이트웨이 승인 콜백 쿼리
///
/// 결제 완료 후 게이트웨이가 approval_url로 리다이렉트하며 전달하는
/// 일회성 토큰입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApproveQuery {
    #[validate(length(min = 1, message = "pg_token이 필요합니다"))]
    pub pg_token: String,
}

/// 관리자 환불 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefundRequest {
    /// 환불할 주문 아이템 ID 목록 - 비어 있으면 전체 환불
    #[serde(default)]
    pub order_item_ids: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "환불 사유는 500자 이하여야 합니다"))]
    pub reason: Option<String>,
}
