//! Order Entity Implementation
//!
//! 주문/주문 아이템과 상태 기계를 정의합니다.
//!
//! 주문 상태는 외부 결제 게이트웨이 콜백에 의해서만 전이되는 선형 상태
//! 기계입니다:
//!
//! ```text
//! READY ──► SUCCESS ──► REFUND
//!   │          └──────► PARTIAL_REFUND ──► REFUND
//!   ├──► FAIL
//!   └──► CANCEL
//! ```
//!
//! 재시도/보상 트랜잭션은 없으며, 허용되지 않는 전이는 ConflictError로
//! 거부됩니다. 모든 전이는 주문과 전체 아이템을 함께 갱신하고 레코드당
//! 로그 한 줄씩을 남깁니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 주문/주문 아이템 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 결제 대기 - 게이트웨이 세션이 열렸거나 열리기 전
    Ready,
    /// 게이트웨이 실패 콜백
    Fail,
    /// 사용자/게이트웨이 취소 콜백
    Cancel,
    /// 결제 승인 완료
    Success,
    /// 전체 환불
    Refund,
    /// 일부 아이템만 환불
    PartialRefund,
}

impl OrderStatus {
    /// 직렬화 표현과 동일한 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ready => "READY",
            OrderStatus::Fail => "FAIL",
            OrderStatus::Cancel => "CANCEL",
            OrderStatus::Success => "SUCCESS",
            OrderStatus::Refund => "REFUND",
            OrderStatus::PartialRefund => "PARTIAL_REFUND",
        }
    }

    /// 이 상태에서 `next`로의 전이가 허용되는지 판정합니다.
    ///
    /// 전이 규칙이 상태 기계의 전부입니다. 종결 상태(FAIL/CANCEL/REFUND)
    /// 에서는 어디로도 갈 수 없습니다.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Ready, OrderStatus::Success)
                | (OrderStatus::Ready, OrderStatus::Fail)
                | (OrderStatus::Ready, OrderStatus::Cancel)
                | (OrderStatus::Success, OrderStatus::Refund)
                | (OrderStatus::Success, OrderStatus::PartialRefund)
                | (OrderStatus::PartialRefund, OrderStatus::Refund)
        )
    }

    /// 더 이상 전이가 불가능한 종결 상태인지 확인합니다.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Fail | OrderStatus::Cancel | OrderStatus::Refund)
    }
}

/// 주문 엔티티
///
/// 회원 또는 게스트가 생성한 구매 트랜잭션의 주 레코드입니다.
/// `order_code`는 게이트웨이에 전달되는 가맹점 주문 번호(UUID)이고,
/// `tid`는 게이트웨이가 ready 단계에서 발급한 거래 ID입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 구매 회원 (게스트 주문의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<ObjectId>,
    /// 구매 게스트 (회원 주문의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<ObjectId>,
    /// 가맹점 주문 번호 (게이트웨이 partner_order_id)
    pub order_code: String,
    /// 정가 합계
    pub total_price: i64,
    /// 할인 적용 후 결제 금액
    pub total_discounted_price: i64,
    pub status: OrderStatus,
    /// 게이트웨이 거래 ID (ready 후 설정)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    /// READY 상태의 새 주문 생성
    pub fn new(
        member_id: Option<ObjectId>,
        guest_id: Option<ObjectId>,
        order_code: String,
        total_price: i64,
        total_discounted_price: i64,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            member_id,
            guest_id,
            order_code,
            total_price,
            total_discounted_price,
            status: OrderStatus::Ready,
            tid: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 주문 소유자가 맞는지 확인 (회원 기준)
    pub fn is_owned_by_member(&self, member_id: &ObjectId) -> bool {
        self.member_id.as_ref() == Some(member_id)
    }
}

/// 주문 아이템 엔티티
///
/// 상품명/단가는 주문 시점 스냅샷으로 보존합니다 - 이후 상품이
/// 변경되어도 주문 내역은 불변이어야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_id: ObjectId,
    pub product_id: ObjectId,
    /// 주문 시점의 상품명 스냅샷
    pub product_name: String,
    pub quantity: i32,
    /// 정가 (수량 반영)
    pub price: i64,
    /// 할인 적용 후 금액 (수량 반영)
    pub discounted_price: i64,
    pub status: OrderStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl OrderItem {
    pub fn new(
        order_id: ObjectId,
        product_id: ObjectId,
        product_name: String,
        quantity: i32,
        price: i64,
        discounted_price: i64,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            order_id,
            product_id,
            product_name,
            quantity,
            price,
            discounted_price,
            status: OrderStatus::Ready,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Success));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Fail));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Cancel));
        assert!(OrderStatus::Success.can_transition_to(OrderStatus::Refund));
        assert!(OrderStatus::Success.can_transition_to(OrderStatus::PartialRefund));
        assert!(OrderStatus::PartialRefund.can_transition_to(OrderStatus::Refund));
    }

    #[test]
    fn test_forbidden_transitions() {
        // 종결 상태에서는 어디로도 갈 수 없다
        assert!(!OrderStatus::Fail.can_transition_to(OrderStatus::Success));
        assert!(!OrderStatus::Cancel.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Refund.can_transition_to(OrderStatus::Success));

        // 결제 승인 전에는 환불 불가
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Refund));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::PartialRefund));

        // 승인된 주문은 실패/취소로 되돌릴 수 없다
        assert!(!OrderStatus::Success.can_transition_to(OrderStatus::Fail));
        assert!(!OrderStatus::Success.can_transition_to(OrderStatus::Cancel));

        // 자기 자신으로의 전이 금지 (중복 콜백 방어)
        assert!(!OrderStatus::Success.can_transition_to(OrderStatus::Success));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Ready));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Fail.is_terminal());
        assert!(OrderStatus::Cancel.is_terminal());
        assert!(OrderStatus::Refund.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
        assert!(!OrderStatus::Success.is_terminal());
        assert!(!OrderStatus::PartialRefund.is_terminal());
    }

    #[test]
    fn test_status_serde_screaming_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PartialRefund).unwrap(),
            "\"PARTIAL_REFUND\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(parsed, OrderStatus::Ready);
    }

    #[test]
    fn test_order_ownership() {
        let member_id = ObjectId::new();
        let order = Order::new(Some(member_id), None, "ORD-1".to_string(), 1000, 900);

        assert!(order.is_owned_by_member(&member_id));
        assert!(!order.is_owned_by_member(&ObjectId::new()));
        assert_eq!(order.status, OrderStatus::Ready);
    }
}
