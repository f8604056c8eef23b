//! Guest Entity Implementation
//!
//! 회원 가입 전의 익명 세션 신원과 포인트 적립/사용 원장을 정의합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 게스트 엔티티
///
/// 익명 또는 가입 전 세션 신원입니다. 세션 토큰은 평문이 아닌
/// SHA-256 해시로만 저장되며, 이후 회원 가입 시 `member_id`로 연결됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 세션 토큰의 SHA-256 해시 (hex)
    pub token_hash: String,
    /// 연결된 회원 (가입 후 연동)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<ObjectId>,
    /// 세션 활성화 여부
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Guest {
    /// 새 게스트 세션 생성
    pub fn new(token_hash: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            token_hash,
            member_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 이미 회원과 연결된 게스트인지 확인
    pub fn is_linked(&self) -> bool {
        self.member_id.is_some()
    }
}

/// 포인트 소유자 유형
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointOwnerType {
    Guest,
    Member,
}

/// 포인트 적립/사용 사유
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointReason {
    /// 주문 결제 성공에 따른 상품 지급
    OrderFulfillment,
    /// 투표 참여 리워드
    VoteReward,
    /// 포인트 사용
    Spend,
    /// 관리자 수동 조정
    AdminAdjust,
}

/// 포인트 원장 레코드
///
/// 적립은 양수, 사용은 음수 금액의 append-only 레코드입니다.
/// 잔액은 소유자별 합산으로 계산하며 별도 잔액 컬럼을 두지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestPoint {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유자 ID (게스트 또는 회원)
    pub owner_id: ObjectId,
    /// 소유자 유형
    pub owner_type: PointOwnerType,
    /// 부호 있는 포인트 금액 (적립 +, 사용 -)
    pub amount: i64,
    /// 적립/사용 사유
    pub reason: PointReason,
    /// 지급 근거가 된 주문 아이템 (해당 시)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_item_id: Option<ObjectId>,
    pub created_at: DateTime,
}

impl GuestPoint {
    /// 적립 레코드 생성
    pub fn earn(
        owner_id: ObjectId,
        owner_type: PointOwnerType,
        amount: i64,
        reason: PointReason,
        order_item_id: Option<ObjectId>,
    ) -> Self {
        Self {
            id: None,
            owner_id,
            owner_type,
            amount,
            reason,
            order_item_id,
            created_at: DateTime::now(),
        }
    }

    /// 사용 레코드 생성 (금액은 음수로 저장)
    pub fn spend(owner_id: ObjectId, owner_type: PointOwnerType, amount: i64) -> Self {
        Self {
            id: None,
            owner_id,
            owner_type,
            amount: -amount.abs(),
            reason: PointReason::Spend,
            order_item_id: None,
            created_at: DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_linking() {
        let mut guest = Guest::new("abcdef".to_string());
        assert!(!guest.is_linked());

        guest.member_id = Some(ObjectId::new());
        assert!(guest.is_linked());
    }

    #[test]
    fn test_point_spend_is_negative() {
        let owner = ObjectId::new();
        let record = GuestPoint::spend(owner, PointOwnerType::Member, 500);
        assert_eq!(record.amount, -500);
        assert_eq!(record.reason, PointReason::Spend);

        // 이미 음수로 전달되어도 결과는 음수 하나
        let record = GuestPoint::spend(owner, PointOwnerType::Member, -500);
        assert_eq!(record.amount, -500);
    }
}
