//! 프로모션 배너 엔티티 모듈

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 프로모션 배너 엔티티
///
/// 노출 기간(`starts_at`~`ends_at`)과 정렬 순서를 가지는 홍보 콘텐츠입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    /// 배너 이미지 URL
    pub image_url: String,
    /// 클릭 시 이동 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// 노출 순서 (오름차순)
    pub display_order: i32,
    pub starts_at: DateTime,
    pub ends_at: DateTime,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Promotion {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 주어진 시각에 노출 중인 배너인지 확인
    pub fn is_visible_at(&self, now: DateTime) -> bool {
        self.is_active && self.starts_at <= now && now < self.ends_at
    }
}
