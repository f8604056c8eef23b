//! 프로모션 배너 DTO 모듈

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::promotions::Promotion;
use crate::utils::string_utils::deserialize_optional_string;

/// 배너 응답 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct PromotionResponse {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub display_order: i32,
    pub starts_at: DateTime,
    pub ends_at: DateTime,
}

impl From<Promotion> for PromotionResponse {
    fn from(promotion: Promotion) -> Self {
        Self {
            id: promotion.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: promotion.title,
            image_url: promotion.image_url,
            link_url: promotion.link_url,
            display_order: promotion.display_order,
            starts_at: promotion.starts_at,
            ends_at: promotion.ends_at,
        }
    }
}

/// 배너 생성 요청 DTO (관리자 전용)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePromotionRequest {
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: String,

    #[validate(url(message = "유효한 이미지 URL을 입력해주세요"))]
    pub image_url: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub link_url: Option<String>,

    pub display_order: i32,

    /// 노출 시작 시각 (Unix timestamp millis)
    pub starts_at_millis: i64,
    /// 노출 종료 시각 (Unix timestamp millis)
    pub ends_at_millis: i64,
}
