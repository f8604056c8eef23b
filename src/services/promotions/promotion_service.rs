//! 프로모션 배너 서비스

use std::sync::Arc;
use mongodb::bson::DateTime;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::promotions::{CreatePromotionRequest, PromotionResponse},
        entities::promotions::Promotion,
    },
    repositories::promotions::PromotionRepository,
};

/// 프로모션 비즈니스 로직 서비스
#[service(name = "promotion")]
pub struct PromotionService {
    /// 프로모션 리포지토리 (자동 주입)
    promotion_repo: Arc<PromotionRepository>,
}

impl PromotionService {
    /// 노출 중 배너 목록 조회
    pub async fn list_visible(&self) -> Result<Vec<PromotionResponse>, AppError> {
        let banners = self.promotion_repo.find_visible().await?;
        Ok(banners.into_iter().map(Into::into).collect())
    }

    /// 배너 생성 (관리자 전용)
    pub async fn create(&self, request: CreatePromotionRequest) -> Result<PromotionResponse, AppError> {
        if request.ends_at_millis <= request.starts_at_millis {
            return Err(AppError::ValidationError(
                "노출 종료 시각은 시작 시각 이후여야 합니다".to_string()
            ));
        }

        let now = DateTime::now();
        let promotion = Promotion {
            id: None,
            title: request.title,
            image_url: request.image_url,
            link_url: request.link_url,
            display_order: request.display_order,
            starts_at: DateTime::from_millis(request.starts_at_millis),
            ends_at: DateTime::from_millis(request.ends_at_millis),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created = self.promotion_repo.create(promotion).await?;

        log::info!("배너 생성: {}", created.title);

        Ok(PromotionResponse::from(created))
    }
}
