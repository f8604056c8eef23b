//! # 게스트 세션 서비스 구현
//!
//! 회원 가입 전의 익명 세션 신원을 관리합니다.
//!
//! 게스트 토큰은 UUID 기반 불투명 문자열로 발급되며, 서버에는 SHA-256
//! 해시만 저장됩니다. 평문 토큰은 발급 응답에서 단 한 번만 전달됩니다.
//! 가입 시 게스트 세션이 회원과 연결되고, 게스트가 쌓은 포인트는
//! 연결을 통해 승계됩니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use sha2::{Digest, Sha256};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    core::errors::AppError,
    domain::{
        dto::members::{GuestSessionResponse, PointBalanceResponse},
        entities::members::{Guest, GuestPoint, Member, PointOwnerType, PointReason},
    },
    repositories::members::{GuestRepository, PointRepository},
    services::auth::token_service::TokenService,
    config::JwtConfig,
};

/// 게스트 세션 비즈니스 로직 서비스
#[service(name = "guest")]
pub struct GuestService {
    /// 게스트 리포지토리 (자동 주입)
    guest_repo: Arc<GuestRepository>,

    /// 포인트 원장 리포지토리 (자동 주입)
    point_repo: Arc<PointRepository>,

    /// JWT 토큰 서비스 (자동 주입)
    token_service: Arc<TokenService>,
}

impl GuestService {
    /// 토큰을 SHA-256 hex로 해싱합니다.
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 새 게스트 세션 발급
    ///
    /// 불투명 세션 토큰과 게스트용 JWT 액세스 토큰을 함께 반환합니다.
    pub async fn issue_session(&self) -> Result<GuestSessionResponse, AppError> {
        let guest_token = Uuid::new_v4().simple().to_string();
        let token_hash = Self::hash_token(&guest_token);

        let guest = self.guest_repo.create(Guest::new(token_hash)).await?;
        let access_token = self.token_service.generate_guest_token(&guest)?;

        log::info!("게스트 세션 발급: {}", guest.id_string().unwrap_or_default());

        Ok(GuestSessionResponse {
            guest_id: guest.id_string().unwrap_or_default(),
            guest_token,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::guest_expiration_days() * 24 * 3600,
        })
    }

    /// 세션 토큰으로 게스트 조회
    pub async fn find_by_token(&self, guest_token: &str) -> Result<Option<Guest>, AppError> {
        let token_hash = Self::hash_token(guest_token);
        self.guest_repo.find_by_token_hash(&token_hash).await
    }

    /// 게스트 세션을 회원과 연결합니다.
    ///
    /// 게스트가 쌓은 포인트 잔액이 있으면 회원 소유로 승계 레코드를
    /// 남깁니다 (게스트 차감 + 회원 적립).
    pub async fn link_to_member(&self, guest_token: &str, member: &Member) -> Result<(), AppError> {
        let guest = self.find_by_token(guest_token).await?
            .ok_or_else(|| AppError::NotFound("게스트 세션을 찾을 수 없습니다".to_string()))?;

        let member_id = member.id
            .ok_or_else(|| AppError::InternalError("회원 ID가 없습니다".to_string()))?;
        let guest_id = guest.id
            .ok_or_else(|| AppError::InternalError("게스트 ID가 없습니다".to_string()))?;

        self.guest_repo.link_member(&guest_id, &member_id).await?;

        // 포인트 승계
        let guest_balance = self.point_repo.balance(&guest_id).await?;
        if guest_balance > 0 {
            self.point_repo.insert(GuestPoint::spend(
                guest_id,
                PointOwnerType::Guest,
                guest_balance,
            )).await?;

            self.point_repo.insert(GuestPoint::earn(
                member_id,
                PointOwnerType::Member,
                guest_balance,
                PointReason::AdminAdjust,
                None,
            )).await?;

            log::info!(
                "게스트 포인트 승계: {} -> {} ({}P)",
                guest_id.to_hex(), member_id.to_hex(), guest_balance
            );
        }

        Ok(())
    }

    /// 소유자(회원 또는 게스트)의 포인트 잔액 조회
    pub async fn point_balance(&self, owner_id: &str) -> Result<PointBalanceResponse, AppError> {
        let object_id = ObjectId::parse_str(owner_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let balance = self.point_repo.balance(&object_id).await?;

        Ok(PointBalanceResponse {
            owner_id: owner_id.to_string(),
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hash_is_stable_hex() {
        let a = GuestService::hash_token("token-123");
        let b = GuestService::hash_token("token-123");
        let c = GuestService::hash_token("token-124");

        assert_eq!(a, b);
        assert_ne!(a, c);
        // SHA-256 hex는 64자
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
