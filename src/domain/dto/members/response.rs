//! 회원/인증 응답 DTO
//!
//! 민감 정보(비밀번호 해시, OAuth 내부 데이터)는 응답에서 제외됩니다.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::config::AuthProvider;
use crate::domain::entities::members::Member;

/// 회원 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub email: String,
    pub nickname: String,

    /// 인증 프로바이더 (local, kakao)
    pub auth_provider: AuthProvider,

    pub is_active: bool,
    pub roles: Vec<String>,
    pub profile_image_url: Option<String>,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        let Member {
            id,
            email,
            nickname,
            auth_provider,
            is_active,
            roles,
            profile_image_url,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = member;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            nickname,
            auth_provider,
            is_active,
            roles,
            profile_image_url,
            last_login_at,
            created_at,
            updated_at,
        }
    }
}

/// 회원 가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub member: MemberResponse,
    pub message: String,
}

/// 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub member: MemberResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 닉네임 사용 가능 여부 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct NicknameCheckResponse {
    pub nickname: String,
    pub available: bool,
    /// 사용 불가 사유 (available == true면 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 게스트 세션 발급 응답
///
/// `guest_token`은 이 응답에서 단 한 번만 평문으로 전달됩니다.
/// 서버에는 해시만 저장됩니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct GuestSessionResponse {
    pub guest_id: String,
    pub guest_token: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 포인트 잔액 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct PointBalanceResponse {
    pub owner_id: String,
    pub balance: i64,
}
