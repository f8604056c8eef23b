//! Member Entity Implementation
//!
//! 회원 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 카카오 소셜 로그인을 모두 지원하는 통합된 회원 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 카카오 OAuth 연동 데이터
///
/// 소셜 로그인 회원에게만 존재하며, 재로그인 시 카카오 사용자 ID로
/// 기존 계정을 찾는 데 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoOAuthData {
    /// 카카오에서 발급한 사용자 고유 ID
    pub provider_user_id: String,
    /// 카카오 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_profile_image: Option<String>,
}

/// 회원 엔티티
///
/// 플랫폼의 인증된 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증(이메일/패스워드)과 카카오 인증을 모두 지원하며,
/// 탈퇴는 물리 삭제 대신 `is_active` 플래그로 처리합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 회원 이메일 (unique)
    pub email: String,
    /// 닉네임 (unique, 금칙어 정책 적용)
    pub nickname: String,
    /// 해시된 비밀번호 (소셜 로그인 회원의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// 카카오 연동 데이터 (로컬 회원의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_data: Option<KakaoOAuthData>,
    /// 계정 활성화 여부 (소프트 삭제 플래그)
    pub is_active: bool,
    /// 회원 역할
    pub roles: Vec<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// 마지막 로그인 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Member {
    /// 새 로컬 회원 생성 (이메일/패스워드)
    pub fn new_local(email: String, nickname: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            nickname,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            oauth_data: None,
            is_active: true,
            roles: vec!["member".to_string()],
            profile_image_url: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 카카오 회원 생성
    ///
    /// 첫 카카오 로그인 시 자동 가입되는 회원입니다. 비밀번호가 없습니다.
    pub fn new_kakao(
        email: String,
        nickname: String,
        provider_user_id: String,
        provider_profile_image: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        let oauth_data = KakaoOAuthData {
            provider_user_id,
            provider_profile_image: provider_profile_image.clone(),
        };

        Self {
            id: None,
            email,
            nickname,
            password_hash: None,
            auth_provider: AuthProvider::Kakao,
            oauth_data: Some(oauth_data),
            is_active: true,
            roles: vec!["member".to_string()],
            profile_image_url: provider_profile_image,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로컬 인증 회원인지 확인
    pub fn is_local_auth(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Local)
    }

    /// 비밀번호 인증이 가능한 회원인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local_auth() && self.password_hash.is_some()
    }

    /// 카카오 사용자 ID 가져오기
    pub fn kakao_provider_id(&self) -> Option<&str> {
        self.oauth_data.as_ref().map(|data| data.provider_user_id.as_str())
    }

    /// 관리자 권한 보유 여부
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_member() {
        let member = Member::new_local(
            "dev@moa.kr".to_string(),
            "개발자홍길동".to_string(),
            "hashed".to_string(),
        );

        assert!(member.is_local_auth());
        assert!(member.can_authenticate_with_password());
        assert!(member.is_active);
        assert_eq!(member.roles, vec!["member".to_string()]);
        assert!(member.kakao_provider_id().is_none());
    }

    #[test]
    fn test_new_kakao_member() {
        let member = Member::new_kakao(
            "social@moa.kr".to_string(),
            "카카오회원".to_string(),
            "123456789".to_string(),
            Some("https://k.kakaocdn.net/img.jpg".to_string()),
        );

        assert!(!member.is_local_auth());
        assert!(!member.can_authenticate_with_password());
        assert_eq!(member.kakao_provider_id(), Some("123456789"));
        assert_eq!(member.profile_image_url.as_deref(), Some("https://k.kakaocdn.net/img.jpg"));
    }
}
